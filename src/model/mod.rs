use std::collections::BTreeMap;

/// A single entry in the localization key tree.
///
/// The set of node kinds is closed: an interior section grouping further
/// entries under a name, or a leaf holding one translated string. Lookup by
/// name is a capability of sections only, so a leaf can never be asked for a
/// child.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Interior node grouping child nodes under a name.
    Section(SectionNode),
    /// Leaf node holding one translated string under a name.
    Value(ValueNode),
}

impl Node {
    /// Returns the key name of the node regardless of its kind.
    pub fn name(&self) -> &str {
        match self {
            Node::Section(section) => &section.name,
            Node::Value(value) => &value.name,
        }
    }

    /// Returns `true` for leaf value nodes.
    pub fn is_value(&self) -> bool {
        matches!(self, Node::Value(_))
    }
}

/// An interior node of the key tree. Child order is semantically meaningful
/// and drives the output order of the rendered document.
///
/// Within one `children` sequence no two nodes share a name; the YAML reader
/// guarantees this because duplicate mapping keys are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionNode {
    /// Key name of the section. The document root uses the empty name.
    pub name: String,
    /// Ordered child entries.
    pub children: Vec<Node>,
}

impl SectionNode {
    /// Creates an empty section with the provided name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Creates a section holding the provided children.
    pub fn with_children(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Returns the first child with the given name, if any. Linear scan over
    /// the children; sibling names are unique so "first" is also "only".
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Returns the position of the child with the given name, if any.
    pub fn child_position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.name() == name)
    }
}

/// A leaf translation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNode {
    /// Key name of the entry.
    pub name: String,
    /// Translated text.
    pub value: String,
}

impl ValueNode {
    /// Creates a leaf entry with the provided name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A complete localization document: metadata, the key tree, and the flat
/// external-key table.
///
/// `name` is not part of the wire format; the loader fills it from the file
/// stem so prompts and log events can refer to the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Display name of the document, usually the file stem.
    pub name: String,
    /// Credited translators, in document order.
    pub authors: Vec<String>,
    /// Free-form version marker.
    pub version: String,
    /// Culture code such as `en-US`.
    pub culture_code: String,
    /// Loading-screen tips, in document order.
    pub tips: Vec<String>,
    /// Flat translation entries outside the key tree. Order is irrelevant.
    pub external_keys: BTreeMap<String, String>,
    /// Root of the key tree. The root section is unnamed.
    pub root: SectionNode,
}

impl Document {
    /// Creates an empty document with the provided display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
