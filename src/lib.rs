//! Core library for the locsync command line application.
//!
//! The library exposes the pieces that power the command-line interface as
//! well as the integration tests. The modules are structured to keep
//! responsibilities narrow and composable: YAML adapters live under [`io`],
//! the document representation inside [`model`], and the structural merge
//! under [`sync`].

pub mod error;
pub mod io;
pub mod model;
pub mod sync;

pub use error::{Result, SyncError};
