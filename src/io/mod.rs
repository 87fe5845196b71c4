pub mod yaml_read;
pub mod yaml_write;
