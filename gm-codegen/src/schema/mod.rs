//! Schema reading from the MySQL information schema

mod link;
mod metadata;
mod reader;

pub use link::*;
pub use metadata::*;
pub use reader::*;
