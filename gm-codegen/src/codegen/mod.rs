//! Code generation module

mod code_generator;
mod emitter;
mod formatter;
mod language;
mod naming;
mod struct_generator;
mod type_resolver;

pub use code_generator::*;
pub use emitter::*;
pub use formatter::*;
pub use language::*;
pub use naming::*;
pub use struct_generator::*;
pub use type_resolver::*;
