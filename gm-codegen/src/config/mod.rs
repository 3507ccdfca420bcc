//! Configuration loading for gm-codegen

pub mod defaults;
mod settings;

pub use settings::*;
