//! Value types shared by the validation, binding and transport layers.

mod args;
mod domain_types;

pub use args::*;
pub use domain_types::*;
