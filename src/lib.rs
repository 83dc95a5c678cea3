pub mod core;
pub mod dataset;
pub mod db;
pub mod error;
pub mod harness;

pub use crate::core::registry::MappingRegistry;
pub use crate::core::types::{Language, Relation, Setting};
pub use crate::error::ConvertError;
