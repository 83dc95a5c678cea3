pub mod fallback;
pub mod registry;
pub mod schema;
pub mod tables;
pub mod types;
