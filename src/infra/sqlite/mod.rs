pub mod schema;
pub mod settings;
