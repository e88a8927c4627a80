pub mod catalog_service;
pub mod query_builder;
pub mod query_cell;
pub mod settings_service;
