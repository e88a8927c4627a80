pub mod catalog_page;
pub mod charts_page;
pub mod explorer_page;
pub mod settings_page;
