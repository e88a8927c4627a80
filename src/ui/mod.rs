pub mod components;
pub mod format;
pub mod hooks;
pub mod state;
pub mod styles;
pub mod views;
