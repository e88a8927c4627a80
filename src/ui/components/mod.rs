pub mod charts;
pub mod error_notice;
pub mod filters;
pub mod metric_cards;
pub mod pager;
pub mod planet_detail;
pub mod planet_table;
