pub mod envelope;
pub mod planet;
pub mod query;
