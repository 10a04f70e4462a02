pub mod classify;
pub mod versioning;
