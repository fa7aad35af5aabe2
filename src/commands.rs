pub mod charts;
pub mod profile;
pub mod validate;
