pub mod class;
pub mod field;
pub mod method;
pub mod types;
