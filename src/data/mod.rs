pub mod source;
pub mod mock;
pub mod payload;
