pub mod record;
pub mod format;
