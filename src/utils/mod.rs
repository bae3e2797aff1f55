pub mod date;
pub mod template;
