//! DTO modules that bridge services with templates.

pub mod editor;
pub mod list;
