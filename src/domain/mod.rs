//! Domain records exchanged with the battalion backend.

pub mod access_control;
pub mod assessment;
pub mod auth;
pub mod book_day;
pub mod dates;
pub mod entry;
pub mod options;
pub mod people;
pub mod productivity;
pub mod reference;
pub mod types;
