//! Province and contracting-entity annotation for procurement notices.
//!
//! The two matchers, [`locate::locate_province`] and
//! [`entity::extract_entity`], are pure functions over immutable reference
//! data and can be called from any number of threads. Everything else in the
//! crate loads that data and applies the matchers to CSV sheets.

pub mod config;
pub mod entity;
pub mod error;
pub mod gazetteer;
pub mod keywords;
pub mod locate;
pub mod scanner;
pub mod table;
