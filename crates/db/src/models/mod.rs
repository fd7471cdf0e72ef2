//! Row structs for each table.
//!
//! Each submodule contains a `FromRow` struct matching the table row and a
//! `TryFrom` conversion into the domain type from `railtrack_core`. Text
//! columns holding enums are parsed during the conversion.

pub mod alert;
pub mod inspection;
pub mod section;
pub mod user;
