//! CLI command implementations.

pub mod config;
pub mod export;
pub mod inspect;
pub mod layout;
pub mod select;
pub mod table;
