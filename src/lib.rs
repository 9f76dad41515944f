//! First-order logic formula checker: parsing, role analysis and truth tables.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
