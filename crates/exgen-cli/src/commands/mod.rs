//! Command handlers. Each one translates parsed arguments into calls on the
//! core crate and renders the result.

pub mod completions;
pub mod config;
pub mod new;
