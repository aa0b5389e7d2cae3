//! Calculator Tools module
//!
//! MCP tool implementations for the recipe nutrition calculator.

pub mod calculator;
pub mod facts;
pub mod status;
