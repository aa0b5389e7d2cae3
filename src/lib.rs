//! Recipe Nutrition Calculator Library
//!
//! Ingredient percentages in, one nutrition facts summary out.

pub mod build_info;
pub mod config;
pub mod form;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
