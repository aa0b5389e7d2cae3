//! Recipe form module
//!
//! Editable ingredient list plus validation before calculation.

pub mod state;
pub mod validate;

pub use state::{parse_percentage, FormError, FormState, DEFAULT_TOTAL_WEIGHT};
pub use validate::{validate, ValidationError};
