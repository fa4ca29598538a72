//! # Application Layer
//!
//! Ports for the model service and the console, and one use case per program.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
