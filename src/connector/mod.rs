//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Azure OpenAI chat and image clients (reqwest)
//! - Standard-input console with a key-press pause (crossterm)
//! - Deterministic mocks for tests and offline runs

pub mod adapter;

pub use adapter::*;
