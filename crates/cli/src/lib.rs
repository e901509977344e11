//! Terminal output helpers for the Pantry command line
//!
//! - Status messages
//! - Nutrition result and catalogue rendering

#![warn(missing_docs)]

pub mod output;
pub mod render;
