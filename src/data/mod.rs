//! # Data
//!
//! Source loading, CSV persistence and review text preprocessing.

mod loader;
mod preprocessing;

pub use loader::{DataLoader, LABELED_COLUMNS};
pub use preprocessing::TextPreprocessor;
