//! Core abstractions for graph processing
//!
//! This module defines the traits every pipeline stage implements, the
//! attribute contract the classifier reads cells through, and the shared
//! error, style, and logging infrastructure.

mod attributes;
mod database;
mod detector;
mod error;
pub mod logging;
mod parser;
mod style;
mod types;

pub use attributes::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use style::*;
pub use types::*;
