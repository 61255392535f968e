//! Route modules for the API server
//!
//! - analysis: statement rows to ratios, balance composition and waterfall
//! - narrative: report text to a typed document
//! - amounts: KRW display formatting
//! - settings: configuration display

pub mod amounts;
pub mod analysis;
pub mod narrative;
pub mod settings;
