//! Query functions, one module per table.

pub mod metrics;
pub mod presentations;
