//! PostgreSQL persistence for deckgen: generation history and download
//! counters.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
