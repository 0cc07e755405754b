//! HTTP request handlers

pub mod chaos;
pub mod health;
pub mod metrics;
pub mod orders;
pub mod search;
