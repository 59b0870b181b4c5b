//! Core domain types and logic.

pub mod app_config;
pub mod config_validation;
pub mod error;
pub mod execution;
pub mod format;
pub mod market_data;
pub mod moving_average;
pub mod order;
pub mod pipeline;
pub mod strategy;
pub mod time_range;
