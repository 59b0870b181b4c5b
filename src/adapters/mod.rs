//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod simulated_executor;
pub mod synthetic_adapter;
