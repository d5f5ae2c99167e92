// Domain module - Configuration and error types shared by every layer
pub mod config;
pub mod error;
