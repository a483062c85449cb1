//! Error types for the PWM inverter simulator.
//!
//! This module provides a unified error type [`InverterError`] that covers
//! parameter validation, spectral analysis and the front ends.

use thiserror::Error;

/// Result type alias using [`InverterError`].
pub type Result<T> = std::result::Result<T, InverterError>;

/// Unified error type for all simulator operations.
#[derive(Error, Debug)]
pub enum InverterError {
    // ============ Parameter Errors ============
    /// A simulation parameter is out of its valid range
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    /// Too few samples to simulate or analyze
    #[error("Insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    // ============ I/O Errors ============
    /// Error writing results
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl InverterError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient samples error
    pub fn insufficient_samples(required: usize, actual: usize) -> Self {
        Self::InsufficientSamples { required, actual }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::OutputError {
            message: message.into(),
        }
    }
}
