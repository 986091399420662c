//! Error types surfaced to callers of the sequence builder.
//!
//! Every validation failure is a synchronous rejection of the offending call;
//! there is no retry or silent recovery. At the Python boundary each variant
//! maps onto a conventional exception type so that LabRAD-side clients see
//! the same raise behavior as the original server.

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

/// Convenience alias for results produced by the builder.
pub type Result<T> = std::result::Result<T, PulserError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PulserError {
    /// An "add" or read-back call arrived before `new_sequence`.
    #[error("Please create new sequence first")]
    SequenceNotInitialized,

    /// Channel name absent from the relevant registry.
    #[error("Unknown channel {0}")]
    UnknownChannel(String),

    /// A start or end time violates the configured sequence window.
    /// TTL pulses use inclusive bounds, DDS pulses a strict lower bound.
    #[error("time {time} s out of acceptable range [{min}, {max}] s for {target}")]
    TimeOutOfRange {
        target: String,
        time: f64,
        min: f64,
        max: f64,
    },

    /// TTL pulse duration below the installation's time resolution.
    #[error("incorrect duration {duration} s for channel {channel}: minimum resolution is {resolution} s")]
    InvalidDuration {
        channel: String,
        duration: f64,
        resolution: f64,
    },

    /// DDS amplitude or frequency outside the channel's allowed range.
    /// Only raised when the pulse is not effectively off.
    #[error("channel {channel}: {parameter} of {value} is outside the allowed range")]
    OutOfRange {
        channel: String,
        parameter: &'static str,
        value: f64,
    },

    /// Attempt to register a channel name twice.
    #[error("channel {0} already registered")]
    DuplicateChannel(String),

    /// Hardware address does not fit the TTL state word.
    #[error("channel {channel}: hardware address {number} exceeds the supported line count")]
    InvalidChannelNumber { channel: String, number: u32 },
}

impl From<PulserError> for PyErr {
    fn from(err: PulserError) -> PyErr {
        match &err {
            PulserError::UnknownChannel(_) => PyKeyError::new_err(err.to_string()),
            PulserError::SequenceNotInitialized => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
