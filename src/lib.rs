//! # Sequence builder backend for a laboratory pulse generator
//!
//! This crate implements the stateful core of a pulse-sequencer server: it
//! accumulates timed digital (TTL) and analog (DDS) events per caller
//! session, validates every event against the registered channels and the
//! installation's global time window, encodes DDS settings into the
//! hardware's native parameter words, and compiles the finished sequence into
//! the representations the hardware and the operators consume.
//!
//! It is exposed to the Python RPC server through `PyO3` as the module
//! `pulser_backend`, and is equally usable as a plain Rust library for
//! embedding with a real device driver.
//!
//! ## Usage
//!
//! ```
//! use pulser_backend::pulser::{BasePulser, Pulser};
//!
//! // 1 µs resolution, sequence window [0, 85] s
//! let mut pulser = Pulser::new(1e-6, 0.0, 85.0, (0.0, 1000.0));
//! pulser
//!     .add_ttl_channel("866DP", 0, false, false, false, false)
//!     .unwrap();
//!
//! pulser.new_sequence(0);
//! pulser.add_ttl_pulse(0, "866DP", 1.0, 0.5).unwrap();
//! pulser.program_sequence(0).unwrap();
//!
//! let programmed = BasePulser::human_readable_ttl(&pulser, 0, true).unwrap();
//! assert_eq!(programmed, vec![("866DP".to_string(), 1.0, 0.5)]);
//! ```
//!
//! ## Structure
//!
//! - [`channel`]: TTL and DDS registry entries and their range checks.
//! - [`event`]: pulse/event value types and the DDS word encoding.
//! - [`sequence`]: the per-session event accumulator and its compiled
//!   representations.
//! - [`pulser`]: the top-level builder, its [`BasePulser`] trait and the
//!   Python bridge.
//! - [`hardware`]: the driver and notification seams.
//! - [`errors`]: the crate-wide error type and its Python mapping.
//!
//! [`BasePulser`]: pulser::BasePulser

use pyo3::prelude::*;

pub mod channel;
pub mod errors;
pub mod event;
pub mod hardware;
pub mod pulser;
pub mod sequence;

pub use channel::*;
pub use errors::PulserError;
pub use event::*;
pub use hardware::*;
pub use pulser::*;
pub use sequence::*;

#[pymodule]
fn pulser_backend(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<Pulser>()?;
    Ok(())
}
