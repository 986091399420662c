//! Registry entries for the two kinds of physical channels the sequencer
//! drives: digital TTL lines and analog DDS synthesizer channels.
//!
//! Channel objects are configuration carriers, read-only to the sequence
//! builder: they resolve a display name to a hardware address and hold the
//! legal parameter ranges that `add` operations validate against.
//!
//! ## Main structures
//!
//! - [`TtlChannel`]: a digital on/off line addressed by a hardware channel
//!   number, plus its manual/automatic switching configuration.
//! - [`DdsChannel`]: an analog output channel with allowed frequency and
//!   amplitude intervals and the canonical "off" parameters substituted when
//!   a pulse's effective output is zero.

use crate::errors::{PulserError, Result};

/// A digital TTL line and its switch configuration.
///
/// `(is_manual, manual_state, manual_inversion, auto_inversion)` mirror the
/// switch-state tuple the GUI clients display. A manual line is held at
/// `manual_inversion XOR manual_state`; an automatic line follows the
/// sequence with optional inversion.
#[derive(Clone, Debug, PartialEq)]
pub struct TtlChannel {
    channel_number: u32,
    is_manual: bool,
    manual_state: bool,
    manual_inversion: bool,
    auto_inversion: bool,
}

impl TtlChannel {
    pub fn new(
        channel_number: u32,
        is_manual: bool,
        manual_state: bool,
        manual_inversion: bool,
        auto_inversion: bool,
    ) -> Self {
        Self {
            channel_number,
            is_manual,
            manual_state,
            manual_inversion,
            auto_inversion,
        }
    }

    pub fn channel_number(&self) -> u32 {
        self.channel_number
    }
    pub fn is_manual(&self) -> bool {
        self.is_manual
    }
    pub fn manual_state(&self) -> bool {
        self.manual_state
    }
    pub fn manual_inversion(&self) -> bool {
        self.manual_inversion
    }
    pub fn auto_inversion(&self) -> bool {
        self.auto_inversion
    }

    /// Level a manual line is driven to when the hardware is attached.
    pub fn initial_manual_state(&self) -> bool {
        self.manual_inversion ^ self.manual_state
    }

    /// Switch-state tuple in display order:
    /// `(is_manual, manual_state, manual_inversion, auto_inversion)`.
    pub fn state(&self) -> (bool, bool, bool, bool) {
        (
            self.is_manual,
            self.manual_state,
            self.manual_inversion,
            self.auto_inversion,
        )
    }
}

/// An analog DDS channel: hardware address, legal parameter intervals and
/// default output settings.
///
/// Frequencies are in MHz, amplitudes in dBm, phases in degrees; unit
/// conversion happens at the RPC boundary, the builder only sees plain
/// numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct DdsChannel {
    name: String,
    channel_number: u32,
    allowed_freq_range: (f64, f64),
    allowed_ampl_range: (f64, f64),
    off_parameters: (f64, f64),
    frequency: f64,
    amplitude: f64,
    phase: f64,
    state: bool,
}

impl DdsChannel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        channel_number: u32,
        allowed_freq_range: (f64, f64),
        allowed_ampl_range: (f64, f64),
        off_parameters: (f64, f64),
        frequency: f64,
        amplitude: f64,
        phase: f64,
        state: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            channel_number,
            allowed_freq_range,
            allowed_ampl_range,
            off_parameters,
            frequency,
            amplitude,
            phase,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn channel_number(&self) -> u32 {
        self.channel_number
    }
    pub fn allowed_freq_range(&self) -> (f64, f64) {
        self.allowed_freq_range
    }
    pub fn allowed_ampl_range(&self) -> (f64, f64) {
        self.allowed_ampl_range
    }
    /// Canonical `(frequency, amplitude)` pair substituted when a pulse is
    /// effectively off.
    pub fn off_parameters(&self) -> (f64, f64) {
        self.off_parameters
    }
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
    pub fn phase(&self) -> f64 {
        self.phase
    }
    /// Whether the channel's standing output is currently on.
    pub fn is_on(&self) -> bool {
        self.state
    }

    /// Validates a frequency (MHz) against the allowed interval.
    pub fn check_frequency(&self, value: f64) -> Result<()> {
        Self::check_range("frequency", &self.name, self.allowed_freq_range, value)
    }

    /// Validates an amplitude (dBm) against the allowed interval.
    pub fn check_amplitude(&self, value: f64) -> Result<()> {
        Self::check_range("amplitude", &self.name, self.allowed_ampl_range, value)
    }

    fn check_range(
        parameter: &'static str,
        name: &str,
        range: (f64, f64),
        value: f64,
    ) -> Result<()> {
        if !(range.0 <= value && value <= range.1) {
            return Err(PulserError::OutOfRange {
                channel: name.to_string(),
                parameter,
                value,
            });
        }
        Ok(())
    }
}
