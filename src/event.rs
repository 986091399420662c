//! Pulse and event value types accumulated by a [`Sequence`], and the
//! deterministic encoding of DDS settings into the hardware's native word.
//!
//! ## Main structures and enumerations
//!
//! - [`TtlPulse`]: a `(channel address, start, duration)` triple raising a
//!   digital line for `[start, start + duration)`.
//! - [`DdsEvent`]: one edge of a DDS pulse. A pulse of nonzero duration is
//!   represented as exactly two events, a `Start` edge carrying the encoded
//!   on-settings and a `Stop` edge carrying the encoded off-settings, never
//!   as a single interval record.
//! - [`DdsOutput`]: the effective output of a requested DDS pulse, computed
//!   once: `On` with the full parameter set, or `Off` when the requested
//!   frequency or amplitude is zero. All range checking and encoding branches
//!   on this variant instead of re-testing the raw fields.
//! - [`encode_settings`]: the pure injective map from physical settings to a
//!   fixed-width 64-bit word (frequency tuning word, amplitude scale factor,
//!   phase offset word).
//!
//! [`Sequence`]: crate::sequence::Sequence

use std::fmt;

use crate::channel::DdsChannel;
use crate::errors::Result;

/// DDS reference clock, MHz. Frequency tuning words are fractions of this.
pub const DDS_SYSCLK_MHZ: f64 = 1000.0;

/// A single TTL pulse: raises `channel` to active for
/// `[start, start + duration)`. Times are in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TtlPulse {
    pub channel: u32,
    pub start: f64,
    pub duration: f64,
}

impl TtlPulse {
    pub fn new(channel: u32, start: f64, duration: f64) -> Self {
        Self {
            channel,
            start,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

impl fmt::Display for TtlPulse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "TtlPulse(ch{}, {}-{})",
            self.channel,
            self.start,
            self.end()
        )
    }
}

/// Which edge of a DDS pulse an event represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Start,
    Stop,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Edge::Start => "start",
                Edge::Stop => "stop",
            }
        )
    }
}

/// One edge of a DDS pulse: the channel name, the time it fires, the encoded
/// parameter word to load, and whether it is the start or stop edge.
#[derive(Clone, Debug, PartialEq)]
pub struct DdsEvent {
    pub name: String,
    pub time: f64,
    pub word: u64,
    pub edge: Edge,
}

impl DdsEvent {
    pub fn new(name: &str, time: f64, word: u64, edge: Edge) -> Self {
        Self {
            name: name.to_string(),
            time,
            word,
            edge,
        }
    }
}

impl fmt::Display for DdsEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "DdsEvent({}, t={}, {:#018x}, {})",
            self.name, self.time, self.word, self.edge
        )
    }
}

/// A requested DDS pulse as received from the caller, after unit
/// normalization. `phase`, `ramp_rate` and `amp_ramp_rate` default to zero
/// when the short tuple form is used.
#[derive(Clone, Debug, PartialEq)]
pub struct DdsPulseRequest {
    pub name: String,
    pub start: f64,
    pub duration: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub phase: f64,
    pub ramp_rate: f64,
    pub amp_ramp_rate: f64,
}

/// Effective output of a requested DDS pulse.
///
/// A request with `frequency == 0` or `amplitude == 0` cannot be synthesized
/// as such; the hardware is instead loaded with the channel's canonical off
/// parameters and no range checking applies. Computing this variant once
/// removes the scattered zero-field tests from validation and encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum DdsOutput {
    On {
        frequency: f64,
        amplitude: f64,
        phase: f64,
        ramp_rate: f64,
        amp_ramp_rate: f64,
    },
    /// The requested phase is carried through even when the output is off,
    /// so both edges of an off pulse load it alongside the off parameters.
    Off { phase: f64 },
}

impl DdsOutput {
    /// Classifies a pulse request.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulser_backend::event::DdsOutput;
    ///
    /// assert!(matches!(DdsOutput::from_request(100.0, -10.0, 0.0, 0.0, 0.0),
    ///                  DdsOutput::On { .. }));
    /// assert!(matches!(DdsOutput::from_request(0.0, -10.0, 0.0, 0.0, 0.0),
    ///                  DdsOutput::Off { .. }));
    /// assert!(matches!(DdsOutput::from_request(100.0, 0.0, 0.0, 0.0, 0.0),
    ///                  DdsOutput::Off { .. }));
    /// ```
    pub fn from_request(
        frequency: f64,
        amplitude: f64,
        phase: f64,
        ramp_rate: f64,
        amp_ramp_rate: f64,
    ) -> Self {
        if frequency == 0.0 || amplitude == 0.0 {
            DdsOutput::Off { phase }
        } else {
            DdsOutput::On {
                frequency,
                amplitude,
                phase,
                ramp_rate,
                amp_ramp_rate,
            }
        }
    }

    /// Effective output of a channel's standing (non-sequence) state, used
    /// when programming channel defaults at registration.
    pub fn from_channel_state(chan: &DdsChannel) -> Self {
        if chan.is_on() {
            DdsOutput::On {
                frequency: chan.frequency(),
                amplitude: chan.amplitude(),
                phase: chan.phase(),
                ramp_rate: 0.0,
                amp_ramp_rate: 0.0,
            }
        } else {
            DdsOutput::Off {
                phase: chan.phase(),
            }
        }
    }

    /// Range-checks the on-parameters against the channel's allowed
    /// intervals. The `Off` arm is exempt.
    pub fn check_ranges(&self, chan: &DdsChannel) -> Result<()> {
        if let DdsOutput::On {
            frequency,
            amplitude,
            ..
        } = self
        {
            chan.check_frequency(*frequency)?;
            chan.check_amplitude(*amplitude)?;
        }
        Ok(())
    }

    /// Encodes the settings loaded at the start edge of a pulse.
    pub fn encode(&self, chan: &DdsChannel) -> u64 {
        match self {
            DdsOutput::On {
                frequency,
                amplitude,
                phase,
                ..
            } => encode_settings(chan, *frequency, *amplitude, *phase),
            DdsOutput::Off { phase } => {
                let (freq_off, ampl_off) = chan.off_parameters();
                encode_settings(chan, freq_off, ampl_off, *phase)
            }
        }
    }

    /// Encodes the settings loaded at the stop edge: the same frequency the
    /// pulse ran at, but the channel's off amplitude. For an `Off` pulse both
    /// edges carry the identical off-encoding.
    pub fn encode_stop(&self, chan: &DdsChannel) -> u64 {
        let (freq_off, ampl_off) = chan.off_parameters();
        match self {
            DdsOutput::On {
                frequency, phase, ..
            } => encode_settings(chan, *frequency, ampl_off, *phase),
            DdsOutput::Off { phase } => encode_settings(chan, freq_off, ampl_off, *phase),
        }
    }
}

/// Converts physical DDS settings to the hardware's native 64-bit word.
///
/// Layout (AD9910 style):
/// - bits 63..32: 32-bit frequency tuning word, `freq / DDS_SYSCLK_MHZ`
///   scaled to the full 32-bit span;
/// - bits 29..16: 14-bit amplitude scale factor, linear in dB across the
///   channel's allowed amplitude interval (values below the interval floor,
///   such as off amplitudes, clamp to zero);
/// - bits 15..0: 16-bit phase offset word, degrees modulo 360.
pub fn encode_settings(chan: &DdsChannel, freq_mhz: f64, ampl_dbm: f64, phase_deg: f64) -> u64 {
    let ftw = ((freq_mhz / DDS_SYSCLK_MHZ) * (u32::MAX as f64 + 1.0)).round() as u64 & 0xFFFF_FFFF;

    let (ampl_min, ampl_max) = chan.allowed_ampl_range();
    let span = ampl_max - ampl_min;
    let norm = if span > 0.0 {
        ((ampl_dbm - ampl_min) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let asf = (norm * ((1 << 14) - 1) as f64).round() as u64;

    let phase_wrapped = phase_deg.rem_euclid(360.0);
    let pow = ((phase_wrapped / 360.0) * (1 << 16) as f64).round() as u64 & 0xFFFF;

    (ftw << 32) | (asf << 16) | pow
}
