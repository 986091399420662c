//! The pulser module provides the highest level of abstraction for the
//! sequence builder, and the single place by which methods are exposed to
//! python.
//!
//! ## Overview
//!
//! At the heart of this module lies the [`Pulser`] struct: the channel
//! registries, the per-session sequences under construction, and the snapshot
//! of the last sequence handed to the hardware. Its behavior is primarily
//! defined by the [`BasePulser`] trait, which prescribes every operation the
//! RPC layer exposes.
//!
//! The module is organized into the following primary components:
//!
//! 1. **Pulser struct**: the top-level object the Python server holds one
//!    instance of. It owns the TTL/DDS registries and one [`Sequence`] per
//!    caller context.
//! 2. **Traits**: the pivotal [`BasePulser`] trait, implementing all
//!    operations as default methods over field accessors.
//! 3. **Macro**: [`impl_pulser_boilerplate!`] generates the bridge between
//!    Rust's trait system and Python's class system, wrapping each trait
//!    method for export and converting [`PulserError`] into Python
//!    exceptions.
//!
//! ## Sessions
//!
//! Every mutating or reading operation takes an integer `context` id supplied
//! by the RPC layer. Each context owns at most one working [`Sequence`];
//! contexts never share sequences, so no locking is needed on the data
//! itself. Programming is a one-shot handoff: the working sequence moves into
//! the programmed slot, is frozen there for read-back, and a fresh sequence
//! must be created for the next run.

use indexmap::IndexMap;
use log::{debug, info};
use ndarray::Array2;
use pyo3::prelude::*;

use crate::channel::*;
use crate::errors::{PulserError, Result};
use crate::event::*;
use crate::hardware::*;
use crate::sequence::{Sequence, TTL_LINE_COUNT};

/// Defines the behavior of the [`Pulser`] struct through default trait
/// implementations.
///
/// Method categories:
/// 1. Registration: [`add_ttl_channel`], [`add_dds_channel`]
/// 2. Sequence editing: [`new_sequence`], [`add_ttl_pulse`],
///    [`add_ttl_pulses`], [`add_dds_pulses`], [`extend_sequence_length`]
/// 3. Programming and read-back: [`program_sequence`],
///    [`human_readable_ttl`], [`human_readable_dds`], [`ttl_program`]
/// 4. Registry queries: [`get_channels`], [`get_state`],
///    [`get_dds_channels`], [`get_dds_amplitude_range`],
///    [`get_dds_frequency_range`], [`get_line_trigger_limits`]
///
/// [`add_ttl_channel`]: BasePulser::add_ttl_channel
/// [`add_dds_channel`]: BasePulser::add_dds_channel
/// [`new_sequence`]: BasePulser::new_sequence
/// [`add_ttl_pulse`]: BasePulser::add_ttl_pulse
/// [`add_ttl_pulses`]: BasePulser::add_ttl_pulses
/// [`add_dds_pulses`]: BasePulser::add_dds_pulses
/// [`extend_sequence_length`]: BasePulser::extend_sequence_length
/// [`program_sequence`]: BasePulser::program_sequence
/// [`human_readable_ttl`]: BasePulser::human_readable_ttl
/// [`human_readable_dds`]: BasePulser::human_readable_dds
/// [`ttl_program`]: BasePulser::ttl_program
/// [`get_channels`]: BasePulser::get_channels
/// [`get_state`]: BasePulser::get_state
/// [`get_dds_channels`]: BasePulser::get_dds_channels
/// [`get_dds_amplitude_range`]: BasePulser::get_dds_amplitude_range
/// [`get_dds_frequency_range`]: BasePulser::get_dds_frequency_range
/// [`get_line_trigger_limits`]: BasePulser::get_line_trigger_limits
pub trait BasePulser {
    // FIELD methods
    fn ttl_channels(&self) -> &IndexMap<String, TtlChannel>;
    fn ttl_channels_(&mut self) -> &mut IndexMap<String, TtlChannel>;
    fn dds_channels(&self) -> &IndexMap<String, DdsChannel>;
    fn dds_channels_(&mut self) -> &mut IndexMap<String, DdsChannel>;
    fn sequences(&self) -> &IndexMap<usize, Sequence>;
    fn sequences_(&mut self) -> &mut IndexMap<usize, Sequence>;
    fn programmed_sequence(&self) -> Option<&Sequence>;
    fn programmed_sequence_(&mut self) -> &mut Option<Sequence>;
    fn time_resolution(&self) -> f64;
    fn sequence_time_range(&self) -> (f64, f64);
    fn line_trigger_limits(&self) -> (f64, f64);
    fn api(&self) -> &dyn HardwareApi;
    fn notifiers(&self) -> &[Box<dyn SequenceNotifier + Send>];

    /// Shortcut to borrow a DDS channel by name.
    fn dds_chan(&self, name: &str) -> Result<&DdsChannel> {
        self.dds_channels()
            .get(name)
            .ok_or_else(|| PulserError::UnknownChannel(name.to_string()))
    }

    /// Checks that `t` lies inside the sequence window, inclusive on both
    /// ends (the TTL rule).
    fn check_window_inclusive(&self, target: &str, t: f64) -> Result<()> {
        let (min, max) = self.sequence_time_range();
        if !(min <= t && t <= max) {
            return Err(PulserError::TimeOutOfRange {
                target: target.to_string(),
                time: t,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Checks that `t` lies inside the sequence window with a strict lower
    /// bound (the DDS rule): a value exactly at the window floor would
    /// overwrite the hardware's reset slot at position zero and change the
    /// output before the sequence is launched.
    fn check_window_strict(&self, target: &str, t: f64) -> Result<()> {
        let (min, max) = self.sequence_time_range();
        if !(min < t && t <= max) {
            return Err(PulserError::TimeOutOfRange {
                target: target.to_string(),
                time: t,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Registers a TTL line and applies its initial switch state through the
    /// hardware API: manual lines are driven to `manual_inversion XOR
    /// manual_state`, automatic lines follow the sequence with the given
    /// inversion.
    fn add_ttl_channel(
        &mut self,
        name: &str,
        channel_number: u32,
        is_manual: bool,
        manual_state: bool,
        manual_inversion: bool,
        auto_inversion: bool,
    ) -> Result<()> {
        if self.ttl_channels().contains_key(name) {
            return Err(PulserError::DuplicateChannel(name.to_string()));
        }
        if channel_number >= TTL_LINE_COUNT {
            return Err(PulserError::InvalidChannelNumber {
                channel: name.to_string(),
                number: channel_number,
            });
        }
        let chan = TtlChannel::new(
            channel_number,
            is_manual,
            manual_state,
            manual_inversion,
            auto_inversion,
        );
        if chan.is_manual() {
            self.api()
                .set_manual(channel_number, chan.initial_manual_state());
        } else {
            self.api().set_auto(channel_number, chan.auto_inversion());
        }
        info!("registered TTL channel {} at line {}", name, channel_number);
        self.ttl_channels_().insert(name.to_string(), chan);
        Ok(())
    }

    /// Registers a DDS channel. The channel's default frequency and
    /// amplitude are range-checked, the DDS subsystem is brought up on first
    /// registration, and the channel's standing output word is loaded.
    fn add_dds_channel(&mut self, chan: DdsChannel) -> Result<()> {
        if self.dds_channels().contains_key(chan.name()) {
            return Err(PulserError::DuplicateChannel(chan.name().to_string()));
        }
        chan.check_frequency(chan.frequency())?;
        chan.check_amplitude(chan.amplitude())?;
        if self.dds_channels().is_empty() {
            self.api().initialize_dds();
        }
        let word = DdsOutput::from_channel_state(&chan).encode(&chan);
        self.api().set_dds_parameters(chan.channel_number(), word);
        info!(
            "registered DDS channel {} at address {}",
            chan.name(),
            chan.channel_number()
        );
        self.dds_channels_().insert(chan.name().to_string(), chan);
        Ok(())
    }

    /// Creates a fresh empty sequence for the given context, replacing any
    /// sequence that context was building.
    fn new_sequence(&mut self, context: usize) {
        let seq = Sequence::new(self.time_resolution());
        self.sequences_().insert(context, seq);
    }

    /// Drops the given context's working sequence, if any. The programmed
    /// snapshot is unaffected.
    fn expire_context(&mut self, context: usize) {
        self.sequences_().shift_remove(&context);
    }

    /// Adds a TTL pulse to the context's sequence, times in seconds.
    ///
    /// Both `start` and `start + duration` must lie in the sequence window
    /// (inclusive), and `duration` must be at least the time resolution.
    /// Zero-duration TTL pulses are rejected, not silently dropped.
    fn add_ttl_pulse(
        &mut self,
        context: usize,
        channel: &str,
        start: f64,
        duration: f64,
    ) -> Result<()> {
        let address = self
            .ttl_channels()
            .get(channel)
            .ok_or_else(|| PulserError::UnknownChannel(channel.to_string()))?
            .channel_number();
        self.check_window_inclusive(channel, start)?;
        self.check_window_inclusive(channel, start + duration)?;
        if duration < self.time_resolution() {
            return Err(PulserError::InvalidDuration {
                channel: channel.to_string(),
                duration,
                resolution: self.time_resolution(),
            });
        }
        let seq = self
            .sequences_()
            .get_mut(&context)
            .ok_or(PulserError::SequenceNotInitialized)?;
        seq.add_pulse(address, start, duration);
        Ok(())
    }

    /// Applies [`BasePulser::add_ttl_pulse`] to each entry in order.
    ///
    /// The first failure aborts the remaining entries; pulses already applied
    /// are not rolled back. Callers needing atomicity should validate before
    /// submitting, or discard the sequence and rebuild on any failure.
    fn add_ttl_pulses(&mut self, context: usize, pulses: &[(String, f64, f64)]) -> Result<()> {
        for (channel, start, duration) in pulses {
            self.add_ttl_pulse(context, channel, *start, *duration)?;
        }
        Ok(())
    }

    /// Extends the total sequence length beyond the last pulse. The new
    /// length must lie in the sequence window; the length never shrinks.
    fn extend_sequence_length(&mut self, context: usize, length: f64) -> Result<()> {
        self.check_window_inclusive("sequence length", length)?;
        let seq = self
            .sequences_()
            .get_mut(&context)
            .ok_or(PulserError::SequenceNotInitialized)?;
        seq.extend_length(length);
        Ok(())
    }

    /// Adds DDS pulses to the context's sequence.
    ///
    /// Each request is resolved to its effective output once: a pulse with
    /// zero frequency or zero amplitude is "off", takes the channel's
    /// canonical off parameters and skips range checks; otherwise frequency
    /// and amplitude must lie in the channel's allowed ranges. The time
    /// window uses a strict lower bound (see
    /// [`BasePulser::check_window_strict`]). A zero-duration pulse emits no
    /// events and is not an error.
    ///
    /// Entries are applied in order; the first failure aborts the rest
    /// without rolling back events already added.
    fn add_dds_pulses(&mut self, context: usize, values: &[DdsPulseRequest]) -> Result<()> {
        if !self.sequences().contains_key(&context) {
            return Err(PulserError::SequenceNotInitialized);
        }
        for value in values {
            let chan = self.dds_chan(&value.name)?;
            let output = DdsOutput::from_request(
                value.frequency,
                value.amplitude,
                value.phase,
                value.ramp_rate,
                value.amp_ramp_rate,
            );
            output.check_ranges(chan)?;
            let word_on = output.encode(chan);
            let word_off = output.encode_stop(chan);
            self.check_window_strict(&value.name, value.start)?;
            self.check_window_strict(&value.name, value.start + value.duration)?;
            if value.duration == 0.0 {
                // 0-length pulses are ignored
                debug!("ignoring zero-duration DDS pulse on {}", value.name);
                continue;
            }
            let name = value.name.clone();
            let seq = self
                .sequences_()
                .get_mut(&context)
                .ok_or(PulserError::SequenceNotInitialized)?;
            seq.add_dds(DdsEvent::new(&name, value.start, word_on, Edge::Start));
            seq.add_dds(DdsEvent::new(
                &name,
                value.start + value.duration,
                word_off,
                Edge::Stop,
            ));
        }
        Ok(())
    }

    /// Hands the context's finished sequence to the hardware.
    ///
    /// The working sequence is consumed: it moves into the programmed slot,
    /// stays there verbatim for read-back, and the context must create a new
    /// sequence for its next run. Subscribed notifiers are told about the
    /// transition.
    fn program_sequence(&mut self, context: usize) -> Result<()> {
        let seq = self
            .sequences_()
            .shift_remove(&context)
            .ok_or(PulserError::SequenceNotInitialized)?;
        let table = seq.prog_representation();
        self.api().program_ttl(&table);
        self.api().program_dds(seq.dds_events());
        info!(
            "programmed sequence for context {}: {} TTL pulses, {} DDS events, {} s",
            context,
            seq.ttl_pulses().len(),
            seq.dds_events().len(),
            seq.length()
        );
        *self.programmed_sequence_() = Some(seq);
        for notifier in self.notifiers() {
            notifier.sequence_programmed(context);
        }
        Ok(())
    }

    /// Selects the sequence a read-back call refers to: the context's
    /// working sequence, or the last programmed one.
    fn readback(&self, context: usize, get_programmed: bool) -> Result<&Sequence> {
        if get_programmed {
            self.programmed_sequence()
                .ok_or(PulserError::SequenceNotInitialized)
        } else {
            self.sequences()
                .get(&context)
                .ok_or(PulserError::SequenceNotInitialized)
        }
    }

    /// Read-back of the TTL pulse list as `(channel name, start, duration)`
    /// tuples, in insertion order, with hardware addresses mapped back to
    /// registry names.
    fn human_readable_ttl(
        &self,
        context: usize,
        get_programmed: bool,
    ) -> Result<Vec<(String, f64, f64)>> {
        let seq = self.readback(context, get_programmed)?;
        Ok(seq
            .ttl_pulses()
            .iter()
            .map(|pulse| {
                let name = self
                    .ttl_channels()
                    .iter()
                    .find(|(_, chan)| chan.channel_number() == pulse.channel)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_else(|| format!("line{}", pulse.channel));
                (name, pulse.start, pulse.duration)
            })
            .collect())
    }

    /// Read-back of the DDS event list as
    /// `(channel name, start-edge word, stop-edge word)` tuples, in
    /// insertion order.
    fn human_readable_dds(
        &self,
        context: usize,
        get_programmed: bool,
    ) -> Result<Vec<(String, u64, u64)>> {
        Ok(self.readback(context, get_programmed)?.dds_pairs())
    }

    /// The hardware-programmable switching-time table, for inspection.
    fn ttl_program(&self, context: usize, get_programmed: bool) -> Result<Array2<u32>> {
        Ok(self.readback(context, get_programmed)?.prog_representation())
    }

    /// All registered TTL channels and their hardware line numbers.
    fn get_channels(&self) -> Vec<(String, u32)> {
        self.ttl_channels()
            .iter()
            .map(|(name, chan)| (name.clone(), chan.channel_number()))
            .collect()
    }

    /// Current switch state of a TTL line:
    /// `(is_manual, manual_state, manual_inversion, auto_inversion)`.
    fn get_state(&self, channel: &str) -> Result<(bool, bool, bool, bool)> {
        self.ttl_channels()
            .get(channel)
            .map(|chan| chan.state())
            .ok_or_else(|| PulserError::UnknownChannel(channel.to_string()))
    }

    /// Names of all registered DDS channels.
    fn get_dds_channels(&self) -> Vec<String> {
        self.dds_channels().keys().cloned().collect()
    }

    /// Allowed amplitude interval of a DDS channel, dBm.
    fn get_dds_amplitude_range(&self, name: &str) -> Result<(f64, f64)> {
        Ok(self.dds_chan(name)?.allowed_ampl_range())
    }

    /// Allowed frequency interval of a DDS channel, MHz.
    fn get_dds_frequency_range(&self, name: &str) -> Result<(f64, f64)> {
        Ok(self.dds_chan(name)?.allowed_freq_range())
    }

    /// Limits for the duration of line triggering, microseconds.
    fn get_line_trigger_limits(&self) -> (f64, f64) {
        self.line_trigger_limits()
    }
}

/// A concrete struct holding the registries, per-context sequences and the
/// programmed snapshot.
///
/// **Refer to the [`BasePulser`] trait for method behavior.**
#[pyclass]
pub struct Pulser {
    ttl_channels: IndexMap<String, TtlChannel>,
    dds_channels: IndexMap<String, DdsChannel>,
    sequences: IndexMap<usize, Sequence>,
    programmed_sequence: Option<Sequence>,
    time_resolution: f64,
    sequence_time_range: (f64, f64),
    line_trigger_limits: (f64, f64),
    api: Box<dyn HardwareApi + Send>,
    notifiers: Vec<Box<dyn SequenceNotifier + Send>>,
}

impl Pulser {
    /// Constructor for embedding with a real hardware driver; the Python
    /// constructor uses [`LoggingApi`].
    pub fn with_api(
        time_resolution: f64,
        sequence_time_range: (f64, f64),
        line_trigger_limits: (f64, f64),
        api: Box<dyn HardwareApi + Send>,
    ) -> Self {
        Self {
            ttl_channels: IndexMap::new(),
            dds_channels: IndexMap::new(),
            sequences: IndexMap::new(),
            programmed_sequence: None,
            time_resolution,
            sequence_time_range,
            line_trigger_limits,
            api,
            notifiers: Vec::new(),
        }
    }

    /// Subscribes an observer to "sequence programmed" transitions.
    pub fn subscribe(&mut self, notifier: Box<dyn SequenceNotifier + Send>) {
        self.notifiers.push(notifier);
    }
}

/// Accepts both tuple forms the RPC layer sends:
/// `(name, start, duration, frequency, amplitude)` or the full
/// `(name, start, duration, frequency, amplitude, phase, ramp_rate,
/// amp_ramp_rate)`.
#[derive(FromPyObject)]
pub enum DdsPulseArgs {
    Full((String, f64, f64, f64, f64, f64, f64, f64)),
    Short((String, f64, f64, f64, f64)),
}

impl From<DdsPulseArgs> for DdsPulseRequest {
    fn from(args: DdsPulseArgs) -> Self {
        match args {
            DdsPulseArgs::Full((
                name,
                start,
                duration,
                frequency,
                amplitude,
                phase,
                ramp_rate,
                amp_ramp_rate,
            )) => DdsPulseRequest {
                name,
                start,
                duration,
                frequency,
                amplitude,
                phase,
                ramp_rate,
                amp_ramp_rate,
            },
            DdsPulseArgs::Short((name, start, duration, frequency, amplitude)) => {
                DdsPulseRequest {
                    name,
                    start,
                    duration,
                    frequency,
                    amplitude,
                    phase: 0.0,
                    ramp_rate: 0.0,
                    amp_ramp_rate: 0.0,
                }
            }
        }
    }
}

/// A macro to generate boilerplate implementations for structs representing
/// a pulser.
///
/// PyO3 does not export trait methods directly, so this macro wraps each
/// [`BasePulser`] trait method with a direct implementation for the Python
/// class, converting [`PulserError`] into the corresponding Python exception
/// and the programmable table into a NumPy array.
///
/// Usage mirrors the upstream compiler backends: apply it to any struct with
/// the standard field set to obtain the full Python surface, then add extra
/// `#[pymethods]` blocks of your own.
#[macro_export]
macro_rules! impl_pulser_boilerplate {
    ($pulser_type: ty) => {
        impl $crate::pulser::BasePulser for $pulser_type {
            fn ttl_channels(
                &self,
            ) -> &indexmap::IndexMap<String, $crate::channel::TtlChannel> {
                &self.ttl_channels
            }
            fn ttl_channels_(
                &mut self,
            ) -> &mut indexmap::IndexMap<String, $crate::channel::TtlChannel> {
                &mut self.ttl_channels
            }
            fn dds_channels(
                &self,
            ) -> &indexmap::IndexMap<String, $crate::channel::DdsChannel> {
                &self.dds_channels
            }
            fn dds_channels_(
                &mut self,
            ) -> &mut indexmap::IndexMap<String, $crate::channel::DdsChannel> {
                &mut self.dds_channels
            }
            fn sequences(&self) -> &indexmap::IndexMap<usize, $crate::sequence::Sequence> {
                &self.sequences
            }
            fn sequences_(
                &mut self,
            ) -> &mut indexmap::IndexMap<usize, $crate::sequence::Sequence> {
                &mut self.sequences
            }
            fn programmed_sequence(&self) -> Option<&$crate::sequence::Sequence> {
                self.programmed_sequence.as_ref()
            }
            fn programmed_sequence_(&mut self) -> &mut Option<$crate::sequence::Sequence> {
                &mut self.programmed_sequence
            }
            fn time_resolution(&self) -> f64 {
                self.time_resolution
            }
            fn sequence_time_range(&self) -> (f64, f64) {
                self.sequence_time_range
            }
            fn line_trigger_limits(&self) -> (f64, f64) {
                self.line_trigger_limits
            }
            fn api(&self) -> &dyn $crate::hardware::HardwareApi {
                self.api.as_ref()
            }
            fn notifiers(&self) -> &[Box<dyn $crate::hardware::SequenceNotifier + Send>] {
                &self.notifiers
            }
        }

        #[pymethods]
        impl $pulser_type {
            // REGISTRATION METHODS
            pub fn add_ttl_channel(
                &mut self,
                name: &str,
                channel_number: u32,
                is_manual: bool,
                manual_state: bool,
                manual_inversion: bool,
                auto_inversion: bool,
            ) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::add_ttl_channel(
                    self,
                    name,
                    channel_number,
                    is_manual,
                    manual_state,
                    manual_inversion,
                    auto_inversion,
                )?)
            }

            #[pyo3(signature = (
                name, channel_number, allowed_freq_range, allowed_ampl_range,
                off_parameters, frequency, amplitude, phase = 0.0, state = false
            ))]
            pub fn add_dds_channel(
                &mut self,
                name: &str,
                channel_number: u32,
                allowed_freq_range: (f64, f64),
                allowed_ampl_range: (f64, f64),
                off_parameters: (f64, f64),
                frequency: f64,
                amplitude: f64,
                phase: f64,
                state: bool,
            ) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::add_dds_channel(
                    self,
                    $crate::channel::DdsChannel::new(
                        name,
                        channel_number,
                        allowed_freq_range,
                        allowed_ampl_range,
                        off_parameters,
                        frequency,
                        amplitude,
                        phase,
                        state,
                    ),
                )?)
            }

            // SEQUENCE METHODS
            pub fn new_sequence(&mut self, context: usize) {
                $crate::pulser::BasePulser::new_sequence(self, context)
            }

            pub fn expire_context(&mut self, context: usize) {
                $crate::pulser::BasePulser::expire_context(self, context)
            }

            pub fn add_ttl_pulse(
                &mut self,
                context: usize,
                channel: &str,
                start: f64,
                duration: f64,
            ) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::add_ttl_pulse(
                    self, context, channel, start, duration,
                )?)
            }

            pub fn add_ttl_pulses(
                &mut self,
                context: usize,
                pulses: Vec<(String, f64, f64)>,
            ) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::add_ttl_pulses(
                    self, context, &pulses,
                )?)
            }

            pub fn extend_sequence_length(
                &mut self,
                context: usize,
                length: f64,
            ) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::extend_sequence_length(
                    self, context, length,
                )?)
            }

            pub fn add_dds_pulses(
                &mut self,
                context: usize,
                values: Vec<$crate::pulser::DdsPulseArgs>,
            ) -> PyResult<()> {
                let values: Vec<$crate::event::DdsPulseRequest> =
                    values.into_iter().map(Into::into).collect();
                Ok($crate::pulser::BasePulser::add_dds_pulses(
                    self, context, &values,
                )?)
            }

            pub fn program_sequence(&mut self, context: usize) -> PyResult<()> {
                Ok($crate::pulser::BasePulser::program_sequence(self, context)?)
            }

            // READ-BACK METHODS
            #[pyo3(signature = (context, get_programmed = false))]
            pub fn human_readable_ttl(
                &self,
                context: usize,
                get_programmed: bool,
            ) -> PyResult<Vec<(String, f64, f64)>> {
                Ok($crate::pulser::BasePulser::human_readable_ttl(
                    self,
                    context,
                    get_programmed,
                )?)
            }

            #[pyo3(signature = (context, get_programmed = false))]
            pub fn human_readable_dds(
                &self,
                context: usize,
                get_programmed: bool,
            ) -> PyResult<Vec<(String, u64, u64)>> {
                Ok($crate::pulser::BasePulser::human_readable_dds(
                    self,
                    context,
                    get_programmed,
                )?)
            }

            #[pyo3(signature = (context, get_programmed = false))]
            pub fn ttl_program(
                &self,
                context: usize,
                get_programmed: bool,
                py: Python,
            ) -> PyResult<PyObject> {
                let table =
                    $crate::pulser::BasePulser::ttl_program(self, context, get_programmed)?;
                Ok(::numpy::PyArray::from_array(py, &table).to_object(py))
            }

            // REGISTRY METHODS
            pub fn get_channels(&self) -> Vec<(String, u32)> {
                $crate::pulser::BasePulser::get_channels(self)
            }

            pub fn get_state(&self, channel: &str) -> PyResult<(bool, bool, bool, bool)> {
                Ok($crate::pulser::BasePulser::get_state(self, channel)?)
            }

            pub fn get_dds_channels(&self) -> Vec<String> {
                $crate::pulser::BasePulser::get_dds_channels(self)
            }

            pub fn get_dds_amplitude_range(&self, name: &str) -> PyResult<(f64, f64)> {
                Ok($crate::pulser::BasePulser::get_dds_amplitude_range(
                    self, name,
                )?)
            }

            pub fn get_dds_frequency_range(&self, name: &str) -> PyResult<(f64, f64)> {
                Ok($crate::pulser::BasePulser::get_dds_frequency_range(
                    self, name,
                )?)
            }

            pub fn get_line_trigger_limits(&self) -> (f64, f64) {
                $crate::pulser::BasePulser::get_line_trigger_limits(self)
            }
        }
    };
}

#[pymethods]
impl Pulser {
    /// Constructor for the `Pulser` class.
    ///
    /// `time_resolution` is the minimum TTL pulse duration in seconds;
    /// `window_min`/`window_max` bound every event time in the sequence;
    /// `line_trigger_limits` is the legal line-trigger duration interval in
    /// microseconds. The Python-constructed pulser talks to a logging no-op
    /// hardware API; embedders with a real driver use [`Pulser::with_api`].
    ///
    /// # Example (python)
    /// ```python
    /// from pulser_backend import Pulser
    ///
    /// pulser = Pulser(1e-6, 0.0, 85.0)
    /// assert len(pulser.get_channels()) == 0
    /// ```
    #[new]
    #[pyo3(signature = (time_resolution, window_min, window_max, line_trigger_limits = (0.0, 1000.0)))]
    pub fn new(
        time_resolution: f64,
        window_min: f64,
        window_max: f64,
        line_trigger_limits: (f64, f64),
    ) -> Self {
        Self::with_api(
            time_resolution,
            (window_min, window_max),
            line_trigger_limits,
            Box::new(LoggingApi),
        )
    }
}

impl_pulser_boilerplate!(Pulser);
