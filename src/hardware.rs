//! Seams to the external collaborators of the builder: the hardware
//! programming API and the publish/subscribe notification bus.
//!
//! The builder never talks to hardware directly. Everything that leaves the
//! process goes through [`HardwareApi`], a one-shot, non-cancelable handoff:
//! once [`HardwareApi::program_ttl`] and [`HardwareApi::program_dds`] accept
//! the event lists the sequence is frozen. [`SequenceNotifier`] replaces the
//! original server's shared listeners set: the builder publishes the
//! "sequence programmed" transition to whoever subscribed, instead of
//! reaching into other sessions' state.

use log::debug;
use ndarray::Array2;

use crate::event::DdsEvent;

/// The hardware programming interface the builder hands finished sequences
/// to. Implementations wrap the actual device driver; the crate itself only
/// ships [`LoggingApi`].
pub trait HardwareApi {
    /// Drives a manual TTL line to the given level.
    fn set_manual(&self, channel: u32, state: bool);
    /// Puts a TTL line under sequence control, with optional inversion.
    fn set_auto(&self, channel: u32, inversion: bool);
    /// One-time DDS subsystem bring-up, before any channel is programmed.
    fn initialize_dds(&self);
    /// Loads a channel's standing parameter word outside any sequence.
    fn set_dds_parameters(&self, channel: u32, word: u64);
    /// Programs the compiled TTL switching-time table.
    fn program_ttl(&self, table: &Array2<u32>);
    /// Programs the DDS event list.
    fn program_dds(&self, events: &[DdsEvent]);
}

/// Observer of builder state transitions.
pub trait SequenceNotifier {
    /// A session's sequence was accepted by the hardware.
    fn sequence_programmed(&self, context: usize);
}

/// No-op [`HardwareApi`] that logs every call. Stands in for the driver in
/// the demo binary and in tests.
#[derive(Default)]
pub struct LoggingApi;

impl HardwareApi for LoggingApi {
    fn set_manual(&self, channel: u32, state: bool) {
        debug!("set_manual: ch{} -> {}", channel, state);
    }
    fn set_auto(&self, channel: u32, inversion: bool) {
        debug!("set_auto: ch{} inversion={}", channel, inversion);
    }
    fn initialize_dds(&self) {
        debug!("initialize_dds");
    }
    fn set_dds_parameters(&self, channel: u32, word: u64) {
        debug!("set_dds_parameters: ch{} word={:#018x}", channel, word);
    }
    fn program_ttl(&self, table: &Array2<u32>) {
        debug!("program_ttl: {} switching rows", table.nrows());
    }
    fn program_dds(&self, events: &[DdsEvent]) {
        debug!("program_dds: {} events", events.len());
    }
}
