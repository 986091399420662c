//! The mutable [`Sequence`] under construction for one experiment run.
//!
//! A sequence accumulates TTL pulses and DDS events in insertion order and
//! tracks the total time extent implied by what has been added. Validation
//! lives in the builder ([`BasePulser`]); the sequence itself only stores
//! events and derives the two read-back views:
//!
//! - the human representation, which keeps insertion order and is translated
//!   back to channel names by the builder, and
//! - the hardware-programmable TTL representation, a switching-time table of
//!   `(clock tick, line state word)` rows sorted by time.
//!
//! One sequence is owned exclusively by one session context; once handed to
//! the hardware it is moved into the builder's programmed slot and never
//! mutated again.
//!
//! [`BasePulser`]: crate::pulser::BasePulser

use ndarray::Array2;

use crate::event::{DdsEvent, Edge, TtlPulse};

/// Number of TTL lines in one state word of the programmable table.
pub const TTL_LINE_COUNT: u32 = 32;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    time_resolution: f64,
    length: f64,
    ttl: Vec<TtlPulse>,
    dds: Vec<DdsEvent>,
}

impl Sequence {
    pub fn new(time_resolution: f64) -> Self {
        Self {
            time_resolution,
            length: 0.0,
            ttl: Vec::new(),
            dds: Vec::new(),
        }
    }

    /// Total time extent in seconds: the span implied by pulses added so
    /// far, or a larger value set through [`Sequence::extend_length`].
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn time_resolution(&self) -> f64 {
        self.time_resolution
    }

    pub fn ttl_pulses(&self) -> &[TtlPulse] {
        &self.ttl
    }

    pub fn dds_events(&self) -> &[DdsEvent] {
        &self.dds
    }

    /// Appends a validated TTL pulse and grows the implied length.
    pub fn add_pulse(&mut self, channel: u32, start: f64, duration: f64) {
        self.length = self.length.max(start + duration);
        self.ttl.push(TtlPulse::new(channel, start, duration));
    }

    /// Appends a validated DDS event and grows the implied length.
    pub fn add_dds(&mut self, event: DdsEvent) {
        self.length = self.length.max(event.time);
        self.dds.push(event);
    }

    /// Extends the total length. The length is never implicitly shrunk:
    /// a value below the current extent is ignored.
    pub fn extend_length(&mut self, new_length: f64) {
        self.length = self.length.max(new_length);
    }

    /// Pairs of `(channel name, start-edge word, stop-edge word)` in
    /// insertion order. Start and stop edges are emitted together by the
    /// builder, so they sit adjacent in the event list.
    pub fn dds_pairs(&self) -> Vec<(String, u64, u64)> {
        let mut pairs = Vec::with_capacity(self.dds.len() / 2);
        let mut iter = self.dds.iter();
        while let Some(start) = iter.next() {
            debug_assert_eq!(start.edge, Edge::Start);
            if let Some(stop) = iter.next() {
                debug_assert_eq!(stop.edge, Edge::Stop);
                debug_assert_eq!(stop.name, start.name);
                pairs.push((start.name.clone(), start.word, stop.word));
            }
        }
        pairs
    }

    /// Compiles the TTL pulses into the switching-time table programmed onto
    /// the hardware: one row per distinct switching tick, holding the tick
    /// count and the resulting 32-line state word, sorted by time. A final
    /// row marks the sequence end.
    ///
    /// Overlapping pulses on the same line are merged: the line stays high
    /// until the last overlapping pulse ends.
    pub fn prog_representation(&self) -> Array2<u32> {
        // (tick, line, +1/-1) switch events from every pulse edge
        let mut switches: Vec<(u32, u32, i32)> = Vec::with_capacity(self.ttl.len() * 2);
        for pulse in &self.ttl {
            switches.push((self.ticks(pulse.start), pulse.channel, 1));
            switches.push((self.ticks(pulse.end()), pulse.channel, -1));
        }
        switches.sort_by_key(|&(tick, line, delta)| (tick, line, -delta));

        let mut counts = [0i32; TTL_LINE_COUNT as usize];
        let mut rows: Vec<u32> = Vec::new();
        let mut i = 0;
        while i < switches.len() {
            let tick = switches[i].0;
            while i < switches.len() && switches[i].0 == tick {
                let (_, line, delta) = switches[i];
                counts[line as usize] += delta;
                i += 1;
            }
            let word = counts
                .iter()
                .enumerate()
                .filter(|(_, &c)| c > 0)
                .fold(0u32, |acc, (line, _)| acc | (1 << line));
            rows.extend_from_slice(&[tick, word]);
        }

        let end_tick = self.ticks(self.length);
        if rows.is_empty() || rows[rows.len() - 2] < end_tick {
            rows.extend_from_slice(&[end_tick, 0]);
        }

        let n = rows.len() / 2;
        Array2::from_shape_vec((n, 2), rows)
            .unwrap_or_else(|_| Array2::zeros((0, 2)))
    }

    fn ticks(&self, t: f64) -> u32 {
        (t / self.time_resolution).round() as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::Edge;

    const RES: f64 = 1e-6;

    #[test]
    fn length_follows_pulses_and_never_shrinks() {
        let mut seq = Sequence::new(RES);
        assert_eq!(seq.length(), 0.0);
        seq.add_pulse(0, 2.0, 0.5);
        assert_eq!(seq.length(), 2.5);
        seq.extend_length(1.0); // below the implied extent, ignored
        assert_eq!(seq.length(), 2.5);
        seq.extend_length(5.0);
        assert_eq!(seq.length(), 5.0);
    }

    #[test]
    fn pulses_keep_insertion_order() {
        let mut seq = Sequence::new(RES);
        seq.add_pulse(1, 3.0, 0.5);
        seq.add_pulse(0, 1.0, 0.5);
        let starts: Vec<f64> = seq.ttl_pulses().iter().map(|p| p.start).collect();
        assert_eq!(starts, vec![3.0, 1.0]);
    }

    #[test]
    fn switching_table_is_time_sorted() {
        let mut seq = Sequence::new(RES);
        seq.add_pulse(1, 3.0, 1.0);
        seq.add_pulse(0, 1.0, 1.0);
        let table = seq.prog_representation();
        // rows: raise line0 @1s, drop @2s, raise line1 @3s, drop @4s
        assert_eq!(table.shape(), &[4, 2]);
        assert_eq!(table.row(0).to_vec(), vec![1_000_000, 0b01]);
        assert_eq!(table.row(1).to_vec(), vec![2_000_000, 0b00]);
        assert_eq!(table.row(2).to_vec(), vec![3_000_000, 0b10]);
        assert_eq!(table.row(3).to_vec(), vec![4_000_000, 0b00]);
    }

    #[test]
    /// Two overlapping pulses on the same line hold it high until the later
    /// end; simultaneous edges on different lines collapse into one row.
    fn switching_table_merges_overlaps() {
        let mut seq = Sequence::new(RES);
        seq.add_pulse(0, 1.0, 2.0);
        seq.add_pulse(0, 2.0, 2.0);
        seq.add_pulse(1, 1.0, 1.0);
        let table = seq.prog_representation();
        assert_eq!(table.row(0).to_vec(), vec![1_000_000, 0b11]);
        assert_eq!(table.row(1).to_vec(), vec![2_000_000, 0b01]); // line1 drops, line0 held
        assert_eq!(table.row(2).to_vec(), vec![3_000_000, 0b01]); // first pulse ends, overlap holds
        assert_eq!(table.row(3).to_vec(), vec![4_000_000, 0b00]);
    }

    #[test]
    fn extended_length_adds_terminal_row() {
        let mut seq = Sequence::new(RES);
        seq.add_pulse(0, 1.0, 1.0);
        seq.extend_length(10.0);
        let table = seq.prog_representation();
        let last = table.row(table.nrows() - 1).to_vec();
        assert_eq!(last, vec![10_000_000, 0]);
    }

    #[test]
    fn empty_sequence_compiles_to_single_end_row() {
        let seq = Sequence::new(RES);
        let table = seq.prog_representation();
        assert_eq!(table.shape(), &[1, 2]);
        assert_eq!(table.row(0).to_vec(), vec![0, 0]);
    }

    #[test]
    fn dds_pairs_follow_insertion_order() {
        let mut seq = Sequence::new(RES);
        seq.add_dds(DdsEvent::new("dds1", 1.0, 0xAA, Edge::Start));
        seq.add_dds(DdsEvent::new("dds1", 2.0, 0xAB, Edge::Stop));
        seq.add_dds(DdsEvent::new("dds0", 0.5, 0xBA, Edge::Start));
        seq.add_dds(DdsEvent::new("dds0", 0.7, 0xBB, Edge::Stop));
        assert_eq!(
            seq.dds_pairs(),
            vec![
                ("dds1".to_string(), 0xAA, 0xAB),
                ("dds0".to_string(), 0xBA, 0xBB)
            ]
        );
    }
}
