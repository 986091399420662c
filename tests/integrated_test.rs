//! End-to-end exercise of the builder through the same call order the RPC
//! server uses: registration, sequence construction, programming, and
//! read-back of the frozen snapshot while a new sequence is being built.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use maplit::hashmap;
use pulser_backend::channel::DdsChannel;
use pulser_backend::event::{encode_settings, DdsPulseRequest};
use pulser_backend::hardware::SequenceNotifier;
use pulser_backend::pulser::{BasePulser, Pulser};
use pulser_backend::PulserError;

struct CountingNotifier(Arc<AtomicUsize>);
impl SequenceNotifier for CountingNotifier {
    fn sequence_programmed(&self, _context: usize) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn installation() -> Pulser {
    // 1 µs resolution, window [0, 85] s, as a typical trap installation
    let mut pulser = Pulser::new(1e-6, 0.0, 85.0, (0.0, 1000.0));
    for (name, line) in hashmap! {
        "866DP" => 0u32,
        "crystallization" => 1u32,
        "camera" => 4u32,
    } {
        BasePulser::add_ttl_channel(&mut pulser, name, line, false, false, false, false).unwrap();
    }
    BasePulser::add_dds_channel(
        &mut pulser,
        DdsChannel::new(
            "729DP",
            0,
            (150.0, 250.0),
            (-63.5, -5.0),
            (220.0, -145.0),
            220.0,
            -33.0,
            0.0,
            false,
        ),
    )
    .unwrap();
    pulser
}

fn dds(start: f64, duration: f64, frequency: f64, amplitude: f64) -> DdsPulseRequest {
    DdsPulseRequest {
        name: "729DP".to_string(),
        start,
        duration,
        frequency,
        amplitude,
        phase: 0.0,
        ramp_rate: 0.0,
        amp_ramp_rate: 0.0,
    }
}

#[test]
fn full_experiment_run() {
    let programmed_count = Arc::new(AtomicUsize::new(0));
    let mut pulser = installation();
    pulser.subscribe(Box::new(CountingNotifier(programmed_count.clone())));

    let ctx = 7;
    pulser.new_sequence(ctx);

    BasePulser::add_ttl_pulses(
        &mut pulser,
        ctx,
        &[
            ("866DP".to_string(), 0.5, 2.0),
            ("camera".to_string(), 1.0, 0.01),
        ],
    )
    .unwrap();
    BasePulser::add_dds_pulses(
        &mut pulser,
        ctx,
        &[
            dds(1.0, 0.2, 220.0, -33.0),
            dds(2.0, 0.0, 220.0, -33.0), // zero duration, silently skipped
            dds(3.0, 0.1, 0.0, -33.0),   // effectively off
        ],
    )
    .unwrap();
    BasePulser::extend_sequence_length(&mut pulser, ctx, 5.0).unwrap();

    // the working-copy switching table covers every TTL edge plus the
    // extended end marker
    let table = BasePulser::ttl_program(&pulser, ctx, false).unwrap();
    assert_eq!(table.row(0).to_vec(), vec![500_000, 0b00001]);
    assert_eq!(table.row(1).to_vec(), vec![1_000_000, 0b10001]);
    assert_eq!(table.row(2).to_vec(), vec![1_010_000, 0b00001]);
    assert_eq!(table.row(3).to_vec(), vec![2_500_000, 0b00000]);
    assert_eq!(table.row(4).to_vec(), vec![5_000_000, 0b00000]);

    BasePulser::program_sequence(&mut pulser, ctx).unwrap();
    assert_eq!(programmed_count.load(Ordering::SeqCst), 1);

    // programming consumed the working sequence
    assert_eq!(
        BasePulser::human_readable_ttl(&pulser, ctx, false),
        Err(PulserError::SequenceNotInitialized)
    );

    // a second run under construction does not disturb the snapshot
    pulser.new_sequence(ctx);
    BasePulser::add_ttl_pulse(&mut pulser, ctx, "crystallization", 4.0, 1.0).unwrap();

    let snapshot_ttl = BasePulser::human_readable_ttl(&pulser, ctx, true).unwrap();
    assert_eq!(
        snapshot_ttl,
        vec![
            ("866DP".to_string(), 0.5, 2.0),
            ("camera".to_string(), 1.0, 0.01),
        ]
    );

    let chan = BasePulser::dds_chan(&pulser, "729DP").unwrap().clone();
    let on_word = encode_settings(&chan, 220.0, -33.0, 0.0);
    let stop_word = encode_settings(&chan, 220.0, -145.0, 0.0);
    let off_word = encode_settings(&chan, 220.0, -145.0, 0.0);
    let snapshot_dds = BasePulser::human_readable_dds(&pulser, ctx, true).unwrap();
    assert_eq!(
        snapshot_dds,
        vec![
            ("729DP".to_string(), on_word, stop_word),
            ("729DP".to_string(), off_word, off_word),
        ]
    );

    // the programmed table is identical to the one compiled before handoff
    let snapshot_table = BasePulser::ttl_program(&pulser, ctx, true).unwrap();
    assert_eq!(snapshot_table, table);
}

#[test]
fn validation_failures_leave_partial_batches_applied() {
    let mut pulser = installation();
    pulser.new_sequence(0);

    let result = BasePulser::add_ttl_pulses(
        &mut pulser,
        0,
        &[
            ("866DP".to_string(), 1.0, 0.5),
            ("camera".to_string(), 84.8, 0.5), // runs past the window ceiling
            ("866DP".to_string(), 2.0, 0.5),
        ],
    );
    assert!(matches!(result, Err(PulserError::TimeOutOfRange { .. })));
    assert_eq!(
        BasePulser::human_readable_ttl(&pulser, 0, false).unwrap(),
        vec![("866DP".to_string(), 1.0, 0.5)]
    );
}

#[test]
fn registry_queries_reflect_the_installation() {
    let pulser = installation();
    let mut channels = BasePulser::get_channels(&pulser);
    channels.sort();
    assert_eq!(
        channels,
        vec![
            ("866DP".to_string(), 0),
            ("camera".to_string(), 4),
            ("crystallization".to_string(), 1),
        ]
    );
    assert_eq!(
        BasePulser::get_dds_channels(&pulser),
        vec!["729DP".to_string()]
    );
    assert_eq!(
        BasePulser::get_dds_frequency_range(&pulser, "729DP").unwrap(),
        (150.0, 250.0)
    );
    assert_eq!(
        BasePulser::get_dds_amplitude_range(&pulser, "729DP").unwrap(),
        (-63.5, -5.0)
    );
    assert_eq!(
        BasePulser::get_line_trigger_limits(&pulser),
        (0.0, 1000.0)
    );
}
