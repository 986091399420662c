//! Example behavior of the sequence builder, mirroring one experiment run of
//! the RPC server: register channels, build a sequence, program it, and print
//! both read-back views.

use pulser_backend::channel::DdsChannel;
use pulser_backend::errors::Result;
use pulser_backend::pulser::{BasePulser, Pulser};

fn main() -> Result<()> {
    // 1 µs resolution, sequence window [0, 85] s
    let mut pulser = Pulser::new(1e-6, 0.0, 85.0, (0.0, 1000.0));

    for (name, line) in [("866DP", 0u32), ("crystallization", 1), ("camera", 4)] {
        BasePulser::add_ttl_channel(&mut pulser, name, line, false, false, false, false)?;
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
    )?;

    let ctx = 0;
    pulser.new_sequence(ctx);
    BasePulser::add_ttl_pulses(
        &mut pulser,
        ctx,
        &[
            ("866DP".to_string(), 0.5, 2.0),
            ("camera".to_string(), 1.0, 0.01),
        ],
    )?;
    BasePulser::add_dds_pulses(
        &mut pulser,
        ctx,
        &[pulser_backend::event::DdsPulseRequest {
            name: "729DP".to_string(),
            start: 1.0,
            duration: 0.2,
            frequency: 220.0,
            amplitude: -33.0,
            phase: 0.0,
            ramp_rate: 0.0,
            amp_ramp_rate: 0.0,
        }],
    )?;
    BasePulser::extend_sequence_length(&mut pulser, ctx, 5.0)?;

    println!("TTL switching table:");
    println!("{}", BasePulser::ttl_program(&pulser, ctx, false)?);

    BasePulser::program_sequence(&mut pulser, ctx)?;

    println!("programmed TTL pulses:");
    for (name, start, duration) in BasePulser::human_readable_ttl(&pulser, ctx, true)? {
        println!("  {}: {} s for {} s", name, start, duration);
    }
    println!("programmed DDS pulses:");
    for (name, start_word, stop_word) in BasePulser::human_readable_dds(&pulser, ctx, true)? {
        println!("  {}: {:#018x} -> {:#018x}", name, start_word, stop_word);
    }
    Ok(())
}
