//! Record a paced driver session and verify its replay.
//!
//! Drives a stepper with fixed frame ticks while recording every command
//! plus a state-hash checkpoint after each one. The log is replayed on a
//! fresh stepper and verified checkpoint by checkpoint; finally one
//! checkpoint is tampered with to show mismatch detection.
//!
//! Run with: `cargo run -p waypath-core --example record_replay`

use waypath_core::engine::{Engine, Phase};
use waypath_core::generator::{GeneratorConfig, generate};
use waypath_core::replay::{CommandLog, DriverCommand, replay_and_verify};
use waypath_core::rng::GenRng;
use waypath_core::stepper::Stepper;

/// Apply a command to the stepper the way a live driver would.
fn apply(stepper: &mut Stepper, cmd: &DriverCommand) {
    match cmd {
        DriverCommand::Initialize { source, target } => {
            stepper.engine_mut().initialize(*source, *target).unwrap();
        }
        DriverCommand::Tick { dt } => {
            stepper.tick(*dt).unwrap();
        }
        DriverCommand::Pause => stepper.pause(),
        DriverCommand::Resume => stepper.resume(),
        DriverCommand::SetSpeed { multiplier } => {
            stepper.set_speed(*multiplier).unwrap();
        }
        DriverCommand::Reset => stepper.reset(),
    }
}

fn main() {
    // --- Step 1: Record a session ---

    let config = GeneratorConfig {
        node_count: 10,
        ..GeneratorConfig::default()
    };
    let mut rng = GenRng::new(7);
    let graph = generate(&config, &mut rng);
    let (source, target) = (graph.source(), graph.target());

    let mut log = CommandLog::new(&graph);
    let mut stepper = Stepper::new(Engine::new(graph));

    let drive = |stepper: &mut Stepper, log: &mut CommandLog, cmd: DriverCommand| {
        apply(stepper, &cmd);
        log.record_with_hash(cmd, stepper.engine().state_hash());
    };

    drive(&mut stepper, &mut log, DriverCommand::Initialize { source, target });
    drive(&mut stepper, &mut log, DriverCommand::SetSpeed { multiplier: 2.0 });

    let mut frame = 0;
    while stepper.engine().phase() == Phase::Running {
        frame += 1;
        if frame == 4 {
            // A mid-run pause, as if the user tabbed away.
            drive(&mut stepper, &mut log, DriverCommand::Pause);
            drive(&mut stepper, &mut log, DriverCommand::Tick { dt: 3.0 });
            drive(&mut stepper, &mut log, DriverCommand::Resume);
        }
        drive(&mut stepper, &mut log, DriverCommand::Tick { dt: 0.2 });
    }

    println!(
        "Recorded {} commands, final phase {:?}, final hash {:#018x}.\n",
        log.command_count(),
        stepper.engine().phase(),
        stepper.engine().state_hash()
    );

    // --- Step 2: Replay and verify ---

    let result = replay_and_verify(&log).unwrap();
    println!(
        "Replay executed {} commands, verified: {}",
        result.commands_executed, result.is_verified
    );
    assert!(result.is_verified, "a faithful log must verify");
    println!("  MATCH: every checkpoint hash agreed.\n");

    // --- Step 3: Tamper with a checkpoint ---

    let victim = log.hash_checkpoints.len() / 2;
    log.hash_checkpoints[victim].1 ^= 0xFFFF;
    println!("Flipped bits in checkpoint {victim}.");

    let result = replay_and_verify(&log).unwrap();
    assert!(!result.is_verified, "tampering must be detected");
    let mismatch = result.first_mismatch.unwrap();
    println!(
        "  DIVERGED at command {}: expected {:#018x}, got {:#018x}.",
        mismatch.command_index, mismatch.expected_hash, mismatch.actual_hash
    );
}
