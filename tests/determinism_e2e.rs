//! End-to-end determinism tests
//!
//! Verifies that battles and simulations with the same seed produce identical
//! results, both through the library and through the `battle-sim` binary.

use card_battle_sim::game::{Battle, BattleOutcome, VerbosityLevel};
use card_battle_sim::{BalanceConfig, Simulation};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use similar_asserts::assert_eq;
use std::process::Command;

/// Run one battle with a captured log and return the log lines and outcome
fn captured_battle(config: &BalanceConfig, seed: u64) -> (Vec<String>, BattleOutcome) {
    let mut battle =
        Battle::new(config, ChaCha12Rng::seed_from_u64(seed)).with_verbosity(VerbosityLevel::Verbose);
    battle.logger.enable_capture();
    let outcome = battle.run();
    (battle.logger.messages(), outcome)
}

/// Helper to run the battle-sim binary and capture stdout
fn run_binary(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_battle-sim"))
        .args(args)
        .output()
        .expect("Failed to run battle-sim binary");

    assert!(output.status.success(), "battle-sim {:?} failed", args);
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in stdout")
}

#[test]
fn test_same_seed_replays_identically() {
    let config = BalanceConfig::default();
    for seed in [0u64, 42, 1234] {
        let (log1, outcome1) = captured_battle(&config, seed);
        let (log2, outcome2) = captured_battle(&config, seed);

        assert_eq!(outcome1, outcome2, "seed {seed}");
        assert_eq!(log1, log2, "seed {seed}");
    }
}

#[cfg(feature = "verbose-logging")]
#[test]
fn test_different_seeds_diverge() {
    let config = BalanceConfig::default();
    let logs: Vec<Vec<String>> = (0..8).map(|seed| captured_battle(&config, seed).0).collect();

    // Eight shuffles of a ten-card deck all coinciding is practically impossible
    assert!(
        logs.iter().any(|log| *log != logs[0]),
        "different seeds produced identical battles"
    );
}

/// Reference trace with a generator that always yields zero
///
/// Every shuffle then rotates the pile left by one and every stun roll
/// succeeds, so the whole battle can be followed by hand:
///
/// 1. A D D for 5 (stun), monster skips its light attack
/// 2. A A B combo for 14, monster heavy attack for 7
/// 3. recycle, A A B combo for 14, monster charges
/// 4. B D D for 5 (stun), monster skips its light attack
/// 5. recycle, A D D for 5, monster dies at -3
#[test]
fn test_reference_trace_with_zero_generator() {
    let mut config = BalanceConfig::default();
    config.monster.health = 40;

    let mut battle = Battle::new(&config, StepRng::new(0, 0));
    let mut damage = Vec::new();
    let mut health = Vec::new();
    while let Some(report) = battle.play_turn() {
        damage.push(report.damage);
        health.push(battle.player().health);
    }

    assert_eq!(damage, vec![5, 14, 14, 5, 5]);
    assert_eq!(health, vec![40, 33, 33, 33, 33]);
    assert_eq!(battle.monster().health, -3);
    assert_eq!(battle.monster().power, 1);
    assert_eq!(
        battle.outcome(),
        Some(BattleOutcome {
            turns_elapsed: 5,
            player_final_health: 33,
            player_won: true,
        })
    );
}

#[test]
fn test_default_balance_reference_outcome() {
    let outcome = Battle::new(&BalanceConfig::default(), StepRng::new(0, 0)).run();
    assert_eq!(
        outcome,
        BattleOutcome {
            turns_elapsed: 2,
            player_final_health: 40,
            player_won: true,
        }
    );
}

/// Recorded outcomes with the production generator
#[test]
fn test_recorded_chacha_outcomes() {
    let outcome = Battle::new(&BalanceConfig::default(), ChaCha12Rng::seed_from_u64(0)).run();
    assert_eq!(
        outcome,
        BattleOutcome {
            turns_elapsed: 2,
            player_final_health: 37,
            player_won: true,
        }
    );

    let mut config = BalanceConfig::default();
    config.monster.health = 60;
    let outcomes: Vec<(u32, i32, bool)> = (0..4)
        .map(|seed| {
            let o = Battle::new(&config, ChaCha12Rng::seed_from_u64(seed)).run();
            (o.turns_elapsed, o.player_final_health, o.player_won)
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![(6, 18, true), (6, 18, true), (6, 26, true), (6, 18, true)]
    );
}

#[test]
fn test_recorded_simulation_aggregates() {
    let stats = Simulation::new(BalanceConfig::default())
        .unwrap()
        .with_seed(42)
        .run_battles(100);
    assert_eq!(stats.total_battles, 100);
    assert_eq!(stats.wins, 100);
    assert_eq!(stats.win_rate, Some(100.0));
    let winning = stats.winning.unwrap();
    assert_eq!((winning.turns.min, winning.turns.max), (1, 2));
    assert!((winning.turns.mean - 1.63).abs() < 1e-9);
    assert_eq!((winning.final_health.min, winning.final_health.max), (37, 40));
    assert!((winning.final_health.mean - 38.5).abs() < 1e-9);

    // Longer battles go through reshuffles and low-health blocking
    let mut config = BalanceConfig::default();
    config.monster.health = 80;
    let stats = Simulation::new(config).unwrap().with_seed(7).run_battles(200);
    assert_eq!(stats.wins, 200);
    let winning = stats.winning.unwrap();
    assert_eq!((winning.turns.min, winning.turns.max), (7, 12));
    assert!((winning.turns.mean - 7.885).abs() < 1e-9);
    assert_eq!((winning.final_health.min, winning.final_health.max), (3, 32));
    assert!((winning.final_health.mean - 16.645).abs() < 1e-9);
}

#[test]
fn test_simulation_is_seed_deterministic() {
    let sim = Simulation::new(BalanceConfig::default()).unwrap().with_seed(42);
    let again = Simulation::new(BalanceConfig::default()).unwrap().with_seed(42);

    assert_eq!(sim.outcomes(200), again.outcomes(200));
    assert_eq!(sim.run_battles(200), again.run_battles(200));
}

#[test]
fn test_parallel_matches_sequential() {
    let sim = Simulation::new(BalanceConfig::default()).unwrap().with_seed(7);
    assert_eq!(sim.run_parallel(500), sim.run_battles(500));
}

#[test]
fn test_binary_simulate_is_deterministic() {
    let args = ["simulate", "--battles", "300", "--seed", "42", "--verbosity", "silent"];
    let run1 = run_binary(&args);
    let run2 = run_binary(&args);

    assert!(run1.contains("Total battles: 300"), "unexpected output:\n{run1}");
    assert_eq!(run1, run2);
}

#[test]
fn test_binary_rejects_zero_battles() {
    let output = Command::new(env!("CARGO_BIN_EXE_battle-sim"))
        .args(["simulate", "--battles", "0"])
        .output()
        .expect("Failed to run battle-sim binary");
    assert!(!output.status.success());
}

#[test]
fn test_binary_battle_reports_recorded_outcome() {
    let output = run_binary(&["battle", "--seed", "0", "--verbosity", "silent"]);
    assert_eq!(
        output.lines().find(|l| l.starts_with("Result:")),
        Some("Result: victory after 2 turn(s), player health 37")
    );
}

#[test]
fn test_binary_battle_has_no_save_or_resume_flags() {
    for flag in ["--start-from", "--snapshot-output", "--stop-after-turn"] {
        let output = Command::new(env!("CARGO_BIN_EXE_battle-sim"))
            .args(["battle", flag, "1"])
            .output()
            .expect("Failed to run battle-sim binary");
        assert!(!output.status.success(), "battle accepted {flag}");
    }
}
