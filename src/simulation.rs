//! Simulation harness for running many battles and collecting statistics
//!
//! Every battle gets its own generator seeded from the master seed and the
//! battle index, so sequential and rayon-parallel runs produce the same
//! outcomes in the same order.

use crate::config::BalanceConfig;
use crate::game::{Battle, BattleOutcome, VerbosityLevel};
use crate::{Result, SimError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::fmt;

/// A validated, positive number of battles to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleCount(usize);

impl BattleCount {
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(SimError::InvalidConfig(
                "battle count must be at least 1".to_string(),
            ));
        }
        Ok(BattleCount(count))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BattleCount {
    fn default() -> Self {
        BattleCount(crate::config::DEFAULT_BATTLE_COUNT)
    }
}

/// Mean, minimum and maximum of a set of values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub min: i64,
    pub max: i64,
}

impl Summary {
    /// None for an empty input
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Option<Summary> {
        let mut count = 0usize;
        let mut sum = 0i64;
        let mut min = i64::MAX;
        let mut max = i64::MIN;
        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }
        if count == 0 {
            return None;
        }
        Some(Summary {
            mean: sum as f64 / count as f64,
            min,
            max,
        })
    }
}

/// Statistics over the battles the player won
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinningStats {
    pub turns: Summary,
    pub final_health: Summary,
}

/// Aggregate result of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStatistics {
    pub total_battles: usize,
    pub wins: usize,
    /// Percentage in [0, 100]; None when no battles ran
    pub win_rate: Option<f64>,
    /// None when no battle was won
    pub winning: Option<WinningStats>,
}

impl AggregateStatistics {
    pub fn from_outcomes(outcomes: &[BattleOutcome]) -> Self {
        let total_battles = outcomes.len();
        let wins: Vec<&BattleOutcome> = outcomes.iter().filter(|o| o.player_won).collect();

        let win_rate = if total_battles == 0 {
            None
        } else {
            Some(100.0 * wins.len() as f64 / total_battles as f64)
        };

        let turns = Summary::from_values(wins.iter().map(|o| o.turns_elapsed as i64));
        let final_health = Summary::from_values(wins.iter().map(|o| o.player_final_health as i64));
        let winning = match (turns, final_health) {
            (Some(turns), Some(final_health)) => Some(WinningStats {
                turns,
                final_health,
            }),
            _ => None,
        };

        AggregateStatistics {
            total_battles,
            wins: wins.len(),
            win_rate,
            winning,
        }
    }
}

impl fmt::Display for AggregateStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Battle Simulation Results ===")?;
        writeln!(f, "Total battles: {}", self.total_battles)?;
        writeln!(f, "Wins: {}", self.wins)?;
        match self.win_rate {
            Some(rate) => writeln!(f, "Win rate: {rate:.2}%")?,
            None => writeln!(f, "Win rate: n/a")?,
        }

        let Some(winning) = &self.winning else {
            return writeln!(f, "\nNo battles were won; no winning-battle statistics.");
        };

        writeln!(f, "\n--- Winning Battles ---")?;
        write_summary(f, "Turns", &winning.turns)?;
        writeln!(f)?;
        write_summary(f, "Remaining health", &winning.final_health)
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, title: &str, summary: &Summary) -> fmt::Result {
    writeln!(f, "{title}:")?;
    writeln!(f, "  Mean: {:.2}", summary.mean)?;
    writeln!(f, "  Min: {}", summary.min)?;
    writeln!(f, "  Max: {}", summary.max)
}

/// Runs independent battles under one balance configuration
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BalanceConfig,
    seed: u64,
}

impl Simulation {
    /// Create a simulation; the configuration is validated first
    pub fn new(config: BalanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Simulation { config, seed: 0 })
    }

    /// Set the master seed battles derive their generators from
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generator seed for the battle at `index`
    pub fn battle_seed(&self, index: usize) -> u64 {
        let mut mixer = Xoshiro256PlusPlus::seed_from_u64(self.seed.wrapping_add(index as u64));
        mixer.gen()
    }

    /// Build (but do not run) the battle at `index`
    pub fn battle(&self, index: usize) -> Battle<'_, ChaCha12Rng> {
        Battle::new(
            &self.config,
            ChaCha12Rng::seed_from_u64(self.battle_seed(index)),
        )
    }

    pub fn run_battle(&self, index: usize) -> BattleOutcome {
        self.battle(index)
            .with_verbosity(VerbosityLevel::Silent)
            .run()
    }

    /// Outcomes of battles `0..count`, in order
    pub fn outcomes(&self, count: usize) -> Vec<BattleOutcome> {
        (0..count).map(|index| self.run_battle(index)).collect()
    }

    /// Run `count` battles sequentially and aggregate them
    ///
    /// A `count` of zero is not an error here: it yields a report with no
    /// data (`win_rate` and `winning` are `None`). User-supplied counts go
    /// through [`BattleCount::new`] first, which rejects zero.
    pub fn run_battles(&self, count: usize) -> AggregateStatistics {
        AggregateStatistics::from_outcomes(&self.outcomes(count))
    }

    /// Like [`Simulation::run_battles`], calling `on_progress` with the number
    /// of completed battles every `interval` battles
    pub fn run_with_progress(
        &self,
        count: usize,
        interval: usize,
        mut on_progress: impl FnMut(usize),
    ) -> AggregateStatistics {
        let mut outcomes = Vec::with_capacity(count);
        for index in 0..count {
            outcomes.push(self.run_battle(index));
            let completed = index + 1;
            if interval > 0 && completed % interval == 0 {
                on_progress(completed);
            }
        }
        AggregateStatistics::from_outcomes(&outcomes)
    }

    /// Run `count` battles across rayon workers
    ///
    /// Produces exactly the same statistics as [`Simulation::run_battles`].
    pub fn run_parallel(&self, count: usize) -> AggregateStatistics {
        let outcomes: Vec<BattleOutcome> = (0..count)
            .into_par_iter()
            .map(|index| self.run_battle(index))
            .collect();
        AggregateStatistics::from_outcomes(&outcomes)
    }
}
