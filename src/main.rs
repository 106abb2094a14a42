//! Card Battle Simulator - Main Binary
//!
//! Command-line front end for running balance simulations

use card_battle_sim::{
    config::{BalanceConfig, PROGRESS_REPORT_INTERVAL},
    game::{Battle, VerbosityLevel},
    BattleCount, Result, Simulation,
};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;

/// Verbosity level for battle output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Card Battle Simulator - balance tuning through simulated battles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run many battles and print aggregate statistics
    Simulate {
        /// Number of battles to run
        #[arg(long, short = 'n', default_value_t = card_battle_sim::config::DEFAULT_BATTLE_COUNT)]
        battles: usize,

        /// Master random seed (battle seeds are derived from it)
        #[arg(long)]
        seed: Option<u64>,

        /// Run battles across all cores
        #[arg(long)]
        parallel: bool,

        /// JSON balance configuration (missing fields use defaults)
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "minimal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run a single battle with a turn-by-turn trace
    Battle {
        /// Random seed for the battle
        #[arg(long)]
        seed: Option<u64>,

        /// JSON balance configuration (missing fields use defaults)
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Print the effective balance configuration as JSON
    ShowConfig {
        /// JSON balance configuration to merge over the defaults
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            battles,
            seed,
            parallel,
            config,
            verbosity,
        } => run_simulate(battles, seed, parallel, config, verbosity.into()),
        Commands::Battle {
            seed,
            config,
            verbosity,
        } => run_battle(seed, config, verbosity.into()),
        Commands::ShowConfig { config } => {
            let config = load_config(config)?;
            println!("{}", config.to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<BalanceConfig> {
    match path {
        Some(path) => BalanceConfig::load_from_file(&path),
        None => Ok(BalanceConfig::default()),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

fn run_simulate(
    battles: usize,
    seed: Option<u64>,
    parallel: bool,
    config_path: Option<PathBuf>,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let count = BattleCount::new(battles)?;
    let seed = resolve_seed(seed);
    let simulation = Simulation::new(load_config(config_path)?)?.with_seed(seed);

    if verbosity >= VerbosityLevel::Minimal {
        println!("Simulating {} battles (seed {seed})...", count.get());
    }

    let stats = if parallel {
        simulation.run_parallel(count.get())
    } else {
        simulation.run_with_progress(count.get(), PROGRESS_REPORT_INTERVAL, |done| {
            if verbosity >= VerbosityLevel::Normal {
                println!("Completed {done} battles");
            }
        })
    };

    println!("\n{stats}");
    Ok(())
}

fn run_battle(seed: Option<u64>, config_path: Option<PathBuf>, verbosity: VerbosityLevel) -> Result<()> {
    let config = load_config(config_path)?;
    config.validate()?;
    let seed = resolve_seed(seed);

    if verbosity >= VerbosityLevel::Minimal {
        println!("=== Battle (seed {seed}) ===\n");
    }

    let outcome = Battle::new(&config, ChaCha12Rng::seed_from_u64(seed))
        .with_verbosity(verbosity)
        .run();

    println!(
        "\nResult: {} after {} turn(s), player health {}",
        if outcome.player_won { "victory" } else { "defeat" },
        outcome.turns_elapsed,
        outcome.player_final_health
    );
    Ok(())
}
