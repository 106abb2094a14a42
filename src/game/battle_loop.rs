//! Battle loop implementation
//!
//! Runs one player-versus-monster battle turn by turn until either side
//! drops to zero health.
//!
//! There is no turn cap. A low-health player who only blocks against a
//! monster that keeps charging could in principle stall forever; with the
//! shipped balance every battle ends within a few dozen turns.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating all format! allocations.
macro_rules! log_if_verbose {
    ($self:expr, $level:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $self.logger.is_enabled($level) {
                $self.logger.log($level, &format!($($arg)*));
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::config::BalanceConfig;
use crate::core::{Card, CardKind, Monster, MonsterTurn, Player};
use crate::game::logger::BattleLogger;
use crate::game::policy::{Combo, HeuristicPolicy};
use crate::loader::build_deck;
use rand::Rng;
use smallvec::SmallVec;

/// Verbosity level for battle output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during battle
    Silent = 0,
    /// Minimal - only battle outcome
    Minimal = 1,
    /// Normal - one summary per turn (default)
    #[default]
    Normal = 2,
    /// Verbose - draws, hands and every state change
    Verbose = 3,
}

/// Where a battle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    BattleOngoing,
    PlayerWon,
    PlayerLost,
}

impl BattleState {
    pub fn is_over(self) -> bool {
        self != BattleState::BattleOngoing
    }
}

/// Result of running a battle to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BattleOutcome {
    /// Turn on which the battle ended (first turn is 1)
    pub turns_elapsed: u32,
    /// Player health at the end; zero or below on a loss
    pub player_final_health: i32,
    pub player_won: bool,
}

/// Everything that happened during one turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub turn: u32,
    pub cards_drawn: usize,
    pub played: SmallVec<[Card; 3]>,
    pub combo: Option<Combo>,
    /// Total damage dealt to the monster, combo bonus included
    pub damage: i32,
    pub block_gained: i32,
    pub stun_applied: bool,
    /// None when the monster died before it could act
    pub monster_turn: Option<MonsterTurn>,
    pub state: BattleState,
}

/// Battle manager
///
/// Owns both combatants and the random generator, so a battle is fully
/// reproducible from its config and the generator's seed.
pub struct Battle<'a, R: Rng> {
    config: &'a BalanceConfig,
    player: Player,
    monster: Monster,
    policy: HeuristicPolicy,
    rng: R,
    turn: u32,
    state: BattleState,
    /// Battle log (stdout and/or captured)
    pub logger: BattleLogger,
}

impl<'a, R: Rng> Battle<'a, R> {
    /// Set up a battle with a freshly shuffled deck
    pub fn new(config: &'a BalanceConfig, mut rng: R) -> Self {
        let deck = build_deck(config, &mut rng);
        let player = Player::new(config.player.max_health, deck);
        let monster = Monster::new(&config.monster);
        Self::from_parts(config, player, monster, rng)
    }

    /// Set up a battle from pre-arranged combatants
    pub fn from_parts(config: &'a BalanceConfig, player: Player, monster: Monster, rng: R) -> Self {
        Battle {
            config,
            player,
            monster,
            policy: HeuristicPolicy::new(config.rules.max_cards_played_per_turn),
            rng,
            turn: 0,
            state: BattleState::BattleOngoing,
            logger: BattleLogger::with_verbosity(VerbosityLevel::Silent),
        }
    }

    /// Set verbosity level for output
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// The outcome, once the battle is over
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if !self.state.is_over() {
            return None;
        }
        Some(BattleOutcome {
            turns_elapsed: self.turn,
            player_final_health: self.player.health,
            player_won: self.state == BattleState::PlayerWon,
        })
    }

    /// Run turns until one side falls
    pub fn run(&mut self) -> BattleOutcome {
        loop {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            self.play_turn();
        }
    }

    /// Resolve one full turn; returns None if the battle was already over
    pub fn play_turn(&mut self) -> Option<TurnReport> {
        if self.state.is_over() {
            return None;
        }

        self.turn += 1;
        self.monster.clear_stun();

        log_if_verbose!(
            self,
            VerbosityLevel::Normal,
            "Turn {}: player {}/{} hp, monster {} hp, power {}",
            self.turn,
            self.player.health,
            self.player.max_health,
            self.monster.health,
            self.monster.power
        );

        // Player phase
        let cards_drawn = self
            .player
            .draw(self.config.rules.cards_drawn_per_turn, &mut self.rng);
        log_if_verbose!(
            self,
            VerbosityLevel::Verbose,
            "Drew {} card(s), hand: {}",
            cards_drawn,
            format_cards(self.player.hand().iter())
        );

        let selection = self.policy.choose_cards(self.player.hand());
        let played = self.player.play_cards(&selection.ids());
        let kinds: SmallVec<[CardKind; 3]> = played.iter().map(|c| c.kind).collect();
        let combo = Combo::detect(&kinds);

        let mut damage = combo.map_or(0, |c| self.config.combo_bonus(c));
        let mut block_gained = 0;
        let mut stun_applied = false;
        let defensive = self
            .player
            .is_low_health(self.config.player.low_health_threshold);

        for card in &played {
            match card.kind {
                CardKind::A | CardKind::B => {
                    if defensive {
                        block_gained += card.armor;
                    } else {
                        damage += card.damage;
                    }
                }
                CardKind::D => {
                    damage += card.damage;
                    if self.rng.gen::<f64>() < card.stun_chance {
                        self.monster.stun();
                        stun_applied = true;
                    }
                }
                CardKind::E => block_gained += card.armor,
            }
        }

        self.player.gain_block(block_gained);
        if damage > 0 {
            self.monster.take_damage(damage);
        }
        self.player.discard_hand();

        log_if_verbose!(
            self,
            VerbosityLevel::Normal,
            "Played {}{}: {} damage, {} block{}",
            format_cards(played.iter()),
            combo.map_or(String::new(), |c| format!(" (combo {c})")),
            damage,
            block_gained,
            if stun_applied { ", monster stunned" } else { "" }
        );

        if !self.monster.is_alive() {
            return Some(self.finish(TurnReport {
                turn: self.turn,
                cards_drawn,
                played,
                combo,
                damage,
                block_gained,
                stun_applied,
                monster_turn: None,
                state: BattleState::PlayerWon,
            }));
        }

        // Monster phase
        let monster_turn = self.monster.act(&mut self.player);
        match monster_turn {
            MonsterTurn::Stunned { skipped } => {
                log_if_verbose!(self, VerbosityLevel::Normal, "Monster is stunned, skips {:?}", skipped);
            }
            MonsterTurn::Attacked {
                action,
                damage,
                dealt,
            } => {
                log_if_verbose!(
                    self,
                    VerbosityLevel::Normal,
                    "Monster uses {:?} for {} damage, {} gets through",
                    action,
                    damage,
                    dealt
                );
            }
            MonsterTurn::Charged { power } => {
                log_if_verbose!(self, VerbosityLevel::Normal, "Monster charges, power now {}", power);
            }
        }

        let state = if self.player.is_alive() {
            BattleState::BattleOngoing
        } else {
            BattleState::PlayerLost
        };

        Some(self.finish(TurnReport {
            turn: self.turn,
            cards_drawn,
            played,
            combo,
            damage,
            block_gained,
            stun_applied,
            monster_turn: Some(monster_turn),
            state,
        }))
    }

    fn finish(&mut self, report: TurnReport) -> TurnReport {
        self.state = report.state;
        match self.state {
            BattleState::PlayerWon => {
                log_if_verbose!(
                    self,
                    VerbosityLevel::Minimal,
                    "Player won on turn {} with {} hp left",
                    self.turn,
                    self.player.health
                );
            }
            BattleState::PlayerLost => {
                log_if_verbose!(self, VerbosityLevel::Minimal, "Player lost on turn {}", self.turn);
            }
            BattleState::BattleOngoing => {}
        }
        report
    }
}

#[cfg(feature = "verbose-logging")]
fn format_cards<'c>(cards: impl Iterator<Item = &'c Card>) -> String {
    let names: Vec<String> = cards.map(|c| c.to_string()).collect();
    format!("[{}]", names.join(" "))
}
