//! Monster representation and its fixed action cycle

use crate::config::MonsterConfig;
use crate::core::Player;
use serde::{Deserialize, Serialize};

/// One slot of the monster's behavior cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterAction {
    /// Base light damage plus power
    LightAttack,
    /// Base heavy damage plus power
    HeavyAttack,
    /// Gain power; no damage
    Charge,
}

/// The monster performs these in order, forever
pub const ACTION_CYCLE: [MonsterAction; 3] = [
    MonsterAction::LightAttack,
    MonsterAction::HeavyAttack,
    MonsterAction::Charge,
];

/// What the monster did when its action came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterTurn {
    /// Stunned: the scheduled action was skipped
    Stunned { skipped: MonsterAction },
    /// An attack resolved against the player
    Attacked {
        action: MonsterAction,
        /// Damage before block
        damage: i32,
        /// Damage that got through block
        dealt: i32,
    },
    /// Power increased to the given value
    Charged { power: i32 },
}

impl MonsterTurn {
    /// The cycle slot this turn consumed
    pub fn action(&self) -> MonsterAction {
        match *self {
            MonsterTurn::Stunned { skipped } => skipped,
            MonsterTurn::Attacked { action, .. } => action,
            MonsterTurn::Charged { .. } => MonsterAction::Charge,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Monster {
    /// Remaining health; may go negative on the killing blow
    pub health: i32,

    /// Persistent bonus added to every attack
    pub power: i32,

    /// Number of actions attempted so far, stunned ones included
    pub action_cycle_index: u64,

    pub is_stunned: bool,

    light_attack_damage: i32,
    heavy_attack_damage: i32,
    power_gain: i32,
}

impl Monster {
    pub fn new(config: &MonsterConfig) -> Self {
        Monster {
            health: config.health,
            power: 0,
            action_cycle_index: 0,
            is_stunned: false,
            light_attack_damage: config.light_attack_damage,
            heavy_attack_damage: config.heavy_attack_damage,
            power_gain: config.power_gain,
        }
    }

    /// The action due next, without advancing the cycle
    pub fn peek_action(&self) -> MonsterAction {
        ACTION_CYCLE[(self.action_cycle_index % ACTION_CYCLE.len() as u64) as usize]
    }

    /// Damage an action would deal at the current power, if it attacks
    pub fn attack_damage(&self, action: MonsterAction) -> Option<i32> {
        match action {
            MonsterAction::LightAttack => Some(self.light_attack_damage + self.power),
            MonsterAction::HeavyAttack => Some(self.heavy_attack_damage + self.power),
            MonsterAction::Charge => None,
        }
    }

    /// Attempt the scheduled action against the player
    ///
    /// The cycle advances even when stunned, so a stun skips a slot rather
    /// than delaying the pattern.
    pub fn act(&mut self, player: &mut Player) -> MonsterTurn {
        let action = self.peek_action();
        self.action_cycle_index += 1;

        if self.is_stunned {
            return MonsterTurn::Stunned { skipped: action };
        }

        match self.attack_damage(action) {
            Some(damage) => {
                let dealt = player.take_damage(damage);
                MonsterTurn::Attacked {
                    action,
                    damage,
                    dealt,
                }
            }
            None => {
                self.power += self.power_gain;
                MonsterTurn::Charged { power: self.power }
            }
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn stun(&mut self) {
        self.is_stunned = true;
    }

    pub fn clear_stun(&mut self) {
        self.is_stunned = false;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
