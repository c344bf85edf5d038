//! Single-attack and single-match resolution.

use rand::Rng;
use tracing::warn;

use crate::model::Creature;

/// Tunable combat parameters.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Fraction of the defender's defense subtracted from the attack stat
    /// before the variance roll.
    pub defense_mitigation: f64,
    /// Inclusive upper bound of the random bonus added to every attack.
    pub max_variance: u32,
    /// Safety cap on attacks in one match; see [`run_match`].
    pub max_turns: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defense_mitigation: 0.5,
            max_variance: 5,
            max_turns: 1_000,
        }
    }
}

/// Which of the two listed combatants a result refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Snapshot of one resolved attack, for the renderer to replay.
#[derive(Clone, Debug)]
pub struct AttackRecord {
    pub attacker: String,
    pub defender: String,
    /// Attacker health when the blow landed (unchanged by it).
    pub attacker_health: u32,
    pub defender_health_before: u32,
    pub damage: u32,
    pub defender_health_after: u32,
    pub fainted: bool,
}

/// Outcome of a full match between two creatures.
#[derive(Clone, Debug)]
pub struct MatchReport {
    pub winner: Side,
    pub first_attacker: Side,
    pub attacks: Vec<AttackRecord>,
    /// True when the turn cap decided the match instead of a faint.
    pub adjudicated: bool,
}

/// Resolve one attack, decrementing the defender's health (floored at 0).
/// Returns the final damage dealt.
pub fn resolve_attack(
    attacker: &Creature,
    defender: &mut Creature,
    rng: &mut impl Rng,
    config: &EngineConfig,
) -> u32 {
    let variance = rng.gen_range(0..=config.max_variance);
    let mitigated = (defender.defense as f64 * config.defense_mitigation).floor() as i64;
    let raw = attacker.attack as i64 - mitigated;
    let mut damage = raw.max(0) as u32 + variance;

    // Exactly one modifier applies; double takes priority over half, half
    // over no-damage. The order is part of the contract.
    if defender
        .types
        .iter()
        .any(|t| attacker.double_damage_types.contains(t))
    {
        damage *= 2;
    } else if defender
        .types
        .iter()
        .any(|t| attacker.half_damage_types.contains(t))
    {
        damage /= 2;
    } else if defender
        .types
        .iter()
        .any(|t| attacker.no_damage_types.contains(t))
    {
        damage = 0;
    }

    defender.take_damage(damage);
    damage
}

/// Run a match to completion. The faster creature attacks first; speed ties
/// go to the first-listed combatant. Roles swap strictly after every attack
/// and the match ends the moment a defender faints.
///
/// A turn cap guards against the zero-damage stalemate (both attacks fully
/// mitigated with a variance ceiling of 0). If the cap is hit, the match is
/// adjudicated on remaining health, ties again to the first-listed
/// combatant, and the loser is knocked out so exactly one side survives.
pub fn run_match(
    first: &mut Creature,
    second: &mut Creature,
    rng: &mut impl Rng,
    config: &EngineConfig,
) -> MatchReport {
    let first_attacker = if second.speed > first.speed {
        Side::Second
    } else {
        Side::First
    };
    let mut attacking = first_attacker;
    let mut attacks = Vec::new();

    for _ in 0..config.max_turns {
        let record = match attacking {
            Side::First => attack_once(first, second, rng, config),
            Side::Second => attack_once(second, first, rng, config),
        };
        let fainted = record.fainted;
        attacks.push(record);
        if fainted {
            return MatchReport {
                winner: attacking,
                first_attacker,
                attacks,
                adjudicated: false,
            };
        }
        attacking = attacking.opponent();
    }

    warn!(
        cap = config.max_turns,
        first = %first.name,
        second = %second.name,
        "turn cap reached, adjudicating on remaining health"
    );
    let winner = if second.current_health > first.current_health {
        Side::Second
    } else {
        Side::First
    };
    match winner {
        Side::First => second.current_health = 0,
        Side::Second => first.current_health = 0,
    }
    MatchReport {
        winner,
        first_attacker,
        attacks,
        adjudicated: true,
    }
}

fn attack_once(
    attacker: &Creature,
    defender: &mut Creature,
    rng: &mut impl Rng,
    config: &EngineConfig,
) -> AttackRecord {
    let attacker_health = attacker.current_health;
    let defender_health_before = defender.current_health;
    let damage = resolve_attack(attacker, defender, rng, config);
    AttackRecord {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        attacker_health,
        defender_health_before,
        damage,
        defender_health_after: defender.current_health,
        fainted: !defender.is_alive(),
    }
}
