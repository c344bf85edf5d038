//! Tournament combatant entity assembled from provider data.

use std::collections::HashSet;

use crate::error::TournamentError;
use crate::provider::{CreatureBase, TypeRelations};

/// A tournament combatant. Base stats and type affinities are fixed at
/// construction; only `current_health` mutates, and only through the battle
/// engine or the between-stage heal.
#[derive(Clone, Debug)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_health: u32,
    pub current_health: u32,
    /// Elemental types carried by this creature; never empty.
    pub types: Vec<String>,
    /// Types this creature deals double damage to.
    pub double_damage_types: HashSet<String>,
    /// Types this creature deals half damage to.
    pub half_damage_types: HashSet<String>,
    /// Types this creature cannot damage at all.
    pub no_damage_types: HashSet<String>,
}

impl Creature {
    /// Build a creature from its provider-supplied base record and the
    /// damage relations of each of its types.
    ///
    /// Relations are unioned across all of the creature's types and then
    /// made mutually exclusive: double-damage wins over half-damage, which
    /// wins over no-damage.
    pub fn from_parts(
        id: u32,
        base: CreatureBase,
        relations: &[TypeRelations],
    ) -> Result<Self, TournamentError> {
        if base.types.is_empty() {
            return Err(TournamentError::MalformedData(format!(
                "creature {id} ({}) has no types",
                base.name
            )));
        }
        if base.max_health == 0 {
            return Err(TournamentError::MalformedData(format!(
                "creature {id} ({}) has zero max health",
                base.name
            )));
        }

        let mut double = HashSet::new();
        let mut half = HashSet::new();
        let mut none = HashSet::new();
        for relation in relations {
            double.extend(relation.double_damage_to.iter().cloned());
            half.extend(relation.half_damage_to.iter().cloned());
            none.extend(relation.no_damage_to.iter().cloned());
        }
        half.retain(|t| !double.contains(t));
        none.retain(|t| !double.contains(t) && !half.contains(t));

        Ok(Self {
            id,
            name: base.name,
            attack: base.attack,
            defense: base.defense,
            speed: base.speed,
            max_health: base.max_health,
            current_health: base.max_health,
            types: base.types,
            double_damage_types: double,
            half_damage_types: half,
            no_damage_types: none,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.current_health = self.current_health.saturating_sub(damage);
    }

    /// Full restore between stages.
    pub fn heal(&mut self) {
        self.current_health = self.max_health;
    }
}
