//! Bracket orchestration: entrant draw, stage reduction, champion.

use rand::seq::index;
use rand::Rng;
use tracing::info;

use crate::battle::{run_match, EngineConfig, Side};
use crate::error::TournamentError;
use crate::model::Creature;
use crate::provider::{fetch_creature, CreatureSource};
use crate::render::{BracketView, Renderer};

/// Field parameters: eight entrants drawn from the first 151 species by
/// default.
#[derive(Clone, Copy, Debug)]
pub struct TournamentConfig {
    /// Number of entrants; must be a power of two, at least 2.
    pub field_size: usize,
    /// Entrant species ids are drawn from `1..=max_species_id`.
    pub max_species_id: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            field_size: 8,
            max_species_id: 151,
        }
    }
}

/// Stage label for a round with `remaining` participants.
pub fn stage_name(remaining: usize) -> &'static str {
    match remaining {
        2 => "Final",
        4 => "Semifinals",
        8 => "Quarterfinals",
        _ => "Qualifiers",
    }
}

/// Draw a full field of distinct random species and fetch each entrant.
/// Any provider failure aborts the draw; there is no partial field.
pub fn draw_entrants(
    source: &dyn CreatureSource,
    config: &TournamentConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Creature>, TournamentError> {
    if config.field_size < 2 || !config.field_size.is_power_of_two() {
        return Err(TournamentError::InvalidFieldSize(config.field_size));
    }
    if (config.max_species_id as usize) < config.field_size {
        return Err(TournamentError::InvalidFieldSize(config.field_size));
    }
    let ids = index::sample(rng, config.max_species_id as usize, config.field_size);
    let mut entrants = Vec::with_capacity(config.field_size);
    for id in ids.iter() {
        entrants.push(fetch_creature(source, id as u32 + 1)?);
    }
    Ok(entrants)
}

/// Run one stage of the bracket. Pairs are formed by consecutive input
/// order, never by seeding; winners come back in pairing order, fully
/// healed for the next stage.
pub fn run_stage(
    stage: &str,
    participants: Vec<Creature>,
    rng: &mut impl Rng,
    config: &EngineConfig,
    renderer: &mut dyn Renderer,
) -> Result<Vec<Creature>, TournamentError> {
    if participants.len() < 2 || participants.len() % 2 != 0 {
        return Err(TournamentError::InvalidFieldSize(participants.len()));
    }
    renderer.stage_started(stage);
    let mut remaining = participants;
    let mut winners = Vec::with_capacity(remaining.len() / 2);
    let mut match_number = 0;
    while !remaining.is_empty() {
        let mut first = remaining.remove(0);
        let mut second = remaining.remove(0);
        match_number += 1;
        renderer.match_started(stage, match_number, &first, &second);
        let report = run_match(&mut first, &mut second, rng, config);
        let (winner, loser) = match report.winner {
            Side::First => (first, second),
            Side::Second => (second, first),
        };
        info!(stage, match_number, winner = %winner.name, loser = %loser.name, "match decided");
        renderer.match_resolved(&report, &winner, &loser);
        winners.push(winner);
    }
    for creature in &mut winners {
        creature.heal();
    }
    Ok(winners)
}

/// Run one full tournament: draw the field, reduce it stage by stage, and
/// return the champion.
pub fn run_tournament(
    source: &dyn CreatureSource,
    renderer: &mut dyn Renderer,
    rng: &mut impl Rng,
    config: &TournamentConfig,
    engine: &EngineConfig,
) -> Result<Creature, TournamentError> {
    renderer.scouting(config.field_size);
    let entrants = draw_entrants(source, config, rng)?;
    info!(
        field = entrants.len(),
        "tournament field drawn: {}",
        entrants
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    renderer.roster_announced(&entrants);

    let mut bracket = BracketView::default();
    let mut field = entrants;
    while field.len() > 1 {
        bracket.record_round(&field);
        renderer.bracket_updated(&bracket);
        let stage = stage_name(field.len());
        field = run_stage(stage, field, rng, engine, renderer)?;
        if field.len() > 1 {
            renderer.advancing(stage_name(field.len()), &field);
        }
    }

    let champion = field
        .pop()
        .ok_or(TournamentError::InvalidFieldSize(0))?;
    bracket.record_champion(&champion);
    renderer.champion_crowned(&champion);
    info!(champion = %champion.name, "tournament complete");
    Ok(champion)
}
