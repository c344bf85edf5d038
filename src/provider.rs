//! External creature-data provider: the lookup seam plus the PokeAPI client.
//!
//! The tournament never talks HTTP directly; it goes through
//! [`CreatureSource`] so tests can swap in an in-memory source.

use serde::Deserialize;
use tracing::debug;

use crate::error::TournamentError;
use crate::model::Creature;

/// Base record for one creature as reported by the data service.
#[derive(Clone, Debug)]
pub struct CreatureBase {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    pub speed: u32,
    pub types: Vec<String>,
}

/// Offensive damage relations of a single elemental type.
#[derive(Clone, Debug, Default)]
pub struct TypeRelations {
    pub double_damage_to: Vec<String>,
    pub half_damage_to: Vec<String>,
    pub no_damage_to: Vec<String>,
}

/// Synchronous lookup of creature data. One-shot, no retries; failures
/// abort tournament setup.
pub trait CreatureSource {
    fn creature_base(&self, id: u32) -> Result<CreatureBase, TournamentError>;
    fn type_relations(&self, type_name: &str) -> Result<TypeRelations, TournamentError>;
}

/// Fetch a creature's base record plus the damage relations of every one of
/// its types, and assemble the combatant.
pub fn fetch_creature(
    source: &dyn CreatureSource,
    id: u32,
) -> Result<Creature, TournamentError> {
    let base = source.creature_base(id)?;
    let mut relations = Vec::with_capacity(base.types.len());
    for type_name in &base.types {
        relations.push(source.type_relations(type_name)?);
    }
    Creature::from_parts(id, base, &relations)
}

/// Blocking PokeAPI client; GETs `/pokemon/{id}` and `/type/{type}`.
pub struct PokeApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PokeApi {
    pub const DEFAULT_BASE_URL: &'static str = "https://pokeapi.co/api/v2";

    pub fn new() -> Result<Self, TournamentError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TournamentError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| TournamentError::DataUnavailable(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn get(&self, path: &str) -> Result<String, TournamentError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "fetching creature data");
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| TournamentError::DataUnavailable(format!("GET {url}: {e}")))?;
        response
            .text()
            .map_err(|e| TournamentError::DataUnavailable(format!("GET {url}: {e}")))
    }
}

impl CreatureSource for PokeApi {
    fn creature_base(&self, id: u32) -> Result<CreatureBase, TournamentError> {
        let body = self.get(&format!("pokemon/{id}"))?;
        parse_pokemon(id, &body)
    }

    fn type_relations(&self, type_name: &str) -> Result<TypeRelations, TournamentError> {
        let body = self.get(&format!("type/{type_name}"))?;
        parse_type_relations(type_name, &body)
    }
}

// PokeAPI wire format, reduced to the fields we read.

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    stats: Vec<StatEntry>,
    types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TypeResponse {
    damage_relations: DamageRelationsResponse,
}

#[derive(Debug, Deserialize)]
struct DamageRelationsResponse {
    double_damage_to: Vec<NamedResource>,
    half_damage_to: Vec<NamedResource>,
    no_damage_to: Vec<NamedResource>,
}

pub(crate) fn parse_pokemon(id: u32, body: &str) -> Result<CreatureBase, TournamentError> {
    let raw: PokemonResponse = serde_json::from_str(body)
        .map_err(|e| TournamentError::MalformedData(format!("pokemon/{id}: {e}")))?;
    Ok(CreatureBase {
        name: capitalize(&raw.name),
        attack: stat_value(&raw.stats, "attack", id)?,
        defense: stat_value(&raw.stats, "defense", id)?,
        max_health: stat_value(&raw.stats, "hp", id)?,
        speed: stat_value(&raw.stats, "speed", id)?,
        types: raw.types.into_iter().map(|t| t.type_info.name).collect(),
    })
}

pub(crate) fn parse_type_relations(
    type_name: &str,
    body: &str,
) -> Result<TypeRelations, TournamentError> {
    let raw: TypeResponse = serde_json::from_str(body)
        .map_err(|e| TournamentError::MalformedData(format!("type/{type_name}: {e}")))?;
    let names = |list: Vec<NamedResource>| -> Vec<String> {
        list.into_iter().map(|r| r.name).collect()
    };
    Ok(TypeRelations {
        double_damage_to: names(raw.damage_relations.double_damage_to),
        half_damage_to: names(raw.damage_relations.half_damage_to),
        no_damage_to: names(raw.damage_relations.no_damage_to),
    })
}

fn stat_value(stats: &[StatEntry], name: &str, id: u32) -> Result<u32, TournamentError> {
    stats
        .iter()
        .find(|entry| entry.stat.name == name)
        .map(|entry| entry.base_stat)
        .ok_or_else(|| {
            TournamentError::MalformedData(format!("pokemon/{id}: missing '{name}' stat"))
        })
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
