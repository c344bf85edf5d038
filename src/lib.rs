//! Single-elimination creature tournament: eight entrants fetched from an
//! external data service, reduced bracket by bracket until a champion
//! remains.
//!
//! The main entry point for a full run is [`tournament::run_tournament`].

pub mod battle;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod tournament;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle::{resolve_attack, run_match, EngineConfig, MatchReport, Side};
    pub use crate::error::TournamentError;
    pub use crate::model::Creature;
    pub use crate::provider::{fetch_creature, CreatureSource, PokeApi};
    pub use crate::render::{ConsoleRenderer, Renderer, SilentRenderer};
    pub use crate::tournament::{run_stage, run_tournament, TournamentConfig};
}
