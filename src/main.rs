use anyhow::Context;
use pokemon_tournament::battle::EngineConfig;
use pokemon_tournament::provider::PokeApi;
use pokemon_tournament::render::ConsoleRenderer;
use pokemon_tournament::tournament::{run_tournament, TournamentConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let provider = PokeApi::new().context("failed to build the creature data client")?;
    let mut renderer = ConsoleRenderer::stdout_paced();
    let mut rng = SmallRng::from_entropy();

    run_tournament(
        &provider,
        &mut renderer,
        &mut rng,
        &TournamentConfig::default(),
        &EngineConfig::default(),
    )
    .context("tournament aborted")?;

    Ok(())
}
