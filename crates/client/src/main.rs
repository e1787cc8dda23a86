//! Symphony headless client binary.
//!
//! Assembles one match from the environment and plays it with the
//! auto-conductor:
//! 1. Match rules and the player roster (from `SYMPHONY_DATA_DIR` or seeded)
//! 2. Enemy formation for `SYMPHONY_STAGE`
//! 3. Runtime (simulation worker + event bus)
//!
//! # Examples
//!
//! ```bash
//! SYMPHONY_STAGE=10 RUST_LOG=debug cargo run -p symphony-client
//! ```

use anyhow::Result;
use symphony_client::{AutoConductor, ClientConfig, setup};
use symphony_runtime::{Event, Runtime, RuntimeConfig, Topic};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        seed = config.seed,
        stage = config.stage,
        data_dir = ?config.data_dir,
        "Starting Symphony client"
    );

    let match_config = setup::match_config(&config)?;
    let player = setup::player_formation(&config)?;
    let enemy = setup::enemy_formation(&config)?;

    for (lane, unit) in enemy.units() {
        tracing::info!(
            %lane,
            name = %unit.name,
            element = %unit.element,
            rarity = %unit.rarity,
            hp = unit.hp(),
            atk = unit.atk,
            "Enemy deployed"
        );
    }

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            match_config,
            ..RuntimeConfig::default()
        })
        .player(player)
        .enemy(enemy)
        .stage(config.stage)
        .build()
        .await?;

    let mut combat = runtime.subscribe(Topic::Combat);
    let printer = tokio::spawn(async move {
        while let Ok(event) = combat.recv().await {
            if let Event::Combat(update) = event {
                tracing::debug!(?update, "Combat");
            }
        }
    });

    let summary = AutoConductor::new(runtime.handle(), config.tap_offset_ms)
        .run()
        .await?;
    let result = runtime.wait_for_result().await?;
    let state = runtime.handle().query_state().await?;

    for entry in state.log.iter() {
        tracing::info!("{entry}");
    }
    match result {
        Some(result) => tracing::info!(
            %result,
            beat = %state.beat(),
            taps = summary.taps,
            casts = summary.casts,
            best_combo = summary.best_combo,
            "Match finished"
        ),
        None => tracing::info!(beat = %state.beat(), "Match abandoned"),
    }

    runtime.shutdown().await?;
    printer.abort();

    tracing::info!("Client shutdown complete");
    Ok(())
}
