mod config;

use std::path::Path;
use std::time::Duration;

use config::ArenaConfig;
use incognito_core::catalog;
use incognito_core::game::{connect_providers, prompt, Game};
use incognito_core::{GameReport, GameState, SecretStore};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging / tracing
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,incognito_core=info,arena=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cfg = ArenaConfig::load();
    let catalog = catalog::builtin_catalog();
    let mut rng = SmallRng::from_os_rng();

    // Assign identities, then fill the rules template once
    let state = GameState::initialize(
        &catalog,
        cfg.players,
        cfg.turns_between_guesses,
        cfg.max_turns,
        &mut rng,
    )?;
    let base_prompt = prompt::load_base_prompt(
        Path::new(&cfg.base_prompt),
        cfg.turns_between_guesses,
        state.players.len(),
    )?;

    print_banner(&state);

    // Credentials are resolved only for providers actually in play
    let mut secrets = SecretStore::new();
    let clients = connect_providers(
        &catalog,
        &state,
        &mut secrets,
        cfg.request_timeout_ms,
        cfg.temperature,
    )?;

    let mut game = Game::new(state, clients, base_prompt, rng)?;
    if cfg.turn_delay_ms > 0 {
        game = game.with_turn_delay(Duration::from_millis(cfg.turn_delay_ms));
    }

    info!(target = "arena", "starting game");
    let report = game.run().await;
    print_results(&report);
    Ok(())
}

fn print_banner(state: &GameState) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            🎮  INCOGNITO ARENA                       ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!("  Players:       {}", state.players.len());
    println!("  Guess every:   {} turns", state.turns_between_guesses);
    println!("  Max turns:     {}", state.max_turns);
    println!();
    println!("  🔐 SECRET ASSIGNMENTS (for the observer only):");
    for p in &state.players {
        println!("     Player {}: {:>10} / {}", p.id, p.provider, p.model_id);
    }
    println!();
}

fn print_results(report: &GameReport) {
    println!();
    println!("{}", "═".repeat(55));
    println!("  🏁  GAME OVER");
    println!("{}", "═".repeat(55));

    if !report.winners.is_empty() {
        println!("\n  🏆 Winners (guessed themselves correctly):");
        for p in &report.winners {
            println!("     Player {}: {}", p.id, p.model_id);
        }
    }
    if !report.eliminated.is_empty() {
        println!("\n  💀 Eliminated (russian roulette):");
        for p in &report.eliminated {
            println!("     Player {}: {}", p.id, p.model_id);
        }
    }
    if !report.undetermined.is_empty() {
        println!("\n  🤷 Never figured it out:");
        for p in &report.undetermined {
            println!("     Player {}: {}", p.id, p.model_id);
        }
    }
    println!();
}
