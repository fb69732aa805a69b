use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

/// High-level configuration for the arena binary
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub players: usize,
    pub turns_between_guesses: u32,
    pub max_turns: u32,
    /// Path of the rules template with `{N}` / `{num_players}` placeholders
    pub base_prompt: String,
    /// Sleep between turns instead of the interactive press-to-continue
    pub turn_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub temperature: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            players: env_parse("GAME_PLAYERS", 5),
            turns_between_guesses: env_parse("GAME_GUESS_INTERVAL", 3),
            max_turns: env_parse("GAME_MAX_TURNS", 15),
            base_prompt: std::env::var("GAME_BASE_PROMPT")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "prompts/base_prompt.md".to_string()),
            turn_delay_ms: env_parse("GAME_TURN_DELAY_MS", 0),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            temperature: env_parse("GAME_TEMPERATURE", 0.7),
        }
    }
}

impl ArenaConfig {
    /// Load configuration from a TOML file (path via ARENA_CONFIG or
    /// ./arena.toml), overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path = std::env::var("ARENA_CONFIG").unwrap_or_else(|_| "arena.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target = "arena", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => match toml::from_str::<ArenaToml>(&s) {
                Ok(t) => t.overlay(default),
                Err(e) => {
                    tracing::warn!(target = "arena", error = %e, "Failed to parse TOML; using defaults");
                    default
                }
            },
            Err(e) => {
                tracing::warn!(target = "arena", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// TOML overlay: every field optional, unset fields keep their defaults
#[derive(Debug, Default, Deserialize)]
struct ArenaToml {
    players: Option<usize>,
    turns_between_guesses: Option<u32>,
    max_turns: Option<u32>,
    base_prompt: Option<String>,
    turn_delay_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    temperature: Option<f32>,
}

impl ArenaToml {
    fn overlay(self, mut cfg: ArenaConfig) -> ArenaConfig {
        if let Some(v) = self.players {
            cfg.players = v;
        }
        if let Some(v) = self.turns_between_guesses {
            cfg.turns_between_guesses = v;
        }
        if let Some(v) = self.max_turns {
            cfg.max_turns = v;
        }
        if let Some(v) = self.base_prompt {
            cfg.base_prompt = v;
        }
        if let Some(v) = self.turn_delay_ms {
            cfg.turn_delay_ms = v;
        }
        if let Some(v) = self.request_timeout_ms {
            cfg.request_timeout_ms = v;
        }
        if let Some(v) = self.temperature {
            cfg.temperature = v;
        }
        cfg
    }
}
