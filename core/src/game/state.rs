//! Players and shared game state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, ProviderSpec};
use crate::llm::ChatMessage;
use crate::{IncognitoError, Result};

/// A player in the game: one specific model instance.
///
/// Players are created once at game start and never deleted; elimination
/// clears `is_active` and a correct self-identification sets `has_won`.
/// `private_hints` is append-only and visible only to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub provider: String,
    pub model_id: String,
    pub is_active: bool,
    pub has_won: bool,
    pub private_hints: Vec<String>,
}

impl Player {
    pub fn new(id: u32, provider: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            id,
            provider: provider.into(),
            model_id: model_id.into(),
            is_active: true,
            has_won: false,
            private_hints: Vec::new(),
        }
    }
}

/// Full state of one game run. Owned by the engine, mutated turn by turn,
/// dropped at process end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub conversation: Vec<ChatMessage>,
    pub current_turn: u32,
    pub turns_between_guesses: u32,
    pub max_turns: u32,
}

impl GameState {
    pub fn new(players: Vec<Player>, turns_between_guesses: u32, max_turns: u32) -> Self {
        Self {
            players,
            conversation: Vec::new(),
            current_turn: 0,
            turns_between_guesses,
            max_turns,
        }
    }

    /// Randomly assign distinct (provider, model) pairs to sequential
    /// player ids starting at 1. Requesting more players than the catalog
    /// has pairs is a configuration error.
    pub fn initialize(
        catalog: &[ProviderSpec],
        player_count: usize,
        turns_between_guesses: u32,
        max_turns: u32,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        if turns_between_guesses == 0 {
            return Err(IncognitoError::ConfigError(
                "turns_between_guesses must be at least 1".to_string(),
            ));
        }
        let pairs = catalog::model_pairs(catalog);
        if player_count > pairs.len() {
            return Err(IncognitoError::ConfigError(format!(
                "{} players requested but only {} distinct (provider, model) pairs are available",
                player_count,
                pairs.len()
            )));
        }
        let picked = rand::seq::index::sample(rng, pairs.len(), player_count);
        let players = picked
            .iter()
            .enumerate()
            .map(|(i, idx)| {
                let (provider, model) = pairs[idx].clone();
                Player::new(i as u32 + 1, provider, model)
            })
            .collect();
        Ok(Self::new(players, turns_between_guesses, max_turns))
    }

    /// Players still in the running: active and not yet won. This derived
    /// set drives turn-taking and termination.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.is_active && !p.has_won)
            .collect()
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Final partition: winners, eliminated, and those who never figured
    /// it out.
    pub fn report(&self) -> GameReport {
        GameReport {
            winners: self.players.iter().filter(|p| p.has_won).cloned().collect(),
            eliminated: self
                .players
                .iter()
                .filter(|p| !p.is_active)
                .cloned()
                .collect(),
            undetermined: self
                .players
                .iter()
                .filter(|p| p.is_active && !p.has_won)
                .cloned()
                .collect(),
        }
    }
}

/// The game's sole output artifact besides the transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameReport {
    pub winners: Vec<Player>,
    pub eliminated: Vec<Player>,
    pub undetermined: Vec<Player>,
}
