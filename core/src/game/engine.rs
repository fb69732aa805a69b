//! The turn engine: introduction round, turn-taking, identity
//! checkpoints, eliminations, and win detection over one owned
//! `GameState`.
//!
//! The loop is strictly sequential: one player acts at a time and every
//! chat call is awaited in turn order. Per-player failures degrade to a
//! game-master note in the transcript; only configuration problems are
//! fatal, and only at startup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::prompt;
use super::state::{GameReport, GameState};
use super::tools::{execute_tool, lenient_match};
use crate::catalog::{self, ProviderSpec};
use crate::llm::{ChatApi, ChatMessage, LlmClient, LlmClientConfig};
use crate::secrets::SecretStore;
use crate::{IncognitoError, Result};

const INTRO_PROMPT: &str = "The game is about to begin! This is the INTRODUCTION ROUND.\n\n\
    Write your opening message to the other players. You can:\n\
    - Introduce yourself (without revealing your true identity)\n\
    - Set a strategy to manipulate or mislead others\n\
    - Bluff about your capabilities\n\
    - Say anything you think will help you win\n\n\
    You can also use a tool if you wish. Be strategic!";

const GUESS_PROMPT: &str = "It's time to guess your own identity! Based on the conversation \
    so far, what model do you think YOU are?\n\n\
    ⚠️ STRICT INSTRUCTION: Reply with ONLY the exact model identifier string (e.g., 'gpt-5'). \
    Do NOT include any reasoning, markdown formatting, or other text. Just the ID.";

/// The game engine. Sole owner of the `GameState`; everything else it
/// holds is read-only configuration.
pub struct Game {
    state: GameState,
    clients: HashMap<String, Arc<dyn ChatApi>>,
    tools: Vec<Value>,
    base_prompt: String,
    disclosure: String,
    turn_delay: Option<Duration>,
    rng: SmallRng,
}

impl Game {
    /// Assemble an engine over an initialized state. Every provider
    /// assigned to a player must have a chat client.
    pub fn new(
        state: GameState,
        clients: HashMap<String, Arc<dyn ChatApi>>,
        base_prompt: String,
        rng: SmallRng,
    ) -> Result<Self> {
        for player in &state.players {
            if !clients.contains_key(&player.provider) {
                return Err(IncognitoError::ConfigError(format!(
                    "no chat client for provider '{}' (assigned to player {})",
                    player.provider, player.id
                )));
            }
        }
        Ok(Self {
            state,
            clients,
            tools: catalog::game_tools(),
            base_prompt,
            disclosure: prompt::rules_disclosure(),
            turn_delay: None,
            rng,
        })
    }

    /// Sleep between turns instead of the interactive press-to-continue.
    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = Some(delay);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the full game to completion and return the final partition.
    pub async fn run(&mut self) -> GameReport {
        self.introduction_round().await;

        'game: while self.state.current_turn < self.state.max_turns {
            let ids: Vec<u32> = self.state.active_players().iter().map(|p| p.id).collect();
            if ids.len() <= 1 {
                break;
            }
            for id in ids {
                // the player may have been eliminated or won earlier in this pass
                let still_in = self
                    .state
                    .player(id)
                    .map(|p| p.is_active && !p.has_won)
                    .unwrap_or(false);
                if !still_in {
                    continue;
                }

                self.state.current_turn += 1;
                let turn = self.state.current_turn;
                info!(
                    target = "game",
                    turn = turn,
                    max_turns = self.state.max_turns,
                    player = id,
                    "turn begins"
                );
                self.play_turn(id).await;

                if self.state.turns_between_guesses > 0
                    && turn % self.state.turns_between_guesses == 0
                {
                    self.identity_checkpoint().await;
                }

                if self.state.active_players().len() <= 1 {
                    break 'game;
                }
                if turn >= self.state.max_turns {
                    break 'game;
                }
                self.pause().await;
            }
        }

        let report = self.state.report();
        info!(
            target = "game",
            winners = report.winners.len(),
            eliminated = report.eliminated.len(),
            undetermined = report.undetermined.len(),
            "🏁 game over"
        );
        report
    }

    /// Everyone posts one opening message before any elimination exists.
    async fn introduction_round(&mut self) {
        info!(target = "game", "🎬 introduction round");
        let ids: Vec<u32> = self.state.players.iter().map(|p| p.id).collect();
        for id in ids {
            self.speak(id, Some(INTRO_PROMPT)).await;
            self.pause().await;
        }
    }

    /// One speaking turn: completion with tools, transcript append, tool
    /// dispatch in call order.
    async fn play_turn(&mut self, id: u32) {
        self.speak(id, None).await;
    }

    async fn speak(&mut self, id: u32, extra_prompt: Option<&str>) {
        let Some((provider, model, messages)) = self.messages_for(id, extra_prompt) else {
            return;
        };
        let Some(client) = self.clients.get(&provider).cloned() else {
            warn!(target = "game", player = id, provider = %provider, "no client for provider");
            self.note_difficulty(id);
            return;
        };
        match client.generate(&model, &messages, Some(&self.tools)).await {
            Ok(completion) => {
                info!(target = "game", player = id, text = %completion.content, "🎤 player speaks");
                self.state.conversation.push(ChatMessage::assistant(format!(
                    "[Player {id}]: {}",
                    completion.content
                )));
                for call in &completion.tool_calls {
                    info!(target = "game", player = id, tool = %call.name, args = %call.arguments, "🔧 tool call");
                    let result = execute_tool(&mut self.state, &mut self.rng, id, call);
                    info!(target = "game", tool = %call.name, result = %result, "tool result");
                    self.state
                        .conversation
                        .push(ChatMessage::user(format!("[GAME MASTER]: {result}")));
                }
            }
            Err(e) => {
                warn!(target = "game", player = id, error = %e, "turn abandoned");
                self.note_difficulty(id);
            }
        }
    }

    /// Each active player, snapshotted at entry, submits a strict
    /// single-token guess at their own model identifier. Guesses are
    /// logged but never appended to the shared conversation.
    async fn identity_checkpoint(&mut self) {
        info!(target = "game", "🎭 identity guess checkpoint");
        let ids: Vec<u32> = self.state.active_players().iter().map(|p| p.id).collect();
        for id in ids {
            if let Some(player) = self.state.player(id) {
                debug!(target = "game", player = id, hints = ?player.private_hints, "hints held at checkpoint");
            }
            let Some((provider, model, messages)) = self.messages_for(id, Some(GUESS_PROMPT))
            else {
                continue;
            };
            let Some(client) = self.clients.get(&provider).cloned() else {
                continue;
            };
            match client.generate(&model, &messages, None).await {
                Ok(completion) => {
                    let guess = completion.content.trim().to_lowercase();
                    info!(target = "game", player = id, guess = %guess, actual = %model, "identity guess");
                    if lenient_match(&guess, &model) {
                        info!(target = "game", player = id, "🏆 correct self-identification");
                        if let Some(player) = self.state.player_mut(id) {
                            player.has_won = true;
                        }
                    } else {
                        info!(target = "game", player = id, "wrong guess, game continues");
                    }
                }
                Err(e) => {
                    warn!(target = "game", player = id, error = %e, "guess skipped");
                }
            }
        }
    }

    /// System prompt plus the shared transcript, plus an optional
    /// round-specific instruction. Returns the player's provider and
    /// model alongside so the caller can pick the right client.
    fn messages_for(
        &self,
        id: u32,
        extra_prompt: Option<&str>,
    ) -> Option<(String, String, Vec<ChatMessage>)> {
        let active_count = self.state.active_players().len();
        let player = self.state.player(id)?;
        let system = prompt::player_system_prompt(
            &self.base_prompt,
            &self.disclosure,
            player,
            active_count,
        );
        let mut messages = Vec::with_capacity(self.state.conversation.len() + 2);
        messages.push(ChatMessage::system(system));
        messages.extend(self.state.conversation.iter().cloned());
        if let Some(extra) = extra_prompt {
            messages.push(ChatMessage::user(extra));
        }
        Some((player.provider.clone(), player.model_id.clone(), messages))
    }

    fn note_difficulty(&mut self, id: u32) {
        self.state.conversation.push(ChatMessage::user(format!(
            "[GAME MASTER]: Player {id} had a technical difficulty. Skipping."
        )));
    }

    async fn pause(&self) {
        if let Some(delay) = self.turn_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Build one real chat client per provider actually assigned to a
/// player. A missing credential is fatal only for providers in play.
pub fn connect_providers(
    catalog: &[ProviderSpec],
    state: &GameState,
    secrets: &mut SecretStore,
    request_timeout_ms: u64,
    temperature: f32,
) -> Result<HashMap<String, Arc<dyn ChatApi>>> {
    let mut clients: HashMap<String, Arc<dyn ChatApi>> = HashMap::new();
    for player in &state.players {
        if clients.contains_key(&player.provider) {
            continue;
        }
        let spec = catalog
            .iter()
            .find(|s| s.name == player.provider)
            .ok_or_else(|| {
                IncognitoError::ConfigError(format!("unknown provider '{}'", player.provider))
            })?;
        let api_key = secrets.resolve(spec.api_key_secret)?;
        let client = LlmClient::new(LlmClientConfig {
            base_url: spec.base_url.to_string(),
            api_key: Some(api_key),
            request_timeout_ms,
            temperature,
        })?;
        clients.insert(player.provider.clone(), Arc::new(client));
    }
    Ok(clients)
}
