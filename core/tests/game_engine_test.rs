use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use incognito_core::catalog::builtin_catalog;
use incognito_core::game::{Game, GameState, Player};
use incognito_core::llm::{ChatApi, ChatMessage, Completion};
use incognito_core::{IncognitoError, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::Value;

/// Always answers with the model's own identifier and no tool calls.
struct EchoIdentity;

#[async_trait]
impl ChatApi for EchoIdentity {
    async fn generate(
        &self,
        model: &str,
        _messages: &[ChatMessage],
        _tools: Option<&[Value]>,
    ) -> Result<Completion> {
        Ok(Completion {
            content: model.to_string(),
            tool_calls: vec![],
        })
    }
}

/// Fails every call, simulating a provider outage.
struct AlwaysDown;

#[async_trait]
impl ChatApi for AlwaysDown {
    async fn generate(
        &self,
        _model: &str,
        _messages: &[ChatMessage],
        _tools: Option<&[Value]>,
    ) -> Result<Completion> {
        Err(IncognitoError::ChatError("stubbed outage".to_string()))
    }
}

fn two_player_state(interval: u32, max_turns: u32) -> GameState {
    GameState::new(
        vec![
            Player::new(1, "openai", "gpt-5"),
            Player::new(2, "anthropic", "claude-haiku-4-5"),
        ],
        interval,
        max_turns,
    )
}

#[test]
fn test_initialize_assigns_distinct_pairs() {
    let catalog = builtin_catalog();
    let mut rng = SmallRng::seed_from_u64(42);
    let state = GameState::initialize(&catalog, 5, 3, 15, &mut rng).unwrap();

    assert_eq!(state.players.len(), 5);
    let ids: Vec<u32> = state.players.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let mut pairs = std::collections::HashSet::new();
    for p in &state.players {
        assert!(
            pairs.insert((p.provider.clone(), p.model_id.clone())),
            "duplicate assignment for player {}",
            p.id
        );
        assert!(p.is_active && !p.has_won && p.private_hints.is_empty());
    }
}

#[test]
fn test_initialize_rejects_oversubscription() {
    let catalog = builtin_catalog();
    let available: usize = catalog.iter().map(|p| p.models.len()).sum();
    let mut rng = SmallRng::seed_from_u64(42);
    let err = GameState::initialize(&catalog, available + 1, 3, 15, &mut rng).unwrap_err();
    assert!(matches!(err, IncognitoError::ConfigError(_)));
}

#[test]
fn test_initialize_rejects_zero_interval() {
    let catalog = builtin_catalog();
    let mut rng = SmallRng::seed_from_u64(42);
    let err = GameState::initialize(&catalog, 2, 0, 15, &mut rng).unwrap_err();
    assert!(matches!(err, IncognitoError::ConfigError(_)));
}

#[test]
fn test_engine_requires_a_client_per_assigned_provider() {
    let state = two_player_state(1, 2);
    let mut clients: HashMap<String, Arc<dyn ChatApi>> = HashMap::new();
    clients.insert("openai".to_string(), Arc::new(EchoIdentity));
    let err = Game::new(state, clients, "rules".to_string(), SmallRng::seed_from_u64(1))
        .err()
        .unwrap();
    assert!(matches!(err, IncognitoError::ConfigError(_)));
}

#[tokio::test]
async fn test_echo_players_win_at_first_checkpoint() {
    let state = two_player_state(1, 2);
    let mut clients: HashMap<String, Arc<dyn ChatApi>> = HashMap::new();
    clients.insert("openai".to_string(), Arc::new(EchoIdentity));
    clients.insert("anthropic".to_string(), Arc::new(EchoIdentity));

    let mut game = Game::new(state, clients, "rules".to_string(), SmallRng::seed_from_u64(1))
        .unwrap();
    let report = game.run().await;

    assert_eq!(report.winners.len(), 2);
    assert!(report.eliminated.is_empty());
    assert!(report.undetermined.is_empty());
    // both won at the checkpoint after turn 1, well before max_turns
    assert_eq!(game.state().current_turn, 1);
}

#[tokio::test]
async fn test_provider_outage_degrades_to_difficulty_note() {
    let state = two_player_state(1, 4);
    let mut clients: HashMap<String, Arc<dyn ChatApi>> = HashMap::new();
    clients.insert("openai".to_string(), Arc::new(EchoIdentity));
    clients.insert("anthropic".to_string(), Arc::new(AlwaysDown));

    let mut game = Game::new(state, clients, "rules".to_string(), SmallRng::seed_from_u64(1))
        .unwrap();
    let report = game.run().await;

    let p2 = game.state().player(2).unwrap();
    assert!(p2.is_active && !p2.has_won);
    assert!(game
        .state()
        .conversation
        .iter()
        .any(|m| m.content.contains("Player 2 had a technical difficulty")));
    assert_eq!(report.winners.len(), 1);
    assert_eq!(report.winners[0].id, 1);
    assert_eq!(report.undetermined.len(), 1);
    assert_eq!(report.undetermined[0].id, 2);
}

#[tokio::test]
async fn test_transcript_tags_speakers() {
    let state = two_player_state(2, 2);
    let mut clients: HashMap<String, Arc<dyn ChatApi>> = HashMap::new();
    clients.insert("openai".to_string(), Arc::new(EchoIdentity));
    clients.insert("anthropic".to_string(), Arc::new(EchoIdentity));

    let mut game = Game::new(state, clients, "rules".to_string(), SmallRng::seed_from_u64(1))
        .unwrap();
    game.run().await;

    // introduction round posts one tagged message per player
    let conversation = &game.state().conversation;
    assert!(conversation
        .iter()
        .any(|m| m.content.starts_with("[Player 1]: ")));
    assert!(conversation
        .iter()
        .any(|m| m.content.starts_with("[Player 2]: ")));
}
