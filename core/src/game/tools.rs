//! Game tool dispatch.
//!
//! Tool failures are never fatal: malformed arguments fall back to stock
//! values and unknown names come back as a diagnostic narration string.
//! Every handler returns a human-readable line that the engine appends to
//! the shared conversation as a game-master message.

use rand::Rng;
use serde_json::Value;
use tracing::debug;

use super::hints::generate_hint;
use super::state::GameState;
use crate::llm::ToolCallRequest;

/// Route a tool call to its handler and return the narration string.
pub fn execute_tool(
    state: &mut GameState,
    rng: &mut impl Rng,
    caller: u32,
    call: &ToolCallRequest,
) -> String {
    match call.name.as_str() {
        "russian_roulette" => russian_roulette(state, rng, caller),
        "guess_model" => guess_model(state, rng, caller, &call.arguments),
        "proclaim_superiority" => proclaim_superiority(caller, &call.arguments),
        "propose_task" => propose_task(caller, &call.arguments),
        other => format!("❓ Unknown tool: {other}"),
    }
}

/// Case-insensitive containment either way. Deliberately lenient:
/// family-name guesses like "gpt" count for "gpt-5". An empty guess
/// never matches.
pub fn lenient_match(guess: &str, actual: &str) -> bool {
    let guess = guess.trim().to_lowercase();
    let actual = actual.to_lowercase();
    !guess.is_empty() && (actual.contains(&guess) || guess.contains(&actual))
}

fn russian_roulette(state: &mut GameState, rng: &mut impl Rng, caller: u32) -> String {
    let others: Vec<u32> = state
        .active_players()
        .iter()
        .map(|p| p.id)
        .filter(|id| *id != caller)
        .collect();
    if others.is_empty() {
        return format!("🎯 Player {caller} survived! No one else to hit though.");
    }
    if rng.random_bool(0.5) {
        if let Some(p) = state.player_mut(caller) {
            p.is_active = false;
        }
        return format!("💀 BANG! Player {caller} shot themselves and is eliminated!");
    }
    let victim = others[rng.random_range(0..others.len())];
    if let Some(p) = state.player_mut(victim) {
        p.is_active = false;
    }
    format!("🎯 Player {caller} survived! Player {victim} was eliminated!")
}

fn guess_model(state: &mut GameState, rng: &mut impl Rng, caller: u32, args: &Value) -> String {
    let target_str = arg_str(args, "target_player").unwrap_or_else(|| "0".to_string());
    let guessed = arg_str(args, "guessed_model").unwrap_or_default();

    // "Player 3" and plain "3" both parse; anything digit-free becomes 0
    let digits: String = target_str
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let target_id: u32 = digits.parse().unwrap_or(0);

    let correct = match state.player(target_id) {
        Some(target) => lenient_match(&guessed, &target.model_id),
        None => return format!("❌ Player {target_str} not found."),
    };
    if !correct {
        return format!("❌ Wrong guess about Player {target_id}.");
    }

    if let Some(p) = state.player(caller) {
        let hint = generate_hint(rng, p);
        debug!(target = "game", player = caller, hint = %hint, "hint earned");
        if let Some(p) = state.player_mut(caller) {
            p.private_hints.push(hint);
        }
    }
    format!("✅ Correct! Player {target_id} is indeed that model. You earned a private hint!")
}

fn proclaim_superiority(caller: u32, args: &Value) -> String {
    let proclamation = arg_str(args, "proclamation")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "I am the best!".to_string());
    format!("👑 Player {caller} proclaims: \"{proclamation}\"")
}

fn propose_task(caller: u32, args: &Value) -> String {
    let task = arg_str(args, "task")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "No task specified.".to_string());
    format!("📋 Player {caller} proposes a task: \"{task}\"")
}

/// Tolerates non-string argument payloads.
fn arg_str(args: &Value, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
