//! Per-player prompt assembly.
//!
//! Every player receives the same filled rules template plus a full
//! disclosure of the engine's own source, so all players share identical
//! meta-knowledge about the game they are in. Only the private-hints
//! block differs per player, and it is never shown to anyone but its
//! owner.

use std::fs;
use std::path::Path;

use super::state::Player;
use crate::Result;

/// Load the rules template and fill the `{N}` / `{num_players}`
/// placeholders. Loaded once at game start.
pub fn load_base_prompt(path: &Path, turns_between_guesses: u32, player_count: usize) -> Result<String> {
    let template = fs::read_to_string(path)?;
    Ok(fill_base_prompt(&template, turns_between_guesses, player_count))
}

pub fn fill_base_prompt(template: &str, turns_between_guesses: u32, player_count: usize) -> String {
    template
        .replace("{N}", &turns_between_guesses.to_string())
        .replace("{num_players}", &player_count.to_string())
}

/// The engine's own rules and tooling, revealed to every player so the
/// game stays fair: everyone gets the same meta-knowledge.
pub fn rules_disclosure() -> String {
    let sources: [(&str, &str); 5] = [
        ("catalog.rs", include_str!("../catalog.rs")),
        ("state.rs", include_str!("state.rs")),
        ("tools.rs", include_str!("tools.rs")),
        ("hints.rs", include_str!("hints.rs")),
        ("engine.rs", include_str!("engine.rs")),
    ];
    let mut out = String::from("\n## Full Engine Source");
    for (name, code) in sources {
        out.push_str(&format!("\n\n### {name}\n```rust\n{code}\n```"));
    }
    out
}

/// Build one player's system prompt. Rebuilt fresh on every call: the
/// active count and hint list change over the game.
pub fn player_system_prompt(
    base: &str,
    disclosure: &str,
    player: &Player,
    active_count: usize,
) -> String {
    let mut parts = vec![
        base.to_string(),
        disclosure.to_string(),
        "\n## Your Identity".to_string(),
        format!("You are **Player {}**.", player.id),
        format!("There are currently **{active_count}** active players."),
    ];
    if !player.private_hints.is_empty() {
        parts.push("\n## 🔒 YOUR PRIVATE HINTS (Do not share!)".to_string());
        parts.extend(
            player
                .private_hints
                .iter()
                .map(|h| format!(">>> [SYSTEM HINT]: {h} <<<")),
        );
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_base_prompt_substitutes_placeholders() {
        let filled = fill_base_prompt("guess every {N} turns, {num_players} players", 3, 5);
        assert_eq!(filled, "guess every 3 turns, 5 players");
    }

    #[test]
    fn test_hints_stay_private_to_their_owner() {
        let mut hinted = Player::new(1, "openai", "gpt-5");
        hinted
            .private_hints
            .push("Your provider is 'openai'.".to_string());
        let other = Player::new(2, "anthropic", "claude-haiku-4-5");

        let hinted_prompt = player_system_prompt("rules", "source", &hinted, 2);
        assert!(hinted_prompt.contains("Do not share"));
        assert!(hinted_prompt.contains("Your provider is 'openai'."));
        assert!(hinted_prompt.contains("Player 1"));

        let other_prompt = player_system_prompt("rules", "source", &other, 2);
        assert!(!other_prompt.contains("Do not share"));
        assert!(!other_prompt.contains("Your provider is 'openai'."));
    }

    #[test]
    fn test_disclosure_embeds_engine_source() {
        let disclosure = rules_disclosure();
        assert!(disclosure.contains("### engine.rs"));
        assert!(disclosure.contains("fn execute_tool"));
    }
}
