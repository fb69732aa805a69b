//! Progressive identity hints, earned through correct guesses about
//! other players.

use rand::prelude::IndexedRandom;
use rand::Rng;

use super::state::Player;

/// Returned once a player has been issued all five hint templates.
pub const HINTS_EXHAUSTED: &str = "No more hints available: you have seen them all!";

/// Keywords marking a model id as a flagship-tier model.
const FLAGSHIP_KEYWORDS: [&str; 3] = ["pro", "opus", "5.2"];

/// Produce one hint about the player's own identity, chosen uniformly
/// among the templates not yet issued to that player. Callers append the
/// result to the player's hint list; the dedup below keys off that list,
/// so a given template is issued at most once.
pub fn generate_hint(rng: &mut impl Rng, player: &Player) -> String {
    let lower = player.model_id.to_lowercase();
    let chars: Vec<char> = player.model_id.chars().collect();
    let middle: String = chars[chars.len() / 3..2 * chars.len() / 3].iter().collect();
    let size_class = if FLAGSHIP_KEYWORDS.iter().any(|k| lower.contains(k)) {
        "a flagship/large"
    } else {
        "a smaller/efficient"
    };

    let candidates = [
        format!("Your provider is '{}'.", player.provider),
        format!("Your model name has {} characters.", chars.len()),
        format!(
            "The first letter of your model ID is '{}'.",
            chars.first().copied().unwrap_or('?')
        ),
        format!("You are {} model.", size_class),
        format!("Your model ID contains the substring '{}'.", middle),
    ];

    let unseen: Vec<&String> = candidates
        .iter()
        .filter(|h| !player.private_hints.contains(*h))
        .collect();
    match unseen.choose(rng) {
        Some(hint) => (*hint).clone(),
        None => HINTS_EXHAUSTED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_hints_unique_until_exhausted() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut player = Player::new(1, "openai", "gpt-5-nano");
        for _ in 0..5 {
            let hint = generate_hint(&mut rng, &player);
            assert!(
                !player.private_hints.contains(&hint),
                "repeated hint {:?}",
                hint
            );
            player.private_hints.push(hint);
        }
        assert_eq!(player.private_hints.len(), 5);
        assert_eq!(generate_hint(&mut rng, &player), HINTS_EXHAUSTED);
    }

    #[test]
    fn test_size_classification() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut player = Player::new(1, "anthropic", "claude-opus-4-6");
        let mut saw_flagship = false;
        for _ in 0..5 {
            let hint = generate_hint(&mut rng, &player);
            saw_flagship |= hint.contains("flagship/large");
            player.private_hints.push(hint);
        }
        assert!(saw_flagship);
    }
}
