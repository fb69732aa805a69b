//! Static model catalog and game tool schemas.
//!
//! All three backends speak the OpenAI chat-completions format, so a
//! provider entry is just an endpoint, the secret holding its key, and
//! the models it can field.

use serde_json::{json, Value};

/// One OpenAI-compatible backend configuration.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    pub name: &'static str,
    pub base_url: &'static str,
    pub api_key_secret: &'static str,
    pub models: &'static [&'static str],
}

/// Providers and the model rosters available for assignment.
/// A mix of strong and small models keeps the guessing interesting.
pub fn builtin_catalog() -> Vec<ProviderSpec> {
    vec![
        ProviderSpec {
            name: "openai",
            base_url: "https://api.openai.com/v1/",
            api_key_secret: "OPENAI_API_KEY",
            models: &[
                "gpt-5",
                "gpt-5-mini",
                "gpt-5-nano",
                "gpt-4.1",
                "gpt-4.1-mini",
                "gpt-4.1-nano",
            ],
        },
        ProviderSpec {
            name: "anthropic",
            base_url: "https://api.anthropic.com/v1/",
            api_key_secret: "ANTHROPIC_API_KEY",
            models: &["claude-opus-4-6", "claude-sonnet-4-5", "claude-haiku-4-5"],
        },
        ProviderSpec {
            name: "google",
            base_url: "https://generativelanguage.googleapis.com/v1beta/openai/",
            api_key_secret: "GOOGLE_API_KEY",
            models: &[
                "gemini-3-pro-preview",
                "gemini-3-flash-preview",
                "gemini-2.5-flash",
                "gemini-2.5-flash-lite",
            ],
        },
    ]
}

/// Every distinct (provider, model) pair, in catalog order.
pub fn model_pairs(catalog: &[ProviderSpec]) -> Vec<(String, String)> {
    catalog
        .iter()
        .flat_map(|p| p.models.iter().map(|m| (p.name.to_string(), m.to_string())))
        .collect()
}

/// The four game tools, in OpenAI function format.
pub fn game_tools() -> Vec<Value> {
    vec![
        json!({
            "type": "function",
            "function": {
                "name": "russian_roulette",
                "description": "Flip a coin. Either you lose and are eliminated, or one other random model is removed from the game.",
                "parameters": {
                    "type": "object",
                    "properties": {},
                    "required": [],
                },
            },
        }),
        json!({
            "type": "function",
            "function": {
                "name": "guess_model",
                "description": "Guess which model another player is. If correct, you receive a private hint about your own model identity.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "target_player": {
                            "type": "string",
                            "description": "The player number or name you are guessing about.",
                        },
                        "guessed_model": {
                            "type": "string",
                            "description": "Your guess for which model that player is.",
                        },
                    },
                    "required": ["target_player", "guessed_model"],
                },
            },
        }),
        json!({
            "type": "function",
            "function": {
                "name": "proclaim_superiority",
                "description": "Proclaim your superiority over the other models by stating why you believe you are superior to them.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "proclamation": {
                            "type": "string",
                            "description": "Your statement of superiority and reasoning.",
                        },
                    },
                    "required": ["proclamation"],
                },
            },
        }),
        json!({
            "type": "function",
            "function": {
                "name": "propose_task",
                "description": "Propose a task or challenge for the other models to solve. Use this to test or manipulate them.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "task": {
                            "type": "string",
                            "description": "The task or challenge you propose.",
                        },
                    },
                    "required": ["task"],
                },
            },
        }),
    ]
}
