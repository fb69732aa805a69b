// Incognito Core Library
// Turn-based masquerade game where LLM players deduce their own identity

pub mod catalog;
pub mod game;
pub mod llm;
pub mod secrets;

// Export core types
pub use game::{Game, GameReport, GameState, Player};
pub use llm::{ChatApi, ChatMessage, Completion, LlmClient, LlmClientConfig, Role, ToolCallRequest};
pub use secrets::SecretStore;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IncognitoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing secret: {0}")]
    MissingSecret(String),

    #[error("Chat client error: {0}")]
    ChatError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
pub type Result<T> = std::result::Result<T, IncognitoError>;
