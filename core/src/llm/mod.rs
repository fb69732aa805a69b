//! LLM module: chat types and the OpenAI-compatible HTTP client
//!
//! This module provides:
//! - `ChatMessage`/`Role`, the shared transcript currency
//! - `ChatApi`, the single generate capability, implemented once per
//!   backend configuration by `LlmClient`
//! - chat-completions JSON helpers for text and tool-call extraction

mod client;

pub use client::{
    extract_text_from_chat, parse_tool_calls_from_chat, ChatApi, ChatMessage, Completion,
    LlmClient, LlmClientConfig, Role, ToolCallRequest,
};
