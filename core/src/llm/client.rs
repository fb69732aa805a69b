use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use crate::{IncognitoError, Result};

/// Message roles in the shared transcript (OpenAI chat format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged entry in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Normalized tool call parsed from model output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: Option<String>,
    pub name: String,
    pub arguments: Value,
}

/// Assistant text plus any requested tool invocations
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

/// The single generate capability every backend offers.
///
/// One implementation per backend *configuration* (base URL + key), not
/// per backend kind; all supported providers expose the same endpoint
/// shape. Must tolerate tool-less calls and surface provider failures as
/// a catchable error.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> Result<Completion>;
}

/// Configuration for one OpenAI-compatible backend
#[derive(Debug, Clone)]
pub struct LlmClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    pub temperature: f32,
}

impl Default for LlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: None,
            request_timeout_ms: 30_000,
            temperature: 0.7,
        }
    }
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    cfg: LlmClientConfig,
}

impl LlmClient {
    pub fn new(cfg: LlmClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| IncognitoError::ChatError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }
}

#[async_trait]
impl ChatApi for LlmClient {
    /// Generate a completion.
    /// Contract:
    /// - Input: role-tagged messages + optional tool schemas
    /// - Output: assistant text plus normalized tool calls
    /// - Error: network/status/parse failures surface as `ChatError`
    async fn generate(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> Result<Completion> {
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        debug!(target = "llm_client", model = %model, "POST {}", url);

        let mut req = self
            .http
            .post(&url)
            .header("content-type", "application/json");
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": self.cfg.temperature,
        });
        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            body["tools"] = Value::Array(tools.to_vec());
            body["tool_choice"] = json!("auto");
        }

        let resp = req.json(&body).send().await.map_err(|e| {
            IncognitoError::ChatError(format!("Chat Completions request failed: {e}"))
        })?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            error!(target = "llm_client", %status, body = %text, "Chat Completions error");
            return Err(IncognitoError::ChatError(format!(
                "Chat Completions error: status={} body={}",
                status, text
            )));
        }

        let val: Value = resp.json().await.map_err(|e| {
            IncognitoError::ChatError(format!("Failed to parse Chat Completions JSON: {e}"))
        })?;
        Ok(Completion {
            // content is null when the model only calls tools
            content: extract_text_from_chat(&val).unwrap_or_default(),
            tool_calls: parse_tool_calls_from_chat(&val),
        })
    }
}

pub fn extract_text_from_chat(v: &Value) -> Option<String> {
    v.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

/// Parse `choices[0].message.tool_calls`, tolerating string-encoded
/// argument JSON (providers disagree on this).
pub fn parse_tool_calls_from_chat(v: &Value) -> Vec<ToolCallRequest> {
    let mut calls = Vec::new();
    if let Some(arr) = v.get("choices").and_then(|x| x.as_array()) {
        if let Some(first) = arr.first() {
            if let Some(tc_arr) = first
                .get("message")
                .and_then(|m| m.get("tool_calls"))
                .and_then(|x| x.as_array())
            {
                for tc in tc_arr {
                    let id = tc.get("id").and_then(|x| x.as_str()).map(|s| s.to_string());
                    if let Some(func) = tc.get("function") {
                        let name = func
                            .get("name")
                            .and_then(|n| n.as_str())
                            .unwrap_or("")
                            .to_string();
                        let args = match func.get("arguments") {
                            Some(Value::String(s)) => {
                                serde_json::from_str::<Value>(s).unwrap_or(json!({}))
                            }
                            Some(v) => v.clone(),
                            None => json!({}),
                        };
                        if !name.is_empty() {
                            calls.push(ToolCallRequest {
                                id,
                                name,
                                arguments: args,
                            });
                        }
                    }
                }
            }
        }
    }
    calls
}
