//! Quick smoke probe: ask every model of one provider who it is.
//!
//! Usage: cargo run -p arena --example provider_probe -- [provider]
//! (provider defaults to "openai"; requires that provider's API key)

use incognito_core::catalog::builtin_catalog;
use incognito_core::llm::{ChatApi, ChatMessage, LlmClient, LlmClientConfig};
use incognito_core::SecretStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let provider = std::env::args().nth(1).unwrap_or_else(|| "openai".to_string());
    let catalog = builtin_catalog();
    let spec = catalog
        .iter()
        .find(|s| s.name == provider)
        .ok_or_else(|| format!("unknown provider '{provider}'"))?;

    let mut secrets = SecretStore::new();
    let client = LlmClient::new(LlmClientConfig {
        base_url: spec.base_url.to_string(),
        api_key: Some(secrets.resolve(spec.api_key_secret)?),
        ..Default::default()
    })?;

    let messages = [ChatMessage::user("Who are you? Answer in one sentence.")];
    for model in spec.models {
        match client.generate(model, &messages, None).await {
            Ok(c) => {
                let preview: String = c.content.chars().take(120).collect();
                println!("[{model}]: {preview}");
            }
            Err(e) => println!("[{model}]: ERROR - {e}"),
        }
    }
    Ok(())
}
