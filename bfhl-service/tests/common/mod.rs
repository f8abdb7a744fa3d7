use bfhl_service::config::{AiConfig, AiProviderKind, BfhlConfig, GeminiSettings, ObservabilityConfig};
use bfhl_service::services::providers::TextProvider;
use bfhl_service::startup::{AppState, Application};
use std::sync::Arc;

pub const TEST_EMAIL: &str = "student@example.edu";
pub const TEST_API_KEY: &str = "test-api-key";

/// Configuration for an app on a random port backed by the mock provider.
pub fn test_config() -> BfhlConfig {
    BfhlConfig {
        common: service_core::config::Config { port: 0 },
        official_email: TEST_EMAIL.to_string(),
        ai: AiConfig {
            provider: AiProviderKind::Mock,
            gemini: GeminiSettings::with_defaults(TEST_API_KEY),
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

/// Configuration that sends `AI` requests to a Gemini stub at `api_base`.
pub fn gemini_config(api_base: &str, api_key: &str) -> BfhlConfig {
    let mut config = test_config();
    config.ai.provider = AiProviderKind::Gemini;
    config.ai.gemini.api_base = api_base.to_string();
    config.ai.gemini.api_key = secrecy::Secret::new(api_key.to_string());
    config.ai.gemini.timeout_secs = 5;
    config
}

pub fn test_state(provider: Arc<dyn TextProvider>) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        text_provider: provider,
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    pub async fn spawn_with(config: BfhlConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_bfhl(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/bfhl", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
