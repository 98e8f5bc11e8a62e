use crate::error::Result;
use crate::outcome::RequestOutcome;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Performs exactly one request against `url`. Never fails: transport
    /// errors are folded into the returned outcome.
    async fn execute(&self, url: String) -> RequestOutcome;
}

/// Issues real GET requests through a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("lodestone/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, url: String) -> RequestOutcome {
        let started = Instant::now();
        let result = self.client.get(&url).send().await;
        let elapsed = started.elapsed();

        match result {
            // The response (and its body) is released when it goes out of scope here.
            Ok(res) => RequestOutcome::new(url, res.status().as_u16(), elapsed),
            Err(e) => {
                log::debug!("Request to {} failed: {}", url, e);
                RequestOutcome::transport_failure(url, elapsed)
            }
        }
    }
}
