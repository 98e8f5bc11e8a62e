use serde::{Deserialize, Serialize};
use validator::Validate;

/// What to hit, how many times, and with how many concurrent workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoadTestOptions {
    /// Not validated: a bad url shows up as transport failures in the report.
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_requests")]
    pub requests: usize,

    #[serde(default = "default_clients")]
    #[validate(range(min = 1))]
    pub clients: usize,
}

impl Default for LoadTestOptions {
    fn default() -> Self {
        Self {
            url: String::new(),
            requests: default_requests(),
            clients: default_clients(),
        }
    }
}

fn default_requests() -> usize {
    1
}

fn default_clients() -> usize {
    1
}
