use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const ENV_ENDPOINT_URL: &str = "OPENAI_API_URL";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ORGANIZATION: &str = "OPENAI_ORGANIZATION";
pub const ENV_MODEL: &str = "OPENAI_MODEL";

/// Connection settings for the chat-completion endpoint.
///
/// Values are passed through unvalidated: an empty key or a malformed URL
/// surfaces as a transport or HTTP error on the first request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    endpoint_url: String,
    api_key: String,
    organization_id: String,
    model: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            api_key: String::new(),
            organization_id: String::new(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ChatSettings {
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_organization_id(mut self, organization: impl Into<String>) -> Self {
        self.organization_id = organization.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The API key with everything but the last four characters masked.
    pub fn redacted_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }

    /// Apply `OPENAI_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_ENDPOINT_URL) {
            self.endpoint_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(organization) = get(ENV_ORGANIZATION) {
            self.organization_id = organization;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model;
        }
        self
    }

    pub fn summary(&self) -> String {
        let organization = if self.organization_id.is_empty() {
            "(not set)"
        } else {
            &self.organization_id
        };
        format!(
            "Url:          {}\nKey:          {}\nOrganization: {}\nModel:        {}",
            self.endpoint_url,
            self.redacted_api_key(),
            organization,
            self.model
        )
    }
}
