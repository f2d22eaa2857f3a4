use serde::{Deserialize, Deserializer, Serialize};

use super::ChatMessage;

/// One candidate reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    index: u32,
    message: ChatMessage,
    finish_reason: Option<String>,
}

impl ChatChoice {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn message(&self) -> &ChatMessage {
        &self.message
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.finish_reason.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl ChatUsage {
    pub fn prompt_tokens(&self) -> u32 {
        self.prompt_tokens
    }

    pub fn completion_tokens(&self) -> u32 {
        self.completion_tokens
    }

    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
    }
}

/// Parsed chat-completion response.
///
/// Field names follow the wire format (`object`, `created`, `finish_reason`,
/// `prompt_tokens`, ...). Unknown fields are ignored. The round-trip time is
/// measured by the client and never appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    id: String,
    #[serde(rename = "object")]
    object_type: String,
    created: i64,
    choices: Vec<ChatChoice>,
    #[serde(default, deserialize_with = "null_as_default")]
    usage: ChatUsage,
    #[serde(skip)]
    total_round_trip_millis: f64,
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ChatResponse {
    pub fn with_round_trip_millis(mut self, millis: f64) -> Self {
        self.total_round_trip_millis = millis;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    pub fn created(&self) -> i64 {
        self.created
    }

    pub fn choices(&self) -> &[ChatChoice] {
        &self.choices
    }

    pub fn usage(&self) -> &ChatUsage {
        &self.usage
    }

    pub fn total_round_trip_millis(&self) -> f64 {
        self.total_round_trip_millis
    }

    pub fn first_choice(&self) -> Option<&ChatChoice> {
        self.choices.first()
    }

    /// Reply text of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.first_choice().map(|c| c.message().content())
    }
}
