use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query sent to the dialog webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRequest {
    pub query: String,
    pub api_key: String,
    pub unit_key: String,
    /// Auxiliary data forwarded to the dialog scenario
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl DialogRequest {
    pub fn new(query: impl Into<String>, api_key: impl Into<String>, unit_key: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            api_key: api_key.into(),
            unit_key: unit_key.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}

/// Reply of the dialog webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    /// Whether the assistant expects the user to answer
    #[serde(default)]
    pub question: Option<bool>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl DialogResponse {
    /// Text to be spoken for this response.
    ///
    /// Joins all text replies, preferring their `tts` variant, and falls back
    /// to the top-level `text` when there are none.
    pub fn speech_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .replies
            .iter()
            .filter_map(|reply| match reply {
                Reply::Text(text) => Some(text.tts.as_deref().unwrap_or(&text.text)),
                _ => None,
            })
            .filter(|s| !s.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.text.clone().filter(|t| !t.trim().is_empty())
        } else {
            Some(parts.join(" "))
        }
    }
}

/// One reply item, selected by the `type` field of the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    Text(TextReply),
    Audio(AudioReply),
    Image(ImageReply),
    Buttons(ButtonsReply),
    /// Reply type this client does not know about
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tts: Option<String>,
    #[serde(rename = "lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioReply {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReply {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonsReply {
    #[serde(default)]
    pub buttons: Vec<ReplyButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}
