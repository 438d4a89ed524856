use serde::{Deserialize, Serialize};

/// Error payload shapes the backend emits on non-success responses.
///
/// Upload failures carry one of `error`, `details` or `message`; a roster
/// request against a malformed CSV answers with an `errors` list instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ApiErrorBody {
    /// Returns `None` when the body is not a JSON object.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// First present of `error`, `details`, `message`, in that order.
    pub fn first_message(&self) -> Option<&str> {
        [&self.error, &self.details, &self.message]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|message| !message.trim().is_empty())
    }

    pub fn first_listed_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}
