//! Chat completion API related types.
//!
//! This module contains types that match an OpenAI-compatible `chat/completions` endpoint.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default API endpoint host to use.
pub const DEFAULT_ENDPOINT_HOST: &str = "api.openai.com";

/// Path of the chat completions endpoint.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Default model to use for requests.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// The body of a request to the chat completions endpoint.
///
/// Usually it is better to use [`crate::ChatRequestBuilder`] instead of constructing this
/// directly.
#[derive(Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    /// The model to use for the request.
    pub model: &'a str,
    /// Upper bound for the number of tokens generated.
    pub max_completion_tokens: u32,
    /// The messages to include in the request, system prompt first.
    ///
    /// `Arc`s allow for cheaply copying conversations.
    #[serde(serialize_with = "serialize_arc_slice")]
    pub messages: &'a [Arc<Message>],
}

/// A role in a conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Instructions for the model, usually the first message.
    System,
    /// Message from the user.
    User,
    /// Message from the model.
    Assistant,
}

/// A single message in a conversation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Convenience function to construct a message from text.
    pub fn from_text<S: Into<String>>(role: Role, text: S) -> Self {
        Self {
            role,
            content: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Chat completion API error.
///
/// Errors reported by the remote service, does not include parsing or transport errors.
#[derive(Clone, Debug, thiserror::Error, Deserialize, Serialize)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Human-readable description.
    pub message: String,
    /// Error category, e.g. `invalid_request_error`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The request parameter at fault, if any.
    #[serde(default)]
    pub param: Option<String>,
    /// Machine-readable error code, e.g. `invalid_api_key`.
    #[serde(default)]
    pub code: Option<String>,
}

/// A response from the API.
///
/// This is the "top-level" type for a response body.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// An error response from the API.
    Error { error: ApiError },
    /// A response to a chat completion request.
    ChatCompletion(ChatCompletion),
}

impl TryFrom<ApiResponse> for ChatCompletion {
    type Error = ();

    fn try_from(response: ApiResponse) -> Result<Self, Self::Error> {
        match response {
            ApiResponse::ChatCompletion(completion) => Ok(completion),
            ApiResponse::Error { error: _ } => Err(()),
        }
    }
}

/// Deserializes an API response from JSON.
pub fn deserialize_response<T>(json: &str) -> Result<T, Error>
where
    T: TryFrom<ApiResponse>,
{
    let api_response: ApiResponse = serde_json::from_str(json)?;

    if let ApiResponse::Error { error } = &api_response {
        return Err(Error::Api(error.clone()));
    }

    T::try_from(api_response).map_err(|_| Error::UnexpectedResponseType)
}

/// A successful chat completion.
#[derive(Debug, Deserialize, Serialize)]
pub struct ChatCompletion {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Returns the text of the first choice, if the model produced any.
    pub fn reply(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// One of possibly several alternative completions.
#[derive(Debug, Deserialize, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A message as returned by the API.
///
/// Unlike [`Message`], the content may be absent, e.g. for refusals.
#[derive(Debug, Deserialize, Serialize)]
pub struct ResponseMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

fn serialize_arc_slice<S>(messages: &&[Arc<Message>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(messages.len()))?;
    for message in messages.iter() {
        seq.serialize_element(&**message)?;
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::{ChatCompletion, Role, deserialize_response};
    use crate::Error;

    #[test]
    fn test_chat_completion_deserialization() {
        let json = r#"{
  "id": "chatcmpl-B9MBs8CjcvOU2jLn4n570S5qMJKcT",
  "object": "chat.completion",
  "created": 1741569952,
  "model": "gpt-4.1-mini-2025-04-14",
  "choices": [
    {
      "index": 0,
      "message": {
        "role": "assistant",
        "content": "Aim for three full-body sessions a week.",
        "refusal": null,
        "annotations": []
      },
      "logprobs": null,
      "finish_reason": "stop"
    }
  ],
  "usage": {
    "prompt_tokens": 19,
    "completion_tokens": 10,
    "total_tokens": 29
  }
}"#;

        let completion: ChatCompletion =
            deserialize_response(json).expect("should deserialize chat completion");

        assert_eq!(completion.id, "chatcmpl-B9MBs8CjcvOU2jLn4n570S5qMJKcT");
        assert_eq!(completion.model, "gpt-4.1-mini-2025-04-14");
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].message.role, Role::Assistant);
        assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(
            completion.reply(),
            Some("Aim for three full-body sessions a week.")
        );

        let usage = completion.usage.expect("usage should be present");
        assert_eq!(usage.total_tokens, 29);
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
  "error": {
    "message": "Incorrect API key provided: sk-test.",
    "type": "invalid_request_error",
    "param": null,
    "code": "invalid_api_key"
  }
}"#;

        let result: Result<ChatCompletion, _> = deserialize_response(json);

        let Err(Error::Api(api_error)) = result else {
            panic!("expected API error");
        };
        assert_eq!(api_error.kind, "invalid_request_error");
        assert_eq!(api_error.code.as_deref(), Some("invalid_api_key"));
        assert_eq!(
            api_error.to_string(),
            "invalid_request_error: Incorrect API key provided: sk-test."
        );
    }

    #[test]
    fn test_garbage_is_a_serde_error() {
        let result: Result<ChatCompletion, _> = deserialize_response("<html>bad gateway</html>");
        assert!(matches!(result, Err(Error::Serde(_))));
    }

    #[test]
    fn test_missing_content_has_no_reply() {
        let json = r#"{"id":"x","model":"m","choices":[{"index":0,"message":{"role":"assistant","content":null,"refusal":"no"},"finish_reason":"stop"}]}"#;
        let completion: ChatCompletion = deserialize_response(json).expect("should deserialize");
        assert_eq!(completion.reply(), None);
        assert_eq!(completion.choices[0].message.refusal.as_deref(), Some("no"));
    }
}
