#![doc = include_str!("../README.md")]

pub mod calories;
pub mod config;
pub mod context;
pub mod http_request;
pub mod meal_plan;
pub mod openai;
pub mod profile;
pub mod session;

use std::sync::Arc;

pub use calories::estimate;
pub use http_request::HttpRequest;
pub use openai::{Role, deserialize_response};
pub use profile::{ActivityTier, Goal, InvalidProfile, Profile, Sex};

use openai::ChatCompletionBody;

/// A chat completion API configuration.
#[derive(Debug, Clone)]
pub struct Api {
    /// The API key, sent as a bearer token.
    api_key: Arc<str>,
    /// The default model to use for requests.
    default_model: Arc<str>,
    /// The default maximum number of tokens for responses.
    default_max_tokens: u32,
    /// The API endpoint host (without protocol or path).
    endpoint_host: Arc<str>,
}

impl Api {
    /// Creates a new API instance.
    ///
    /// Requires a valid API key.
    pub fn new<S: Into<Arc<str>>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            default_model: Arc::from(openai::DEFAULT_MODEL),
            default_max_tokens: 1024,
            endpoint_host: Arc::from(openai::DEFAULT_ENDPOINT_HOST),
        }
    }

    /// Sets the default model for requests.
    ///
    /// If not set, [`openai::DEFAULT_MODEL`] will be used.
    pub fn default_model<S: Into<Arc<str>>>(mut self, model: S) -> Self {
        self.default_model = model.into();
        self
    }

    /// Sets the default maximum tokens for responses.
    ///
    /// If not set, the default is 1024.
    pub fn default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    /// Sets the API endpoint host.
    ///
    /// If not set, [`openai::DEFAULT_ENDPOINT_HOST`] will be used.
    pub fn endpoint_host<S: Into<Arc<str>>>(mut self, endpoint_host: S) -> Self {
        self.endpoint_host = endpoint_host.into();
        self
    }

    /// Creates the required headers for any API request.
    fn create_default_headers(&self) -> Vec<(&'static str, Arc<str>)> {
        vec![
            ("content-type", Arc::from("application/json")),
            (
                "authorization",
                Arc::from(format!("Bearer {}", self.api_key.trim())),
            ),
        ]
    }
}

/// Builder for a single chat completion request.
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    /// The model to use for the request.
    ///
    /// If none is provided, the default model will be used.
    model: Option<String>,
    /// The maximum number of tokens for the response.
    ///
    /// If none is provided, the default max tokens will be used.
    max_tokens: Option<u32>,
    /// The system prompt, sent as the first message.
    system: Option<Arc<str>>,
    /// The messages to send.
    messages: Vec<Arc<openai::Message>>,
}

impl ChatRequestBuilder {
    /// Creates a new chat request builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model for the request.
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum tokens for the request.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the system prompt for the request.
    pub fn system<S: Into<Arc<str>>>(mut self, system: S) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Appends a message to the request.
    pub fn push<M: Into<Arc<openai::Message>>>(mut self, message: M) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Constructs and appends a message to the request.
    pub fn push_message<S: Into<String>>(self, role: Role, text: S) -> Self {
        self.push(openai::Message::from_text(role, text))
    }

    /// Replace all messages in the request with given messages.
    pub fn set_messages<I>(mut self, messages: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arc<openai::Message>>,
    {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the HTTP request.
    pub fn build(&self, api: &Api) -> HttpRequest {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(system) = &self.system {
            messages.push(Arc::new(openai::Message::from_text(
                Role::System,
                system.to_string(),
            )));
        }
        messages.extend(self.messages.iter().cloned());

        let body = ChatCompletionBody {
            model: self.model.as_deref().unwrap_or(&api.default_model),
            max_completion_tokens: self.max_tokens.unwrap_or(api.default_max_tokens),
            messages: &messages,
        };

        HttpRequest {
            host: api.endpoint_host.to_string(),
            path: openai::CHAT_COMPLETIONS_PATH.to_string(),
            method: "POST",
            headers: api.create_default_headers(),
            body: serde_json::to_string(&body).expect("failed to serialize messages"),
        }
    }
}

/// A crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("API error: {0}")]
    Api(#[from] openai::ApiError),
    #[error("Unexpected response type")]
    UnexpectedResponseType,
    #[error("Invalid profile: {0}")]
    Profile(#[from] InvalidProfile),
}
