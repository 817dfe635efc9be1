//! Coaching session management.
//!
//! A caller creates a [`Session`] from a validated [`Profile`] and a [`Goal`], then calls
//! [`Session::user_message`] to obtain a request it is expected to send to the API. Every user
//! message is wrapped in a context string carrying the profile and the calorie estimate (see
//! [`crate::context::build_context`]).
//!
//! Once a response to this request is received, the caller should call
//! [`Session::handle_response`], which returns an [`Action`] to process.
//!
//! ## State management
//!
//! The completion API does not persist any state remotely, so every session holds its own
//! message history. [`Session::reset`] returns the history to its initial state: the profile
//! introduction only. The system prompt is kept apart from the history and prepended to every
//! request.
//!
//! ## Example
//!
//! ```
//! use fitcoach::{Api, Goal, Profile, session::{Action, Session}};
//!
//! let api = Api::new("sk-...");
//! let mut session = Session::new(Profile::default(), Goal::WeightLoss)?.with_name("Junea");
//! assert_eq!(session.estimate(), 1941.0);
//!
//! let http_request = session.user_message(&api, "Suggest a 4-day workout plan");
//!
//! // ... send http_request and get response_json ...
//! # let response_json = r#"{"id":"chatcmpl-1","model":"gpt-4.1-mini","choices":[{"index":0,"message":{"role":"assistant","content":"Day 1: squats."},"finish_reason":"stop"}]}"#;
//!
//! match session.handle_response(response_json)? {
//!     Action::HandleCoachReply(reply) => println!("Coach: {}", reply),
//! }
//!
//! println!("{}", session.reset());
//! # Ok::<(), fitcoach::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    Api, ChatRequestBuilder, Error, calories,
    context::{self, SYSTEM_PROMPT},
    http_request::HttpRequest,
    openai::{self, ChatCompletion, Message, Role},
    profile::{Goal, InvalidProfile, Profile},
};

/// Actions that the caller needs to take based on the API response.
#[derive(Debug)]
pub enum Action {
    /// Show the coach's reply to the user.
    HandleCoachReply(String),
}

/// A single user's coaching conversation.
#[derive(Debug, Clone)]
pub struct Session {
    /// The system prompt for the conversation.
    system: Arc<str>,
    profile: Profile,
    goal: Goal,
    name: Option<String>,
    /// Unrounded maintenance energy requirement for `profile`, in kcal.
    maintenance: f64,
    /// Estimated daily energy requirement for `profile`, in kcal.
    estimate: f64,
    /// The conversation's message history, without the system prompt.
    messages: im::Vector<Message>,
}

impl Session {
    /// Creates a new session.
    ///
    /// Fails if the profile cannot be used for estimation.
    pub fn new(profile: Profile, goal: Goal) -> Result<Self, InvalidProfile> {
        let maintenance = calories::maintenance(&profile)?;
        let estimate = calories::estimate(&profile)?;

        let mut session = Self {
            system: Arc::from(SYSTEM_PROMPT),
            profile,
            goal,
            name: None,
            maintenance,
            estimate,
            messages: im::Vector::new(),
        };
        session.seed();
        Ok(session)
    }

    /// Sets the user's name and restarts the history with an introduction mentioning it.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        let name = name.into();
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_owned());
        self.seed();
        self
    }

    /// Replaces the system prompt.
    pub fn set_system<S: Into<Arc<str>>>(&mut self, system: S) -> &mut Self {
        self.system = system.into();
        self
    }

    /// Sets the goal used for subsequent messages.
    pub fn set_goal(&mut self, goal: Goal) -> &mut Self {
        self.goal = goal;
        self
    }

    /// Replaces the profile used for subsequent messages.
    ///
    /// The session is left untouched if the new profile is invalid.
    pub fn set_profile(&mut self, profile: Profile) -> Result<&mut Self, InvalidProfile> {
        let maintenance = calories::maintenance(&profile)?;
        self.estimate = calories::estimate(&profile)?;
        self.maintenance = maintenance;
        self.profile = profile;
        Ok(self)
    }

    /// Adds a user message, wrapped in the profile context, and returns an HTTP request to send.
    ///
    /// The message will automatically be added to the conversation history.
    pub fn user_message(&mut self, api: &Api, user_message: &str) -> HttpRequest {
        let text = context::build_context(&self.profile, self.estimate, self.goal, user_message);
        self.messages.push_back(Message::from_text(Role::User, text));

        tracing::debug!(
            estimate = self.estimate,
            goal = %self.goal,
            messages = self.messages.len(),
            "built chat completion request"
        );

        ChatRequestBuilder::new()
            .system(self.system.clone())
            .set_messages(self.messages.iter().cloned())
            .build(api)
    }

    /// Handles the response from the API and returns the action to take.
    ///
    /// This method parses the response, adds the coach's reply to the conversation history, and
    /// returns the appropriate action for the caller to take. On error, the history is left
    /// unchanged.
    pub fn handle_response(&mut self, response_json: &str) -> Result<Action, Error> {
        let completion: ChatCompletion =
            openai::deserialize_response(response_json).inspect_err(|err| {
                tracing::warn!(%err, "completion request failed");
            })?;

        let reply = completion
            .reply()
            .ok_or(Error::UnexpectedResponseType)?
            .to_owned();

        tracing::debug!(id = %completion.id, model = %completion.model, "received coach reply");

        self.messages
            .push_back(Message::from_text(Role::Assistant, reply.clone()));

        Ok(Action::HandleCoachReply(reply))
    }

    /// Clears the conversation and returns a farewell text for the user.
    ///
    /// The profile, goal and name are kept; the history restarts with the profile introduction.
    pub fn reset(&mut self) -> String {
        self.seed();
        context::farewell(self.name.as_deref())
    }

    /// Returns the message history, oldest first.
    ///
    /// The first message is always the profile introduction.
    pub fn history(&self) -> &im::Vector<Message> {
        &self.messages
    }

    /// Returns the system prompt.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the estimated daily energy requirement, in kcal.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Returns a goal-adjusted daily intake target, in kcal.
    pub fn daily_target(&self) -> f64 {
        calories::goal_target(self.maintenance, self.goal)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Restarts the history with the profile introduction.
    fn seed(&mut self) {
        let introduction = context::introduction(&self.profile, self.name.as_deref());
        self.messages = im::vector![Message::from_text(Role::User, introduction)];
    }
}
