//! Prompt text construction.
//!
//! Pure string builders, kept apart from the session so they can be tested without any request
//! plumbing.

use crate::profile::{Goal, Profile};

/// System prompt every coaching session starts with.
pub const SYSTEM_PROMPT: &str =
    "You are a certified fitness instructor. Provide guidance based on user profile.";

/// Builds the context string sent with every user message.
///
/// `estimate` is the estimated daily energy requirement in kcal.
pub fn build_context(profile: &Profile, estimate: f64, goal: Goal, message: &str) -> String {
    format!(
        "My goal is {goal}. I am {age} years old, weigh {weight} kg, am {height} cm tall, \
         my sex is {sex} and my activity level is {activity}. \
         My estimated daily calories are {estimate} kcal. {message}",
        goal = goal.label().to_lowercase(),
        age = profile.age,
        weight = profile.weight_kg,
        height = profile.height_cm,
        sex = profile.sex.label(),
        activity = profile.activity_tier.label().to_lowercase(),
        message = message.trim(),
    )
}

/// Builds the message introducing the user's profile at the start of a session.
pub fn introduction(profile: &Profile, name: Option<&str>) -> String {
    let mut text = String::from("I have the following personal information: ");
    if let Some(name) = name {
        text.push_str(&format!("my name is {name}, "));
    }
    text.push_str(&format!(
        "age {}, weight {} kg, height {} cm, sex {}, activity level {}.",
        profile.age,
        profile.weight_kg,
        profile.height_cm,
        profile.sex.label(),
        profile.activity_tier.label(),
    ));
    text
}

/// Builds the message shown when a session is reset.
pub fn farewell(name: Option<&str>) -> String {
    format!(
        "Great job today, {}! You've taken another step toward your fitness goals. \
         Remember, consistency is key, keep going strong!",
        name.unwrap_or("my dear friend")
    )
}
