//! Daily energy requirement estimation.
//!
//! Uses the Mifflin-St Jeor equation for the basal metabolic rate:
//!
//! ```text
//! bmr = 10 * weight_kg + 6.25 * height_cm - 5 * age + s
//! ```
//!
//! where `s` is `+5` for males and `-161` for females. The result is scaled by the
//! [`ActivityTier::multiplier`](crate::profile::ActivityTier::multiplier) and rounded to two
//! decimal places, ties to even (`2507.125` becomes `2507.12`).
//!
//! Every function here is pure and may be called from any thread.

use crate::profile::{Goal, InvalidProfile, Profile, Sex};

/// Sex-specific constant of the Mifflin-St Jeor equation.
fn sex_offset(sex: Sex) -> f64 {
    match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    }
}

/// Rounds to two decimal places, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Calculates the basal metabolic rate in kcal/day, unrounded.
pub fn bmr(profile: &Profile) -> Result<f64, InvalidProfile> {
    profile.validate()?;

    Ok(10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age)
        + sex_offset(profile.sex))
}

/// Calculates the maintenance energy requirement in kcal/day, unrounded.
pub fn maintenance(profile: &Profile) -> Result<f64, InvalidProfile> {
    Ok(bmr(profile)? * profile.activity_tier.multiplier())
}

/// Estimates the daily energy requirement in kcal/day.
///
/// Fails if any field of `profile` is out of range.
pub fn estimate(profile: &Profile) -> Result<f64, InvalidProfile> {
    maintenance(profile).map(round2)
}

/// Estimates a daily intake target for the given goal, in kcal/day.
///
/// Weight loss aims 15% below maintenance, bulking 15% above.
pub fn daily_target(profile: &Profile, goal: Goal) -> Result<f64, InvalidProfile> {
    maintenance(profile).map(|kcal| goal_target(kcal, goal))
}

/// Scales an unrounded [`maintenance`] value by the goal factor, in kcal/day.
pub fn goal_target(maintenance: f64, goal: Goal) -> f64 {
    round2(maintenance * goal.calorie_factor())
}
