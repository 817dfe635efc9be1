//! User profile types.
//!
//! A [`Profile`] is a flat value describing one user's biometric inputs. It is never mutated by
//! this crate; every estimation is a pure function of the profile handed in.
//!
//! All enumerations parse from strings through [`std::str::FromStr`], accepting only their
//! snake_case identifier (`"lightly_active"`) or their variant name (`"LightlyActive"`).
//! Human-readable labels are for display only and are rejected by the parser.

use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

/// Accepted age range, in years.
pub const AGE_RANGE: RangeInclusive<u32> = 10..=100;

/// Accepted weight range, in kilograms.
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 30.0..=200.0;

/// Accepted height range, in centimeters.
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 100.0..=250.0;

/// A profile that cannot be used for estimation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidProfile {
    #[error("age {0} is outside of {min}..={max} years", min = AGE_RANGE.start(), max = AGE_RANGE.end())]
    Age(u32),
    #[error("weight {0} kg is outside of {min}..={max} kg", min = WEIGHT_KG_RANGE.start(), max = WEIGHT_KG_RANGE.end())]
    WeightKg(f64),
    #[error("height {0} cm is outside of {min}..={max} cm", min = HEIGHT_CM_RANGE.start(), max = HEIGHT_CM_RANGE.end())]
    HeightCm(f64),
    #[error("unknown sex: {0:?}")]
    UnknownSex(String),
    #[error("unknown activity tier: {0:?}")]
    UnknownActivityTier(String),
    #[error("unknown goal: {0:?}")]
    UnknownGoal(String),
}

/// Biological sex category, as used by the Mifflin-St Jeor equation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Returns the lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// How much a person exercises in a typical week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ActivityTier {
    /// Little or no exercise.
    Sedentary,
    /// Exercise 1-3 days a week.
    LightlyActive,
    /// Exercise 3-5 days a week.
    ModeratelyActive,
    /// Exercise 6-7 days a week.
    VeryActive,
    /// Training twice a day.
    SuperActive,
}

impl ActivityTier {
    /// All tiers, from least to most active.
    pub const ALL: [ActivityTier; 5] = [
        ActivityTier::Sedentary,
        ActivityTier::LightlyActive,
        ActivityTier::ModeratelyActive,
        ActivityTier::VeryActive,
        ActivityTier::SuperActive,
    ];

    /// Multiplier applied to the basal metabolic rate.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityTier::Sedentary => 1.2,
            ActivityTier::LightlyActive => 1.375,
            ActivityTier::ModeratelyActive => 1.55,
            ActivityTier::VeryActive => 1.725,
            ActivityTier::SuperActive => 1.9,
        }
    }

    /// Human-readable label, suitable for prompts and menus.
    pub fn label(self) -> &'static str {
        match self {
            ActivityTier::Sedentary => "Sedentary (little or no exercise)",
            ActivityTier::LightlyActive => "Lightly active (1-3 days/week)",
            ActivityTier::ModeratelyActive => "Moderately active (3-5 days/week)",
            ActivityTier::VeryActive => "Very active (6-7 days/week)",
            ActivityTier::SuperActive => "Super active (twice/day)",
        }
    }
}

/// What the user wants to achieve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Goal {
    WeightLoss,
    Bulking,
    Endurance,
    #[default]
    GeneralFitness,
}

impl Goal {
    /// All goals, in menu order.
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::Bulking,
        Goal::Endurance,
        Goal::GeneralFitness,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::Bulking => "Bulking",
            Goal::Endurance => "Endurance",
            Goal::GeneralFitness => "General Fitness",
        }
    }

    /// Factor applied to the maintenance estimate to obtain a daily intake target.
    pub fn calorie_factor(self) -> f64 {
        match self {
            Goal::WeightLoss => 0.85,
            Goal::Bulking => 1.15,
            Goal::Endurance | Goal::GeneralFitness => 1.0,
        }
    }
}

/// Implements `FromStr`, `TryFrom<String>` and `Display` for a unit enum.
///
/// Each variant is matched against its snake_case identifier and its variant name, nothing else.
macro_rules! parse_enum {
    ($ty:ident, $err:ident, { $($variant:ident => $ident:literal),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = InvalidProfile;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == $ident || s == stringify!($variant) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(InvalidProfile::$err(s.to_owned()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = InvalidProfile;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $($ty::$variant => $ident,)+
                })
            }
        }
    };
}

parse_enum!(Sex, UnknownSex, {
    Male => "male",
    Female => "female",
});

parse_enum!(ActivityTier, UnknownActivityTier, {
    Sedentary => "sedentary",
    LightlyActive => "lightly_active",
    ModeratelyActive => "moderately_active",
    VeryActive => "very_active",
    SuperActive => "super_active",
});

parse_enum!(Goal, UnknownGoal, {
    WeightLoss => "weight_loss",
    Bulking => "bulking",
    Endurance => "endurance",
    GeneralFitness => "general_fitness",
});

/// One user's biometric profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Age in years.
    pub age: u32,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    pub sex: Sex,
    pub activity_tier: ActivityTier,
}

impl Profile {
    /// Creates a new, validated profile.
    pub fn new(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        sex: Sex,
        activity_tier: ActivityTier,
    ) -> Result<Self, InvalidProfile> {
        let profile = Self {
            age,
            weight_kg,
            height_cm,
            sex,
            activity_tier,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks every numeric field against its accepted range.
    ///
    /// `NaN` is never inside a range and is rejected.
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(InvalidProfile::Age(self.age));
        }
        if !WEIGHT_KG_RANGE.contains(&self.weight_kg) {
            return Err(InvalidProfile::WeightKg(self.weight_kg));
        }
        if !HEIGHT_CM_RANGE.contains(&self.height_cm) {
            return Err(InvalidProfile::HeightCm(self.height_cm));
        }
        Ok(())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: 30,
            weight_kg: 70.0,
            height_cm: 170.0,
            sex: Sex::Male,
            activity_tier: ActivityTier::Sedentary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivityTier, Goal, InvalidProfile, Profile, Sex};

    #[test]
    fn test_default_profile_is_valid() {
        assert!(Profile::default().validate().is_ok());
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        assert!(Profile::new(10, 30.0, 100.0, Sex::Female, ActivityTier::Sedentary).is_ok());
        assert!(Profile::new(100, 200.0, 250.0, Sex::Male, ActivityTier::SuperActive).is_ok());
    }

    #[test]
    fn test_out_of_range_fields_are_rejected() {
        assert_eq!(
            Profile::new(5, 70.0, 170.0, Sex::Male, ActivityTier::Sedentary),
            Err(InvalidProfile::Age(5))
        );
        assert_eq!(
            Profile::new(101, 70.0, 170.0, Sex::Male, ActivityTier::Sedentary),
            Err(InvalidProfile::Age(101))
        );
        assert_eq!(
            Profile::new(30, 29.9, 170.0, Sex::Male, ActivityTier::Sedentary),
            Err(InvalidProfile::WeightKg(29.9))
        );
        assert_eq!(
            Profile::new(30, 70.0, 250.5, Sex::Male, ActivityTier::Sedentary),
            Err(InvalidProfile::HeightCm(250.5))
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        let result = Profile::new(30, f64::NAN, 170.0, Sex::Male, ActivityTier::Sedentary);
        assert!(matches!(result, Err(InvalidProfile::WeightKg(_))));
    }

    #[test]
    fn test_activity_tier_parsing_is_strict() {
        assert_eq!(
            "super_active".parse::<ActivityTier>(),
            Ok(ActivityTier::SuperActive)
        );
        assert_eq!(
            "LightlyActive".parse::<ActivityTier>(),
            Ok(ActivityTier::LightlyActive)
        );
        assert_eq!(
            "Super active (twice/day)".parse::<ActivityTier>(),
            Err(InvalidProfile::UnknownActivityTier(
                "Super active (twice/day)".to_owned()
            ))
        );
        assert!("".parse::<ActivityTier>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for tier in ActivityTier::ALL {
            assert_eq!(tier.to_string().parse::<ActivityTier>(), Ok(tier));
        }
        for goal in Goal::ALL {
            assert_eq!(goal.to_string().parse::<Goal>(), Ok(goal));
        }
        assert_eq!("female".parse::<Sex>(), Ok(Sex::Female));
        assert!("Female (she/her)".parse::<Sex>().is_err());
    }

    #[test]
    fn test_deserialize_uses_strict_parser() {
        let profile: Profile = serde_json::from_str(
            r#"{"age":41,"weight_kg":82.5,"height_cm":181.0,"sex":"male","activity_tier":"very_active"}"#,
        )
        .expect("should deserialize profile");
        assert_eq!(profile.activity_tier, ActivityTier::VeryActive);
        assert_eq!(profile.age, 41);

        let err = serde_json::from_str::<Profile>(r#"{"activity_tier":"Very active"}"#)
            .expect_err("label must not be accepted");
        assert!(err.to_string().contains("unknown activity tier"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let profile: Profile =
            serde_json::from_str(r#"{"sex":"female"}"#).expect("should deserialize profile");
        assert_eq!(profile.sex, Sex::Female);
        assert_eq!(profile.age, 30);
        assert_eq!(profile.activity_tier, ActivityTier::Sedentary);
    }
}
