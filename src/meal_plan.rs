//! Meal suggestions from a nutrition table.
//!
//! The table is a CSV file with at least the columns `food_and_serving`, `calories` and
//! `protein_g`; other columns are ignored. Suggestions are a random sample filtered by goal:
//! light meals (under 300 kcal) for weight loss, protein-rich meals (over 20 g) for bulking and
//! anything for other goals.

use std::{fmt, io, path::Path};

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::profile::Goal;

/// Number of meals in a suggestion.
pub const MEALS_PER_PLAN: usize = 3;

/// Calorie ceiling for meals suggested for weight loss, exclusive.
pub const LIGHT_MEAL_MAX_KCAL: f64 = 300.0;

/// Protein floor for meals suggested for bulking, exclusive.
pub const HIGH_PROTEIN_MIN_G: f64 = 20.0;

#[derive(Debug, thiserror::Error)]
pub enum MealPlanError {
    #[error("failed to read nutrition table: {0}")]
    Csv(#[from] csv::Error),
}

/// A row of the nutrition table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub food_and_serving: String,
    pub calories: f64,
    pub protein_g: f64,
}

impl Meal {
    /// Returns whether this meal fits the given goal.
    pub fn suits(&self, goal: Goal) -> bool {
        match goal {
            Goal::WeightLoss => self.calories < LIGHT_MEAL_MAX_KCAL,
            Goal::Bulking => self.protein_g > HIGH_PROTEIN_MIN_G,
            Goal::Endurance | Goal::GeneralFitness => true,
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} kcal, {} g protein)",
            self.food_and_serving, self.calories, self.protein_g
        )
    }
}

/// Reads a nutrition table.
pub fn load_meals<R: io::Read>(reader: R) -> Result<Vec<Meal>, MealPlanError> {
    read_meals(csv::Reader::from_reader(reader))
}

/// Reads a nutrition table from a file.
pub fn load_meals_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Meal>, MealPlanError> {
    read_meals(csv::Reader::from_path(path)?)
}

fn read_meals<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Meal>, MealPlanError> {
    let meals = reader.deserialize().collect::<Result<Vec<Meal>, _>>()?;
    tracing::debug!(meals = meals.len(), "loaded nutrition table");
    Ok(meals)
}

/// Picks up to [`MEALS_PER_PLAN`] distinct meals suiting `goal`.
///
/// Returns fewer meals if the table does not have enough candidates.
pub fn suggest_meals<'a, R>(meals: &'a [Meal], goal: Goal, rng: &mut R) -> Vec<&'a Meal>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&Meal> = meals.iter().filter(|meal| meal.suits(goal)).collect();
    candidates
        .choose_multiple(rng, MEALS_PER_PLAN)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{MealPlanError, load_meals, load_meals_from_path, suggest_meals};
    use crate::profile::Goal;

    const TABLE: &str = "\
food_and_serving,calories,protein_g,fat_g
Greek yogurt (200 g),146,20,4
Chicken breast (150 g),248,46.5,5.4
Oatmeal with banana,310,9,5
Tuna salad,290,25,12
Peanut butter toast,390,14,20
Salmon with rice,520,34,18
Apple,95,0.5,0.3
";

    fn meals() -> Vec<super::Meal> {
        load_meals(TABLE.as_bytes()).expect("table should parse")
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let meals = meals();
        assert_eq!(meals.len(), 7);
        assert_eq!(meals[1].food_and_serving, "Chicken breast (150 g)");
        assert_eq!(meals[1].protein_g, 46.5);
        assert_eq!(
            meals[0].to_string(),
            "Greek yogurt (200 g) (146 kcal, 20 g protein)"
        );
    }

    #[test]
    fn test_load_from_path_matches_reader() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/nutrition.csv");

        let from_path = load_meals_from_path(path).expect("demo table should parse");
        let text = std::fs::read_to_string(path).expect("demo table should be readable");
        let from_reader = load_meals(text.as_bytes()).expect("demo table should parse");

        assert_eq!(from_path, from_reader);
        assert_eq!(from_path.len(), 10);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = load_meals_from_path("/nonexistent/nutrition.csv");
        assert!(matches!(result, Err(MealPlanError::Csv(_))));
    }

    #[test]
    fn test_load_rejects_malformed_rows() {
        let result = load_meals("food_and_serving,calories,protein_g\nSoup,lots,3\n".as_bytes());
        assert!(matches!(result, Err(MealPlanError::Csv(_))));
    }

    #[test]
    fn test_weight_loss_meals_are_light() {
        let meals = meals();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let plan = suggest_meals(&meals, Goal::WeightLoss, &mut rng);
            assert_eq!(plan.len(), 3);
            assert!(plan.iter().all(|meal| meal.calories < 300.0));
        }
    }

    #[test]
    fn test_bulking_meals_are_protein_rich() {
        let meals = meals();
        let mut rng = StdRng::seed_from_u64(11);

        let plan = suggest_meals(&meals, Goal::Bulking, &mut rng);
        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|meal| meal.protein_g > 20.0));
        // Greek yogurt has exactly 20 g and is excluded.
        assert!(plan.iter().all(|meal| meal.food_and_serving != "Greek yogurt (200 g)"));
    }

    #[test]
    fn test_suggestions_are_distinct() {
        let meals = meals();
        let mut rng = StdRng::seed_from_u64(3);

        let plan = suggest_meals(&meals, Goal::GeneralFitness, &mut rng);
        assert_eq!(plan.len(), 3);
        for (i, a) in plan.iter().enumerate() {
            for b in &plan[i + 1..] {
                assert_ne!(a.food_and_serving, b.food_and_serving);
            }
        }
    }

    #[test]
    fn test_small_table_yields_fewer_meals() {
        let meals = &meals()[5..];
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(suggest_meals(meals, Goal::Endurance, &mut rng).len(), 2);
        assert_eq!(suggest_meals(meals, Goal::WeightLoss, &mut rng).len(), 1);
        assert!(suggest_meals(&[], Goal::Bulking, &mut rng).is_empty());
    }
}
