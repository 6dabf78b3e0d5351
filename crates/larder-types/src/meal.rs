use serde::{Deserialize, Serialize};

use crate::record::{Fields, Record};

/// A meal on today's plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub text: String,
    pub completed: bool,
}

impl Meal {
    /// Patch that flips `completed`.
    pub fn toggled(&self) -> MealPatch {
        MealPatch {
            completed: Some(!self.completed),
            ..MealPatch::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeal {
    pub text: String,
}

impl NewMeal {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl MealPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

impl Fields for Meal {
    const NAMESPACE: &'static str = "meal";

    type Draft = NewMeal;
    type Patch = MealPatch;

    fn from_draft(draft: NewMeal) -> Self {
        Self {
            text: draft.text.trim().to_string(),
            completed: false,
        }
    }

    /// Patched text is trimmed like new text; blank text is ignored.
    fn merge(&mut self, patch: &MealPatch) {
        if let Some(text) = patch.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            self.text = text.to_string();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Progress through the day's meals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MealSummary {
    pub completed: usize,
    pub remaining: usize,
}

impl MealSummary {
    pub fn of(meals: &[Record<Meal>]) -> Self {
        let completed = meals.iter().filter(|m| m.fields.completed).count();
        Self {
            completed,
            remaining: meals.len() - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_meal_is_trimmed_and_open() {
        let m = Meal::from_draft(NewMeal::new("  Breakfast - toast and eggs "));
        assert_eq!(m.text, "Breakfast - toast and eggs");
        assert!(!m.completed);
    }

    #[test]
    fn toggled_flips_completion() {
        let mut m = Meal::from_draft(NewMeal::new("Lunch"));
        let patch = m.toggled();
        m.merge(&patch);
        assert!(m.completed);
        let patch = m.toggled();
        m.merge(&patch);
        assert!(!m.completed);
    }

    #[test]
    fn text_patch_keeps_completion() {
        let mut m = Meal {
            text: "Dinner".into(),
            completed: true,
        };
        m.merge(&MealPatch::text("Dinner - pasta"));
        assert_eq!(m.text, "Dinner - pasta");
        assert!(m.completed);
    }

    #[test]
    fn text_patch_is_trimmed_and_blank_is_ignored() {
        let mut m = Meal::from_draft(NewMeal::new("Lunch"));
        m.merge(&MealPatch::text("  Lunch - bibimbap  "));
        assert_eq!(m.text, "Lunch - bibimbap");
        m.merge(&MealPatch::text("   "));
        assert_eq!(m.text, "Lunch - bibimbap");
    }

    #[test]
    fn summary_counts_completed_and_remaining() {
        let mut meals: Vec<Record<Meal>> = ["Breakfast", "Lunch", "Dinner"]
            .into_iter()
            .map(|t| Record::<Meal>::create(NewMeal::new(t)))
            .collect();
        assert_eq!(MealSummary::of(&meals), MealSummary { completed: 0, remaining: 3 });

        let patch = meals[1].fields.toggled();
        meals[1].apply(&patch);
        assert_eq!(MealSummary::of(&meals), MealSummary { completed: 1, remaining: 2 });
        assert_eq!(MealSummary::of(&[]), MealSummary::default());
    }
}
