use super::*;
use crate::nutrition::{Nutrient, NutrientAmounts};

fn at_band_edges() -> NutrientAmounts {
    NutrientAmounts {
        calories: 1600.0,
        protein: 60.0,
        carbs: 220.0,
        fat: 84.0,
        fiber: 22.4,
        vitamin_c: 108.0,
    }
}

fn flag_strings(report: &DietaryReport) -> Vec<String> {
    report.flags.iter().map(|f| f.to_string()).collect()
}

#[test]
fn test_empty_meal_flags_everything_low() {
    let report = DietaryAnalyzer::default().analyze(&NutrientAmounts::zero());

    assert_eq!(report.flags.len(), 6);
    assert!(report.flags.iter().all(|f| f.level == FlagLevel::Low));
    assert_eq!(report.flags[0].to_string(), "Low calories (0.0% of RDI)");
    assert_eq!(
        report.suggestions,
        vec![
            "Increase portion sizes or add an energy-dense item (nuts, paneer).",
            "Add a protein source: egg, paneer, dal, or chicken.",
            "Add vegetables or fruit (spinach, apple, banana).",
            "Add vitamin C rich food: orange, spinach, potato or fruits.",
        ]
    );
}

#[test]
fn test_band_edges_are_not_flagged() {
    let report = DietaryAnalyzer::default().analyze(&at_band_edges());
    assert!(report.flags.is_empty(), "{:?}", flag_strings(&report));
    assert!(report.suggestions.is_empty());
}

#[test]
fn test_just_outside_band_is_flagged() {
    let mut totals = at_band_edges();
    totals.protein = 39.99;
    totals.fat = 84.1;

    let report = DietaryAnalyzer::default().analyze(&totals);
    assert_eq!(report.flags.len(), 2);
    assert_eq!(report.flags[0].nutrient, Nutrient::Protein);
    assert_eq!(report.flags[0].level, FlagLevel::Low);
    assert_eq!(report.flags[1].nutrient, Nutrient::Fat);
    assert_eq!(report.flags[1].level, FlagLevel::High);
}

#[test]
fn test_high_flags_and_suggestions() {
    let mut totals = at_band_edges();
    totals.calories = 3000.0;
    totals.fat = 140.0;

    let report = DietaryAnalyzer::default().analyze(&totals);
    assert_eq!(
        flag_strings(&report),
        vec!["High calories (150.0% of RDI)", "High fat (200.0% of RDI)"]
    );
    assert_eq!(
        report.suggestions,
        vec![
            "Reduce portion or swap to lower-calorie alternatives.",
            "Reduce fried items or oil; prefer grilled or steamed.",
        ]
    );
}

#[test]
fn test_low_flag_percent_format() {
    let mut totals = at_band_edges();
    totals.protein = 13.0;

    let report = DietaryAnalyzer::default().analyze(&totals);
    assert_eq!(flag_strings(&report), vec!["Low protein (26.0% of RDI)"]);
}

#[test]
fn test_flag_without_suggestion() {
    let mut totals = at_band_edges();
    totals.carbs = 10.0;

    let report = DietaryAnalyzer::default().analyze(&totals);
    assert_eq!(report.flags.len(), 1);
    assert_eq!(report.flags[0].nutrient, Nutrient::Carbs);
    assert!(report.suggestions.is_empty());
}

#[test]
fn test_shared_suggestion_appears_once() {
    let catalog = SuggestionCatalog::empty()
        .with_low(Nutrient::Fiber, "Eat more produce.")
        .with_low(Nutrient::VitaminC, "Eat more produce.");
    let analyzer = DietaryAnalyzer::new(RdiThresholds::default(), catalog);

    let mut totals = at_band_edges();
    totals.fiber = 1.0;
    totals.vitamin_c = 1.0;

    let report = analyzer.analyze(&totals);
    assert_eq!(report.flags.len(), 2);
    assert_eq!(report.suggestions, vec!["Eat more produce."]);
}

#[test]
fn test_disabled_targets_are_skipped() {
    let rdi = RdiThresholds::default()
        .with_target(Nutrient::Protein, None)
        .with_target(Nutrient::Fat, Some(0.0));
    let analyzer = DietaryAnalyzer::new(rdi, SuggestionCatalog::default());

    let report = analyzer.analyze(&NutrientAmounts::zero());
    let flagged: Vec<Nutrient> = report.flags.iter().map(|f| f.nutrient).collect();
    assert_eq!(
        flagged,
        vec![Nutrient::Calories, Nutrient::Carbs, Nutrient::Fiber, Nutrient::VitaminC]
    );
}

#[test]
fn test_rdi_defaults() {
    let rdi = RdiThresholds::default();
    assert_eq!(rdi.target(Nutrient::Calories), Some(2000.0));
    assert_eq!(rdi.target(Nutrient::Protein), Some(50.0));
    assert_eq!(rdi.target(Nutrient::Carbs), Some(275.0));
    assert_eq!(rdi.target(Nutrient::Fat), Some(70.0));
    assert_eq!(rdi.target(Nutrient::Fiber), Some(28.0));
    assert_eq!(rdi.target(Nutrient::VitaminC), Some(90.0));
}

#[test]
fn test_rdi_partial_override_from_json() {
    let rdi: RdiThresholds = serde_json::from_str(r#"{"protein": 60, "fiber": null}"#).unwrap();
    assert_eq!(rdi.target(Nutrient::Protein), Some(60.0));
    assert_eq!(rdi.target(Nutrient::Fiber), None);
    assert_eq!(rdi.target(Nutrient::Calories), Some(2000.0));
}

#[test]
fn test_catalog_from_json() {
    let catalog: SuggestionCatalog =
        serde_json::from_str(r#"{"low": {"vitamin_c": "Have an orange."}}"#).unwrap();
    assert_eq!(catalog.low_for(Nutrient::VitaminC), Some("Have an orange."));
    assert_eq!(catalog.low_for(Nutrient::Protein), None);
    assert!(catalog.high_for(Nutrient::Fat).is_some());
}
