use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use super::*;
use crate::audit::{AuditSink, SqliteAuditLog};
use crate::foods::{FoodEntry, FoodTable};
use crate::nutrition::{Nutrient, NutrientAmounts};

fn foods() -> Arc<FoodTable> {
    let egg = NutrientAmounts {
        calories: 155.0,
        protein: 13.0,
        carbs: 1.1,
        fat: 11.0,
        fiber: 0.0,
        vitamin_c: 0.0,
    };
    let banana = NutrientAmounts {
        calories: 89.0,
        protein: 1.1,
        carbs: 23.0,
        fat: 0.3,
        fiber: 2.6,
        vitamin_c: 8.7,
    };
    let rice = NutrientAmounts {
        calories: 130.0,
        protein: 2.7,
        carbs: 28.0,
        fat: 0.3,
        fiber: 0.4,
        vitamin_c: 0.0,
    };
    let chicken = NutrientAmounts {
        calories: 165.0,
        protein: 31.0,
        fat: 3.6,
        ..NutrientAmounts::zero()
    };

    Arc::new(
        FoodTable::from_entries(vec![
            FoodEntry::new("egg", egg, 50.0),
            FoodEntry::new("banana", banana, 120.0),
            FoodEntry::new("rice", rice, 150.0),
            FoodEntry::new("chicken breast", chicken, 120.0),
        ])
        .unwrap(),
    )
}

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<(String, NutrientAmounts)>>,
}

impl AuditSink for RecordingSink {
    fn record(&self, raw_text: &str, totals: &NutrientAmounts) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((raw_text.to_string(), *totals));
        Ok(())
    }
}

struct FailingSink;

impl AuditSink for FailingSink {
    fn record(&self, _raw_text: &str, _totals: &NutrientAmounts) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
}

// ========================================================================
// Entry point contract
// ========================================================================

#[test]
fn test_empty_input_is_rejected() {
    let analyzer = MealAnalyzer::new(foods());
    assert_eq!(analyzer.analyze("").unwrap_err(), AnalysisError::EmptyInput);
    assert_eq!(analyzer.analyze(" \n\t ").unwrap_err(), AnalysisError::EmptyInput);
}

#[test]
fn test_empty_input_is_not_audited() {
    let sink = Arc::new(RecordingSink::default());
    let analyzer = MealAnalyzer::new(foods()).audit_sink(sink.clone());
    assert!(analyzer.analyze("   ").is_err());
    assert!(sink.calls.lock().unwrap().is_empty());
}

#[test]
fn test_two_eggs_end_to_end() {
    let result = MealAnalyzer::new(foods()).analyze("2 eggs").unwrap();

    assert_eq!(result.parsed_items.len(), 1);
    let item = &result.parsed_items[0];
    assert_eq!(item.raw, "2 eggs");
    assert_eq!(item.grams, 100.0);
    assert_eq!(item.food_key.as_deref(), Some("egg"));
    assert_eq!(item.confidence, 1.0);
    assert_eq!(item.nutrition.calories, 155.0);
    assert_eq!(item.nutrition.protein, 13.0);

    assert_eq!(result.totals.calories, 155.0);
    assert!(result.flags.contains(&"Low protein (26.0% of RDI)".to_string()));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_explicit_grams_regardless_of_match() {
    let analyzer = MealAnalyzer::new(foods());
    let result = analyzer.analyze("150g chicken breast").unwrap();
    assert_eq!(result.parsed_items[0].grams, 150.0);

    let result = analyzer.analyze("150g dragonfruit sorbet").unwrap();
    assert_eq!(result.parsed_items[0].grams, 150.0);
    assert_eq!(result.parsed_items[0].food_key, None);
}

#[test]
fn test_serving_fallback() {
    let result = MealAnalyzer::new(foods()).analyze("banana").unwrap();
    assert_eq!(result.parsed_items[0].grams, 120.0);
    assert_eq!(result.parsed_items[0].nutrition.calories, 106.8);
}

// ========================================================================
// Properties
// ========================================================================

#[test]
fn test_item_count_matches_clause_count() {
    let text = "2 eggs, 1 cup rice and banana, mystery stew,, and 150g chicken breast";
    let result = MealAnalyzer::new(foods()).analyze(text).unwrap();
    assert_eq!(result.parsed_items.len(), crate::parser::split_clauses(text).len());
    assert_eq!(result.parsed_items.len(), 5);
}

#[test]
fn test_idempotent() {
    let analyzer = MealAnalyzer::new(foods());
    let text = "2 eggs, 1 cup rice, bananna, 3 pieces of mystery";
    let first = analyzer.analyze(text).unwrap();
    let second = analyzer.analyze(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_totals_are_sum_of_items() {
    let result = MealAnalyzer::new(foods())
        .analyze("2 eggs, 1 cup rice, banana, 150g chicken breast, 1.3 cups rice")
        .unwrap();

    for nutrient in Nutrient::ALL {
        let sum: f64 = result
            .parsed_items
            .iter()
            .map(|item| item.nutrition.get(nutrient))
            .sum();
        // Item views are rounded individually, so allow their rounding slack
        let slack = 0.005 * result.parsed_items.len() as f64 + 1e-9;
        assert!(
            (result.totals.get(nutrient) - sum).abs() <= slack,
            "{}: totals {} vs items {}",
            nutrient,
            result.totals.get(nutrient),
            sum
        );
    }
}

#[test]
fn test_confidence_values_are_closed_set() {
    let result = MealAnalyzer::new(foods())
        .analyze("egg, bananna, chicken, xylophone, ric")
        .unwrap();
    for item in &result.parsed_items {
        assert!(
            [0.0, 0.7, 0.8, 1.0].contains(&item.confidence),
            "unexpected confidence {}",
            item.confidence
        );
    }
}

#[test]
fn test_display_rounding() {
    let result = MealAnalyzer::new(foods()).analyze("33.333g rice").unwrap();
    let item = &result.parsed_items[0];
    assert_eq!(item.grams, 33.3);
    // 0.33333 * 130
    assert_eq!(item.nutrition.calories, 43.33);
    assert_eq!(result.totals.calories, 43.33);
}

#[test]
fn test_flags_follow_displayed_totals_at_upper_bound() {
    let analyzer = MealAnalyzer::new(Arc::new(FoodTable::builtin().unwrap()));
    // 2.9 g protein per 100 g, so 60.001 g before rounding
    let result = analyzer.analyze("2069g spinach").unwrap();

    assert_eq!(result.totals.protein, 60.0);
    assert!(
        !result.flags.iter().any(|f| f.contains("protein")),
        "unexpected protein flag in {:?}",
        result.flags
    );
}

#[test]
fn test_flags_follow_displayed_totals_at_lower_bound() {
    // 13 g protein per 100 g, so 40.001 g before rounding
    let result = MealAnalyzer::new(foods()).analyze("307.7g egg").unwrap();

    assert_eq!(result.totals.protein, 40.0);
    assert!(!result.flags.iter().any(|f| f.contains("protein")));
}

// ========================================================================
// Warnings and audit sink
// ========================================================================

#[test]
fn test_unmatched_food_is_zero_and_warned() {
    let result = MealAnalyzer::new(foods())
        .analyze("2 eggs, mystery stew")
        .unwrap();

    let stew = &result.parsed_items[1];
    assert_eq!(stew.food_key, None);
    assert_eq!(stew.confidence, 0.0);
    assert_eq!(stew.grams, 100.0);
    assert_eq!(stew.nutrition, NutrientAmounts::zero());
    assert_eq!(result.totals.calories, 155.0);
    assert_eq!(
        result.warnings,
        vec![AnalysisWarning::UnmatchedFood {
            clause: "mystery stew".to_string()
        }]
    );
}

#[test]
fn test_sink_receives_text_and_totals() {
    let sink = Arc::new(RecordingSink::default());
    let analyzer = MealAnalyzer::new(foods()).audit_sink(sink.clone());
    let result = analyzer.analyze("2 eggs, banana").unwrap();

    let calls = sink.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "2 eggs, banana");
    assert_eq!(calls[0].1, result.totals);
}

#[test]
fn test_sink_failure_does_not_fail_analysis() {
    let analyzer = MealAnalyzer::new(foods()).audit_sink(Arc::new(FailingSink));
    let result = analyzer.analyze("2 eggs").unwrap();

    assert_eq!(result.parsed_items.len(), 1);
    assert_eq!(
        result.warnings,
        vec![AnalysisWarning::AuditSinkFailure {
            message: "disk full".to_string()
        }]
    );
}

#[test]
fn test_sqlite_sink_records_analysis() {
    let log = Arc::new(SqliteAuditLog::new_in_memory().unwrap());
    let analyzer = MealAnalyzer::new(foods()).audit_sink(log.clone());
    analyzer.analyze("1 cup rice").unwrap();
    analyzer.analyze("banana").unwrap();

    let records = log.recent(10).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].input_text, "banana");
    assert_eq!(records[1].totals.calories, 312.0);
}

// ========================================================================
// Config and concurrency
// ========================================================================

#[test]
fn test_config_overrides_flow_through() {
    let mut config = AnalyzerConfig::default();
    config.fallback_serving_g = 50.0;
    config.rdi = config.rdi.with_target(Nutrient::Protein, Some(10.0));

    let result = MealAnalyzer::with_config(foods(), &config)
        .analyze("2 eggs, mystery stew")
        .unwrap();

    assert_eq!(result.parsed_items[1].grams, 50.0);
    // 13g protein against a 10g target
    assert!(result.flags.contains(&"High protein (130.0% of RDI)".to_string()));
}

#[test]
fn test_shared_across_threads() {
    let analyzer = Arc::new(MealAnalyzer::new(foods()));
    let expected = analyzer.analyze("2 eggs, banana").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || analyzer.analyze("2 eggs, banana").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_json_shape() {
    let result = MealAnalyzer::new(foods()).analyze("2 eggs, mystery").unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["parsed_items"][0]["food_key"], "egg");
    assert_eq!(json["parsed_items"][1]["food_key"], serde_json::Value::Null);
    assert_eq!(json["totals"]["calories"], 155.0);
    assert!(json["flags"].is_array());
    assert!(json["suggestions"].is_array());
    assert_eq!(json["warnings"][0]["kind"], "unmatched_food");

    let clean = MealAnalyzer::new(foods()).analyze("2 eggs").unwrap();
    let json = serde_json::to_value(&clean).unwrap();
    assert!(json.get("warnings").is_none());
}
