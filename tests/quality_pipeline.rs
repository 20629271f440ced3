//! Integration tests for the ingest -> profile -> suggest -> feedback flow.

use dq_agent::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Create a synthetic orders CSV with known quality issues.
///
/// - `order_id`: distinct digit strings (numeric, unique)
/// - `customer`: letters only, one missing value
/// - `amount`: numeric with one wild outlier
/// - `batch`: hex-shaped codes
fn create_orders_csv() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "order_id,customer,amount,batch").unwrap();
    for i in 0..20 {
        let customer = if i == 7 {
            "NA".to_string()
        } else {
            format!("customer{}", char::from(b'a' + (i % 5) as u8))
        };
        // Row 13 carries an amount two orders of magnitude off.
        let amount = if i == 13 { 5000.0 } else { 40.0 + i as f64 };
        writeln!(file, "{},{},{},{:02x}f{:02x}", 1000 + i, customer, amount, i, i).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_ingest_and_profile() {
    let file = create_orders_csv();
    let dataset = read_dataset(file.path()).unwrap();

    assert_eq!(dataset.n_rows(), 20);
    assert_eq!(dataset.n_columns(), 4);
    assert_eq!(dataset.column("order_id").unwrap().kind(), ColumnKind::Numeric);
    assert_eq!(dataset.column("customer").unwrap().kind(), ColumnKind::Text);
    assert_eq!(dataset.column("batch").unwrap().kind(), ColumnKind::Text);

    let profile = profile(&dataset);
    assert_eq!(profile.row_count, 20);

    let order_id = profile.column("order_id").unwrap();
    assert_eq!(order_id.null_count, 0);
    assert_eq!(order_id.unique_count, 20);
    assert_eq!(order_id.min, Some(1000.0));
    assert_eq!(order_id.max, Some(1019.0));
    assert_eq!(order_id.distribution.len(), 10);

    let customer = profile.column("customer").unwrap();
    assert_eq!(customer.null_count, 1);
    assert!((customer.null_percentage - 5.0).abs() < 1e-10);
    assert_eq!(customer.regex_pattern, Some(ShapePattern::Alpha));

    let batch = profile.column("batch").unwrap();
    assert_eq!(batch.regex_pattern, Some(ShapePattern::Hex));
}

#[test]
fn test_suggested_rules_reflect_profile() {
    let file = create_orders_csv();
    let dataset = read_dataset(file.path()).unwrap();
    let profile = profile(&dataset);

    let rules = HeuristicSuggester::new().suggest(&profile).unwrap();

    // order_id: complete, distinct, bounded.
    assert!(rules
        .iter()
        .any(|r| r.column == "order_id" && r.kind == RuleKind::NotNull));
    assert!(rules
        .iter()
        .any(|r| r.column == "order_id" && r.kind == RuleKind::Unique));
    assert!(rules
        .iter()
        .any(|r| r.column == "order_id"
            && r.kind == RuleKind::Range
            && r.expression == "order_id BETWEEN 1000 AND 1019"));

    // customer has a missing value, so no NotNull rule.
    assert!(!rules
        .iter()
        .any(|r| r.column == "customer" && r.kind == RuleKind::NotNull));

    // batch codes share the hex shape.
    assert!(rules
        .iter()
        .any(|r| r.column == "batch"
            && r.kind == RuleKind::Pattern
            && r.expression.contains("^[0-9a-fA-F]+$")));
}

#[test]
fn test_anomaly_screen_finds_planted_outlier() {
    let file = create_orders_csv();
    let dataset = read_dataset(file.path()).unwrap();

    let fitted = AnomalyDetector::with_threshold(3.0).fit(&dataset).unwrap();
    let hits = fitted.detect(&dataset).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].row, 13);
    assert_eq!(hits[0].column.as_deref(), Some("amount"));
}

#[test]
fn test_feedback_round_trip() {
    let file = create_orders_csv();
    let dataset = read_dataset(file.path()).unwrap();
    let profile = profile(&dataset);
    let rules = HeuristicSuggester::new().suggest(&profile).unwrap();

    let dir = TempDir::new().unwrap();
    let store = FeedbackStore::open(dir.path().join("feedback.db")).unwrap();
    let validated = RuleStore::new(dir.path().join("validated_rules.txt"));

    for (idx, rule) in rules.iter().enumerate() {
        let accepted = idx % 2 == 0;
        store
            .add(&FeedbackRecord::new(&rule.expression, accepted, ""))
            .unwrap();
        if accepted {
            validated.store_rule(rule).unwrap();
        }
    }

    assert_eq!(store.count().unwrap(), rules.len());
    assert_eq!(store.accepted().unwrap().len(), validated.load().unwrap().len());
    store.close().unwrap();
}

#[test]
fn test_llm_suggester_stub_and_unavailable() {
    struct CannedClient;

    impl CompletionClient for CannedClient {
        fn complete(&self, prompt: &str) -> Result<String> {
            assert!(prompt.contains("order_id"));
            Ok("amount: should stay under 1000\nspot check new batches".to_string())
        }
    }

    let file = create_orders_csv();
    let dataset = read_dataset(file.path()).unwrap();
    let profile = profile(&dataset);

    let rules = LlmSuggester::new(CannedClient).suggest(&profile).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].column, "amount");
    assert_eq!(rules[1].column, DATASET_WIDE);

    let err = LlmSuggester::new(UnavailableClient)
        .suggest(&profile)
        .unwrap_err();
    assert!(matches!(err, DqError::Unavailable(_)));
}
