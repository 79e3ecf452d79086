//! Unit tests for dataset resolution, column extraction and harvesting
//!
//! These tests drive the pipeline through the public API with small inline
//! documents and the shared fixtures.

use std::collections::BTreeSet;

use column_lens::{extract_columns, harvest, parse_document, resolve, UsageKind};

use crate::common::fixture_json;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Column Tokenizer Tests
// ============================================================================

#[test]
fn test_tokenizer_single_column() {
    assert_eq!(extract_columns("`customer_id` = 5"), set(&["customer_id"]));
}

#[test]
fn test_tokenizer_no_columns() {
    assert!(extract_columns("1 = 1").is_empty());
}

#[test]
fn test_tokenizer_dotted_pair() {
    assert_eq!(extract_columns("`a`.`b`"), set(&["a", "b"]));
}

#[test]
fn test_tokenizer_function_call() {
    assert_eq!(
        extract_columns("DATE_TRUNC(\"MONTH\", `order_date`)"),
        set(&["order_date"])
    );
}

// ============================================================================
// Dataset Resolver Tests
// ============================================================================

#[test]
fn test_resolver_fallback_chain() {
    let doc = parse_document(
        r#"{"datasets": [
            {"name": "a", "queryLines": ["SELECT a FROM sales.orders"]},
            {"name": "b", "displayName": "Orders View", "queryLines": []},
            {"name": "c"}
        ]}"#,
    )
    .unwrap();
    let map = resolve(&doc);

    assert_eq!(map.get("a"), Some("sales.orders"));
    assert_eq!(map.get("b"), Some("Orders View"));
    assert_eq!(map.get("c"), Some("c"));
    assert_eq!(map.len(), 3);
}

#[test]
fn test_resolver_every_dataset_has_entry() {
    let doc = parse_document(&fixture_json("sales_dashboard")).unwrap();
    let map = resolve(&doc);

    assert_eq!(map.len(), doc.datasets.len());
    assert_eq!(map.get("ds_orders"), Some("main.sales.orders"));
    assert_eq!(map.get("ds_customers"), Some("crm.customers"));
    assert_eq!(map.get("ds_targets"), Some("Targets Upload"));
    assert_eq!(map.get("ds_inline"), Some("ds_inline"));
}

#[test]
fn test_resolver_leading_cte_resolves_to_inner_table() {
    let doc = parse_document(
        r#"{"datasets": [{"name": "cte", "queryLines": [
            "WITH recent AS (SELECT * FROM staging.raw_orders)",
            "SELECT * FROM main.sales.orders JOIN recent USING (id)"
        ]}]}"#,
    )
    .unwrap();
    assert_eq!(resolve(&doc).get("cte"), Some("staging.raw_orders"));
}

// ============================================================================
// Expression Harvester Tests
// ============================================================================

#[test]
fn test_harvest_record_count_matches_non_empty_expressions() {
    let doc = parse_document(&fixture_json("sales_dashboard")).unwrap();

    let expected: usize = doc
        .pages
        .iter()
        .flat_map(|p| &p.layout)
        .flat_map(|item| &item.widget.queries)
        .map(|q| {
            let fields = q
                .query
                .fields
                .iter()
                .filter(|f| f.expression.as_deref().is_some_and(|e| !e.is_empty()))
                .count();
            let filters = q
                .query
                .filters
                .iter()
                .filter(|f| f.expression.as_deref().is_some_and(|e| !e.is_empty()))
                .count();
            fields + filters
        })
        .sum();

    let records = harvest(&doc, &resolve(&doc));
    assert_eq!(records.len(), expected);
    assert_eq!(records.len(), 9);
}

#[test]
fn test_harvest_traversal_order() {
    let doc = parse_document(&fixture_json("sales_dashboard")).unwrap();
    let records = harvest(&doc, &resolve(&doc));

    let summary: Vec<(&str, &str, UsageKind)> = records
        .iter()
        .map(|r| (r.widget.as_str(), r.expression_text.as_str(), r.kind))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Monthly Revenue", "DATE_TRUNC(\"MONTH\", `order_date`)", UsageKind::Field),
            ("Monthly Revenue", "SUM(`price` * `qty`)", UsageKind::Field),
            ("f_status", "`status`", UsageKind::Field),
            ("f_status", "`status` IN ('OPEN', 'SHIPPED')", UsageKind::Filter),
            ("f_status", "`segment`", UsageKind::Field),
            ("f_status", "`country` = :country", UsageKind::Filter),
            ("w_targets", "SUM(`target_amount`)", UsageKind::Field),
            ("w_targets", "1 = 1", UsageKind::Filter),
            ("Unknown Widget", "COUNT(*)", UsageKind::Field),
        ]
    );
}

#[test]
fn test_harvest_records_carry_context() {
    let doc = parse_document(&fixture_json("sales_dashboard")).unwrap();
    let records = harvest(&doc, &resolve(&doc));

    let revenue = &records[1];
    assert_eq!(revenue.page, "Overview");
    assert_eq!(revenue.dataset_id, "ds_orders");
    assert_eq!(revenue.table_name, "main.sales.orders");
    assert_eq!(revenue.field_name.as_deref(), Some("revenue"));
    assert_eq!(revenue.columns_used, set(&["price", "qty"]));

    let country_filter = &records[5];
    assert_eq!(country_filter.table_name, "crm.customers");
    assert_eq!(country_filter.field_name, None);
    assert_eq!(country_filter.columns_used, set(&["country"]));

    // no columns, still recorded
    assert!(records[7].columns_used.is_empty());
    assert_eq!(records[7].table_name, "Targets Upload");
}

#[test]
fn test_harvest_sparse_document() {
    let doc = parse_document(&fixture_json("sparse_dashboard")).unwrap();
    let records = harvest(&doc, &resolve(&doc));

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].page, "Unknown Page");
    assert_eq!(records[0].dataset_id, "Unknown Dataset");
    assert_eq!(records[0].table_name, "Unknown Dataset");
    assert_eq!(records[1].table_name, "sales.orders");
}

#[test]
fn test_malformed_expression_type_is_an_error() {
    let result = parse_document(
        r#"{"pages": [{"layout": [{"widget": {"queries": [{"query": {"fields": [{"expression": 3}]}}]}}]}]}"#,
    );
    assert!(result.is_err());
}
