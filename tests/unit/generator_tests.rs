//! Unit tests for catalog query generation
//!
//! These tests verify table name normalization and the generated query text
//! for a realistic dashboard.

use column_lens::generate::{column_lists, table_usage, TableRef};
use column_lens::{extract_usage, generate_queries, parse_document, CatalogDefaults, QueryLanguage};

use crate::common::fixture_json;

fn sales_index() -> column_lens::UsageIndex {
    extract_usage(&parse_document(&fixture_json("sales_dashboard")).unwrap())
}

#[test]
fn test_table_usage_normalizes_names() {
    let usage = table_usage(&sales_index(), &CatalogDefaults::default());

    let refs: Vec<String> = usage.iter().map(|t| t.table_ref.to_string()).collect();
    assert_eq!(
        refs,
        vec![
            "hive_metastore.default.Targets Upload",
            "hive_metastore.crm.customers",
            "hive_metastore.default.ds_inline",
            "main.sales.orders",
        ]
    );
}

#[test]
fn test_custom_defaults_flow_into_queries() {
    let defaults = CatalogDefaults {
        catalog: "prod".to_string(),
        schema: "reporting".to_string(),
    };
    let sql = generate_queries(&sales_index(), QueryLanguage::Sql, &defaults);

    assert!(sql
        .table_columns
        .contains("(table_catalog = 'prod' AND table_schema = 'crm' AND table_name = 'customers')"));
    assert!(sql.lineage.contains("target_table_catalog = 'prod' AND target_table_schema = 'reporting' AND target_table_name = 'ds_inline'"));
    assert!(!sql.table_columns.contains("hive_metastore"));
}

#[test]
fn test_sql_query_set() {
    let sql = generate_queries(&sales_index(), QueryLanguage::Sql, &CatalogDefaults::default());

    assert!(sql.table_columns.starts_with("-- Query 1"));
    assert!(sql.lineage.starts_with("-- Query 2"));
    assert!(sql.unused_columns.starts_with("-- Query 3"));
    assert!(sql
        .unused_columns
        .contains("AND column_name NOT IN ('order_date', 'price', 'qty', 'status')"));
    // ds_inline has no used columns, so every column of it is unused
    assert_eq!(sql.unused_columns.matches("NOT IN").count(), 3);
    assert_eq!(sql.unused_columns.matches("UNION ALL").count(), 3);

    let comparison = sql.comparison.expect("SQL output includes the comparison query");
    assert!(comparison.starts_with("-- Query 4"));
    assert_eq!(comparison.matches(" as column_name\n").count(), 7);
}

#[test]
fn test_python_query_set() {
    let py = generate_queries(&sales_index(), QueryLanguage::Python, &CatalogDefaults::default());

    assert!(py.comparison.is_none());
    assert!(py.table_columns.contains("'main.sales.orders'"));
    assert!(py.lineage.contains("system.access.table_lineage"));
    assert!(py
        .unused_columns
        .contains("'main.sales.orders': ['order_date', 'price', 'qty', 'status'],"));
}

#[test]
fn test_column_list_document() {
    let usage = table_usage(&sales_index(), &CatalogDefaults::default());
    let text = column_lists::render(&usage);

    assert!(text.contains("TABLE: main.sales.orders\nColumn count: 4\n"));
    assert!(text.contains("`order_date`, `price`, `qty`, `status`"));
    assert!(text.contains("SELECT\n    `country`,\n    `segment`\nFROM crm.customers;"));
}

#[test]
fn test_table_ref_round_trips_three_part_names() {
    let defaults = CatalogDefaults::default();
    for name in ["a.b.c", "main.sales.orders"] {
        assert_eq!(TableRef::parse(name, &defaults).to_string(), name);
    }
}
