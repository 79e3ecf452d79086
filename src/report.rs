//! Human-readable summaries printed to stdout

use crate::generate::QuerySet;
use crate::harvest::UsageKind;
use crate::index::UsageIndex;
use crate::Analysis;

const RULE: &str = "================================================================================";

fn section(title: &str) {
    println!();
    println!("{}", RULE);
    println!("{}", title);
    println!("{}", RULE);
}

/// Print the extraction summary: mapping, columns, and sample records.
pub fn print_extraction_summary(index: &UsageIndex) {
    println!("{}", RULE);
    println!("DASHBOARD EXPRESSION EXTRACTION SUMMARY");
    println!("{}", RULE);

    println!();
    println!("Total unique columns found: {}", index.all_columns().len());
    println!("Total expressions found: {}", index.all_expressions().len());
    println!("Total filters found: {}", index.all_filters().len());
    println!("Total tables: {}", index.table_count());
    println!(
        "Total widget items: {} ({} fields, {} filters)",
        index.by_widget().len(),
        index.field_count(),
        index.filter_count()
    );

    section("DATASET ID TO TABLE NAME MAPPING");
    for (dataset_id, table_name) in index.dataset_map().iter() {
        println!("  {} -> {}", dataset_id, table_name);
    }

    section("ALL COLUMNS USED");
    for col in index.all_columns() {
        println!("  - {}", col);
    }

    section("COLUMNS BY TABLE");
    for table in index.tables() {
        println!();
        println!("{}:", table);
        for col in index.used_columns(table) {
            println!("  - {}", col);
        }
    }

    section("SAMPLE EXPRESSIONS BY WIDGET (First 10)");
    for (i, record) in index.by_widget().iter().take(10).enumerate() {
        println!();
        println!("{}. Widget: {}", i + 1, record.widget);
        println!("   Page: {}", record.page);
        println!("   Table: {}", record.table_name);
        println!("   Type: {}", record.kind.to_string().to_uppercase());
        match record.kind {
            UsageKind::Field => {
                println!(
                    "   Field: {}",
                    record.field_name.as_deref().unwrap_or_default()
                );
                println!("   Expression: {}", record.expression_text);
            }
            UsageKind::Filter => println!("   Filter: {}", record.expression_text),
        }
        println!("   Columns: {}", join_columns(record.columns_used.iter()));
    }

    section("FILTER EXPRESSIONS");
    let filters = index
        .by_widget()
        .iter()
        .filter(|r| r.kind == UsageKind::Filter)
        .take(10);
    for (i, record) in filters.enumerate() {
        println!();
        println!("{}. Widget: {}", i + 1, record.widget);
        println!("   Table: {}", record.table_name);
        println!("   Filter: {}", record.expression_text);
        println!("   Columns: {}", join_columns(record.columns_used.iter()));
    }
}

/// Print queries 1 and 2 for console-only runs.
pub fn print_queries(queries: &QuerySet) {
    section(&format!("QUERY 1: TABLE COLUMNS ({})", queries.language));
    println!("{}", queries.table_columns);

    section(&format!("QUERY 2: LINEAGE ({})", queries.language));
    println!("{}", queries.lineage);
}

/// Print the closing summary of an analyze run.
pub fn print_analysis_summary(analysis: &Analysis, saved_to: Option<&std::path::Path>) {
    let index = &analysis.index;

    section("ANALYSIS SUMMARY");
    println!("Dashboard file: {}", analysis.source.path.display());
    println!("Source checksum: {}", analysis.source.source_checksum);
    println!("Tables analyzed: {}", index.table_count());
    println!("Unique columns used: {}", index.all_columns().len());
    println!("Total expressions: {}", index.all_expressions().len());
    println!("Total filters: {}", index.all_filters().len());

    println!();
    println!("Tables in dashboard:");
    for table in index.tables() {
        println!(
            "  - {} ({} columns used)",
            table,
            index.used_columns(table).len()
        );
    }

    if let Some(dir) = saved_to {
        println!();
        println!("All queries saved to: {}", dir.display());
        for path in &analysis.written_files {
            println!("  {}", path.display());
        }
        println!();
        println!("Next steps:");
        println!("  1. Run the generated SQL queries in your workspace");
        println!("  2. Review unused columns in query 03_unused_columns.sql");
        println!("  3. Check upstream lineage in query 02_lineage.sql");
        println!("  4. Optimize ETL pipelines by removing unused columns");
    }
}

fn join_columns<'a>(columns: impl Iterator<Item = &'a String>) -> String {
    columns.map(String::as_str).collect::<Vec<_>>().join(", ")
}
