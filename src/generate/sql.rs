//! SQL queries against `system.information_schema` and `system.access`

use super::{comment_text, group_by_schema, sql_literal, TableUsage};

/// Query 1: every catalog column of the tables the dashboard reads.
pub fn table_columns(usage: &[TableUsage]) -> String {
    let conditions: Vec<String> = group_by_schema(usage)
        .into_iter()
        .map(|((catalog, schema), tables)| {
            let table_clause = match tables.as_slice() {
                [single] => format!("table_name = {}", sql_literal(single)),
                many => format!("table_name IN ({})", literal_list(many)),
            };
            format!(
                "(table_catalog = {} AND table_schema = {} AND {})",
                sql_literal(catalog),
                sql_literal(schema),
                table_clause
            )
        })
        .collect();

    format!(
        r#"-- Query 1: Get all columns from tables used in dashboard
SELECT
    table_catalog,
    table_schema,
    table_name,
    CONCAT_WS('.', table_catalog, table_schema, table_name) as full_table_name,
    column_name,
    data_type,
    ordinal_position,
    is_nullable,
    column_default
FROM system.information_schema.columns
WHERE
    {}
ORDER BY
    table_catalog,
    table_schema,
    table_name,
    ordinal_position;
"#,
        where_clause(&conditions)
    )
}

/// Query 2: upstream tables feeding each dashboard table.
pub fn lineage(usage: &[TableUsage]) -> String {
    let conditions: Vec<String> = usage
        .iter()
        .map(|t| {
            format!(
                "(target_table_catalog = {} AND target_table_schema = {} AND target_table_name = {})",
                sql_literal(&t.table_ref.catalog),
                sql_literal(&t.table_ref.schema),
                sql_literal(&t.table_ref.table)
            )
        })
        .collect();

    format!(
        r#"-- Query 2: Get upstream table lineage
WITH dashboard_tables AS (
    SELECT DISTINCT
        target_table_catalog,
        target_table_schema,
        target_table_name,
        CONCAT_WS('.', target_table_catalog, target_table_schema, target_table_name) as target_table_full_name
    FROM system.access.table_lineage
    WHERE
        {}
),
upstream_lineage AS (
    SELECT
        dt.target_table_full_name as dashboard_table,
        tl.source_table_catalog,
        tl.source_table_schema,
        tl.source_table_name,
        CONCAT_WS('.', tl.source_table_catalog, tl.source_table_schema, tl.source_table_name) as upstream_table_full_name,
        tl.source_type
    FROM dashboard_tables dt
    INNER JOIN system.access.table_lineage tl
        ON dt.target_table_catalog = tl.target_table_catalog
        AND dt.target_table_schema = tl.target_table_schema
        AND dt.target_table_name = tl.target_table_name
)
SELECT DISTINCT
    dashboard_table,
    upstream_table_full_name,
    source_type
FROM upstream_lineage
ORDER BY dashboard_table, upstream_table_full_name;
"#,
        where_clause(&conditions)
    )
}

/// Query 3: catalog columns not referenced by any widget, per table.
pub fn unused_columns(usage: &[TableUsage]) -> String {
    let header = "-- Query 3: Find unused columns in dashboard tables\n\
                  -- Columns that exist in tables but are NOT referenced in any dashboard widget\n";

    if usage.is_empty() {
        return format!(
            "{header}\n-- No tables referenced by dashboard\n\
             SELECT CAST(NULL AS STRING) as table_name, CAST(NULL AS STRING) as column_name\n\
             WHERE 1 = 0;\n"
        );
    }

    let parts: Vec<String> = usage
        .iter()
        .map(|t| {
            let not_in = if t.used_columns.is_empty() {
                String::new()
            } else {
                format!(
                    "\n    AND column_name NOT IN ({})",
                    literal_list(&t.used_columns)
                )
            };
            format!(
                r#"
-- Table: {name}
-- Columns used in dashboard: {used}
SELECT
    {name_lit} as table_name,
    column_name,
    data_type,
    ordinal_position
FROM system.information_schema.columns
WHERE table_catalog = {catalog}
    AND table_schema = {schema}
    AND table_name = {table}{not_in}
"#,
                name = comment_text(&t.name),
                used = comment_text(&t.used_columns.join(", ")),
                name_lit = sql_literal(&t.name),
                catalog = sql_literal(&t.table_ref.catalog),
                schema = sql_literal(&t.table_ref.schema),
                table = sql_literal(&t.table_ref.table),
            )
        })
        .collect();

    format!("{header}\n{};\n", parts.join("\nUNION ALL\n"))
}

/// Query 4: every catalog column labelled USED or UNUSED by the dashboard.
pub fn comparison(usage: &[TableUsage]) -> String {
    let rows: Vec<String> = usage
        .iter()
        .flat_map(|t| {
            t.used_columns.iter().map(move |col| {
                format!(
                    "    SELECT {} as catalog, {} as schema, {} as table_name, {} as column_name",
                    sql_literal(&t.table_ref.catalog),
                    sql_literal(&t.table_ref.schema),
                    sql_literal(&t.table_ref.table),
                    sql_literal(col)
                )
            })
        })
        .collect();

    let dashboard_columns = if rows.is_empty() {
        "    SELECT CAST(NULL AS STRING) as catalog, CAST(NULL AS STRING) as schema, \
         CAST(NULL AS STRING) as table_name, CAST(NULL AS STRING) as column_name\n    WHERE 1 = 0"
            .to_string()
    } else {
        rows.join("\n    UNION ALL\n")
    };

    format!(
        r#"-- Query 4: Comprehensive comparison - Dashboard columns vs System tables
WITH dashboard_columns AS (
{dashboard_columns}
),
system_columns AS (
    SELECT
        table_catalog as catalog,
        table_schema as schema,
        table_name,
        column_name,
        data_type,
        ordinal_position
    FROM system.information_schema.columns
    WHERE CONCAT_WS('.', table_catalog, table_schema, table_name) IN (
        SELECT DISTINCT CONCAT_WS('.', catalog, schema, table_name)
        FROM dashboard_columns
    )
)
SELECT
    CONCAT_WS('.', sc.catalog, sc.schema, sc.table_name) as full_table_name,
    sc.column_name,
    sc.data_type,
    sc.ordinal_position,
    CASE
        WHEN dc.column_name IS NOT NULL THEN 'YES'
        ELSE 'NO'
    END as used_in_dashboard,
    CASE
        WHEN dc.column_name IS NULL THEN 'UNUSED'
        ELSE 'USED'
    END as status
FROM system_columns sc
LEFT JOIN dashboard_columns dc
    ON sc.catalog = dc.catalog
    AND sc.schema = dc.schema
    AND sc.table_name = dc.table_name
    AND sc.column_name = dc.column_name
ORDER BY
    full_table_name,
    status DESC,
    ordinal_position;
"#
    )
}

fn literal_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| sql_literal(v.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// OR-joined conditions; an empty set matches nothing
fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        "1 = 0".to_string()
    } else {
        conditions.join("\n    OR ")
    }
}
