//! PySpark scripts equivalent to the SQL queries

use super::{py_literal, TableUsage};

fn py_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| py_literal(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

fn full_names(usage: &[TableUsage]) -> Vec<String> {
    usage.iter().map(|t| t.table_ref.to_string()).collect()
}

/// Script 1: fetch catalog columns for the dashboard tables.
pub fn table_columns(usage: &[TableUsage]) -> String {
    format!(
        r#"# Fetch all columns from dashboard tables using PySpark
from pyspark.sql import SparkSession

spark = SparkSession.builder.getOrCreate()

# Dashboard tables
dashboard_tables = {tables}

# Query system.information_schema.columns
system_columns_df = spark.sql('''
    SELECT
        CONCAT_WS('.', table_catalog, table_schema, table_name) as full_table_name,
        column_name,
        data_type,
        ordinal_position
    FROM system.information_schema.columns
    WHERE CONCAT_WS('.', table_catalog, table_schema, table_name) IN ({{tables}})
    ORDER BY full_table_name, ordinal_position
'''.format(tables=", ".join("'" + t.replace("'", "''") + "'" for t in dashboard_tables) or "NULL"))

# Display results
display(system_columns_df)

# Get columns by table
columns_by_table = {{}}
for row in system_columns_df.collect():
    columns_by_table.setdefault(row.full_table_name, []).append(row.column_name)

print("Columns found in system tables:")
for table, columns in columns_by_table.items():
    print(f"\n{{table}}: {{len(columns)}} columns")
    print(f"  {{', '.join(columns)}}")
"#,
        tables = py_list(&full_names(usage))
    )
}

/// Script 2: upstream lineage of the dashboard tables.
pub fn lineage(usage: &[TableUsage]) -> String {
    format!(
        r#"# Query upstream table lineage using PySpark
from pyspark.sql import SparkSession

spark = SparkSession.builder.getOrCreate()

dashboard_tables = {tables}

# Query table lineage
lineage_df = spark.sql('''
    SELECT DISTINCT
        CONCAT_WS('.', target_table_catalog, target_table_schema, target_table_name) as dashboard_table,
        CONCAT_WS('.', source_table_catalog, source_table_schema, source_table_name) as upstream_table,
        source_type
    FROM system.access.table_lineage
    WHERE CONCAT_WS('.', target_table_catalog, target_table_schema, target_table_name)
        IN ({{tables}})
    ORDER BY dashboard_table, upstream_table
'''.format(tables=", ".join("'" + t.replace("'", "''") + "'" for t in dashboard_tables) or "NULL"))

display(lineage_df)
"#,
        tables = py_list(&full_names(usage))
    )
}

/// Script 3: label every catalog column as used or unused.
pub fn unused_columns(usage: &[TableUsage]) -> String {
    let entries: Vec<String> = usage
        .iter()
        .map(|t| {
            format!(
                "    {}: {},",
                py_literal(&t.table_ref.to_string()),
                py_list(&t.used_columns)
            )
        })
        .collect();
    let mapping = if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n}}", entries.join("\n"))
    };

    format!(
        r#"# Identify unused columns in dashboard tables
from functools import reduce

from pyspark.sql import SparkSession
from pyspark.sql.functions import col, when

spark = SparkSession.builder.getOrCreate()

# Dashboard column usage
dashboard_column_usage = {mapping}

# Get all columns from system tables
all_columns = []
for table_name, used_columns in dashboard_column_usage.items():
    quoted = table_name.replace("'", "''")
    df = spark.sql(f'''
        SELECT
            '{{quoted}}' as table_name,
            column_name,
            data_type
        FROM system.information_schema.columns
        WHERE CONCAT_WS('.', table_catalog, table_schema, table_name) = '{{quoted}}'
    ''')

    # Mark columns as used or unused
    df = df.withColumn('used_in_dashboard',
        when(col('column_name').isin(used_columns), 'YES').otherwise('NO'))

    all_columns.append(df)

if not all_columns:
    raise SystemExit("No dashboard tables to analyze")

# Union all results
unused_columns_df = reduce(lambda a, b: a.union(b), all_columns)

# Filter to show only unused columns
unused_only = unused_columns_df.filter(col('used_in_dashboard') == 'NO')

print("\nUnused columns by table:")
display(unused_only.orderBy('table_name', 'column_name'))

# Summary statistics
summary = unused_columns_df.groupBy('table_name', 'used_in_dashboard').count()
print("\nSummary:")
display(summary)
"#
    )
}
