//! Ready-to-copy column lists per dashboard table

use super::{comment_text, py_literal, TableUsage};

const RULE: &str = "================================================================================";
const THIN_RULE: &str = "--------------------------------------------------------------------------------";

/// Column list renderings for a single table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnListFormats {
    pub table_name: String,
    pub columns: Vec<String>,
    pub comma_separated: String,
    pub backtick_comma: String,
    pub backtick_newline: String,
    pub select_statement: String,
}

impl ColumnListFormats {
    /// Text renderings are flattened to one line per name; `columns` keeps
    /// the names as extracted.
    pub fn new(table: &TableUsage) -> Self {
        let flat: Vec<String> = table.used_columns.iter().map(|c| comment_text(c)).collect();
        let table_name = comment_text(&table.name);
        let backticked: Vec<String> = flat.iter().map(|c| format!("`{}`", c)).collect();
        let select_list = if backticked.is_empty() {
            "*".to_string()
        } else {
            backticked.join(",\n    ")
        };

        Self {
            columns: table.used_columns.clone(),
            comma_separated: flat.join(", "),
            backtick_comma: backticked.join(", "),
            backtick_newline: backticked.join(",\n    "),
            select_statement: format!("SELECT\n    {}\nFROM {}", select_list, table_name),
            table_name,
        }
    }

    pub fn count(&self) -> usize {
        self.columns.len()
    }
}

/// Render the `00_COLUMNS_TO_COPY.txt` document.
pub fn render(usage: &[TableUsage]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("DASHBOARD COLUMNS - READY TO COPY FOR SQL\n");
    out.push_str(RULE);
    out.push_str("\n\n");

    for table in usage {
        let formats = ColumnListFormats::new(table);
        let python_list: Vec<String> = formats.columns.iter().map(|c| py_literal(c)).collect();

        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&format!("TABLE: {}\n", formats.table_name));
        out.push_str(&format!("Column count: {}\n", formats.count()));
        out.push_str(RULE);
        out.push_str("\n\n");

        out.push_str("-- Format 1: Comma-separated (inline)\n");
        out.push_str("-- Copy and paste after SELECT:\n");
        out.push_str(&formats.comma_separated);
        out.push_str("\n\n");

        out.push_str("-- Format 2: Comma-separated with backticks (inline)\n");
        out.push_str("-- Copy and paste after SELECT:\n");
        out.push_str(&formats.backtick_comma);
        out.push_str("\n\n");

        out.push_str("-- Format 3: One column per line with backticks (formatted)\n");
        out.push_str("-- Copy and paste after SELECT:\n");
        out.push_str(&formats.backtick_newline);
        out.push_str("\n\n");

        out.push_str("-- Format 4: Complete SELECT statement\n");
        out.push_str("-- Ready to execute:\n");
        out.push_str(&formats.select_statement);
        out.push_str(";\n\n");

        out.push_str("-- Format 5: Python/Spark list\n");
        out.push_str("-- For use in PySpark select():\n");
        out.push_str(&format!("columns = [{}]\n", python_list.join(", ")));
        out.push_str("df.select(columns)\n\n");

        out.push_str(THIN_RULE);
        out.push_str("\n\n");
    }

    out
}
