//! Template rendering for CLI output using outstanding

use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;
use treeloclib::{render_summary, FileTable, Summary, TableRow};

/// Include template at compile time
const FILE_TABLE_TEMPLATE: &str = include_str!("../templates/file_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

const NAME_WIDTH: usize = 50;
const CELL_WIDTH: usize = 9;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded name (left-aligned, padded to name_width)
    name: String,
    /// Pre-padded cells (right-aligned, padded to cell_width)
    cells: Vec<String>,
}

/// Data context for the file table template
#[derive(Debug, Serialize)]
struct FileTableContext {
    /// Pre-padded name column header
    name_header: String,
    /// Pre-padded column headers
    columns: Vec<String>,
    /// Separator line (dashes)
    separator: String,
    rows: Vec<TemplateRow>,
    total: TemplateRow,
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len && max_len > 2 {
        let tail: String = name.chars().skip(len - (max_len - 2)).collect();
        format!("..{tail}")
    } else {
        name.to_string()
    }
}

fn pad_cells(values: &[String], cell_width: usize) -> Vec<String> {
    values
        .iter()
        .map(|v| format!("{:>width$}", v, width = cell_width))
        .collect()
}

fn to_template_row(row: &TableRow, name_width: usize, cell_width: usize) -> TemplateRow {
    TemplateRow {
        name: format!(
            "{:<width$}",
            truncate_name(&row.label, name_width),
            width = name_width
        ),
        cells: pad_cells(&row.values, cell_width),
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Render the per-file breakdown using outstanding
pub fn render_file_table(
    table: &FileTable,
    name_width: usize,
    cell_width: usize,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();

    let name_header = table.headers.first().map(String::as_str).unwrap_or("");
    let columns = table.headers.get(1..).unwrap_or_default();

    let context = FileTableContext {
        name_header: format!("{:<width$}", name_header, width = name_width),
        columns: pad_cells(columns, cell_width),
        separator: "-".repeat(name_width + (cell_width + 1) * columns.len()),
        rows: table
            .rows
            .iter()
            .map(|r| to_template_row(r, name_width, cell_width))
            .collect(),
        total: to_template_row(&table.footer, name_width, cell_width),
    };

    let rendered = render_with_output(FILE_TABLE_TEMPLATE, &context, &theme, output_mode)?;

    Ok(rendered)
}

/// Render a full report using outstanding's auto dispatch.
///
/// JSON mode serializes `document` as-is. Text modes print the optional
/// per-file table followed by the three-line summary.
pub fn render_report<T: Serialize>(
    document: &T,
    summary: &Summary,
    table: Option<&FileTable>,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    if matches!(output_mode, OutputMode::Json) {
        let theme = create_theme();
        let mut out = render_auto(FILE_TABLE_TEMPLATE, document, &theme, output_mode)?;
        if !out.ends_with('\n') {
            out.push('\n');
        }
        return Ok(out);
    }

    let mut out = String::new();
    if let Some(table) = table {
        out.push_str(&render_file_table(table, NAME_WIDTH, CELL_WIDTH, output_mode)?);
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&render_summary(summary));
    Ok(out)
}
