//! Table rendering for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use msku_model::{CategoryKind, MappingReport, ProcessingSummary};

/// Renders a percentage with one decimal, e.g. `70.0%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Headline counts of a batch as label/value pairs.
pub fn overview_rows(summary: &ProcessingSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Total records", summary.total_records.to_string()),
        ("Mapped", summary.mapped_records.to_string()),
        ("Unmapped", summary.unmapped_records.to_string()),
        ("Success rate", format_percentage(summary.success_rate)),
        ("Categories", summary.categories.len().to_string()),
    ]
}

/// The `top` most frequent categories as `[msku, count, share, kind]`.
pub fn category_rows(summary: &ProcessingSummary, top: usize) -> Vec<[String; 4]> {
    summary
        .top_categories(top)
        .iter()
        .map(|stat| {
            [
                stat.msku.clone(),
                stat.count.to_string(),
                format_percentage(stat.percentage),
                stat.kind.label().to_string(),
            ]
        })
        .collect()
}

pub fn overview_table(summary: &ProcessingSummary) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (label, value) in overview_rows(summary) {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn category_table(summary: &ProcessingSummary, top: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("MSKU"),
        header_cell("Records"),
        header_cell("Share"),
        header_cell("Kind"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for stat in summary.top_categories(top) {
        table.add_row(vec![
            Cell::new(&stat.msku),
            Cell::new(stat.count),
            Cell::new(format_percentage(stat.percentage)),
            kind_cell(stat.kind),
        ]);
    }
    table
}

pub fn report_table(report: &MappingReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("MSKU"),
        header_cell("Variants"),
        header_cell("Samples"),
        header_cell("Source"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for detail in &report.categories {
        let samples = if detail.sample_variants.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(detail.sample_variants.join(", "))
        };
        let source = if detail.is_auto_generated {
            Cell::new("auto").fg(Color::Yellow)
        } else {
            dim_cell("predefined")
        };
        table.add_row(vec![
            Cell::new(&detail.msku)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(detail.variant_count),
            samples,
            source,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_categories).add_attribute(Attribute::Bold),
        dim_cell(format!(
            "{} predefined, {} auto",
            report.predefined_categories, report.auto_generated_categories
        )),
        dim_cell("-"),
    ]);
    table
}

/// Identifier/category pairs, one row each.
pub fn classification_table<'a, I>(rows: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Identifier"),
        header_cell("Category"),
        header_cell("Kind"),
    ]);
    apply_table_style(&mut table);
    for (identifier, category) in rows {
        table.add_row(vec![
            Cell::new(identifier),
            Cell::new(category),
            kind_cell(CategoryKind::of(category)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_cell(kind: CategoryKind) -> Cell {
    let cell = Cell::new(kind.label());
    match kind {
        CategoryKind::Brand => cell.fg(Color::Magenta),
        CategoryKind::Pattern => cell.fg(Color::Blue),
        CategoryKind::Product => cell.fg(Color::Green),
        CategoryKind::AutoGenerated => cell,
        CategoryKind::Uncategorized => cell.fg(Color::Red),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
