//! Table and JSON rendering for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use zipscore_engine::LocationEngine;
use zipscore_model::{AreaScore, Category, ComparisonResult, Higher, MetricKey};

/// One resolved header column, as shown by `zipscore headers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHeader {
    pub key: MetricKey,
    pub column: usize,
    /// Header text found in the dataset.
    pub header: String,
    /// Configured text that matched it.
    pub expected: String,
}

impl ResolvedHeader {
    /// Resolved columns of `engine`, in metric key order.
    pub fn collect(engine: &LocationEngine) -> Vec<Self> {
        let header = engine.dataset().header();
        engine
            .index()
            .iter()
            .map(|(key, column)| Self {
                key,
                column,
                header: header.get(column).cloned().unwrap_or_default(),
                expected: engine.config().header_text(key).to_string(),
            })
            .collect()
    }
}

pub fn print_scores(areas: &[AreaScore]) {
    println!("{}", score_table(areas));
}

pub fn print_comparison(result: &ComparisonResult) {
    println!("{}", comparison_table(result));
    println!("{}", comparison_verdict(result));
}

pub fn print_headers(headers: &[ResolvedHeader]) {
    println!("{}", headers_table(headers));
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

pub fn score_table(areas: &[AreaScore]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Postal code"), header_cell("County")];
    header.extend(Category::ALL.iter().map(|category| header_cell(category.label())));
    header.push(header_cell("Score"));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for area in areas {
        let mut row = vec![
            Cell::new(&area.postal_code).add_attribute(Attribute::Bold),
            optional_cell(area.county.as_deref()),
        ];
        row.extend(
            Category::ALL
                .iter()
                .map(|&category| category_cell(area.score.categories.get(category))),
        );
        row.push(Cell::new(area.score).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    table
}

pub fn comparison_table(result: &ComparisonResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell(&result.a.postal_code),
        header_cell(&result.b.postal_code),
    ]);
    apply_comparison_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        label_cell("County"),
        optional_cell(result.a.county.as_deref()),
        optional_cell(result.b.county.as_deref()),
    ]);
    table.add_row(vec![
        label_cell("Population"),
        population_cell(result, Higher::A),
        population_cell(result, Higher::B),
    ]);
    for category in Category::ALL {
        table.add_row(vec![
            label_cell(category.label()),
            category_cell(result.a.score.categories.get(category)),
            category_cell(result.b.score.categories.get(category)),
        ]);
    }
    table.add_row(vec![
        label_cell("Score"),
        score_cell(result, Higher::A),
        score_cell(result, Higher::B),
    ]);
    table
}

/// One-line outcome, e.g. `90210 scores higher (7.9/10 vs 5.2/10)`.
pub fn comparison_verdict(result: &ComparisonResult) -> String {
    let (a, b) = (&result.a, &result.b);
    match result.higher {
        Higher::A => format!("{} scores higher ({} vs {})", a.postal_code, a.score, b.score),
        Higher::B => format!("{} scores higher ({} vs {})", b.postal_code, b.score, a.score),
        Higher::Tie => format!("{} and {} tie at {}", a.postal_code, b.postal_code, a.score),
    }
}

pub fn headers_table(headers: &[ResolvedHeader]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Column"),
        header_cell("Header"),
        header_cell("Matched on"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for resolved in headers {
        let key = Cell::new(resolved.key.as_str());
        let key = if resolved.key.is_required() {
            key.add_attribute(Attribute::Bold)
        } else {
            key
        };
        table.add_row(vec![
            key,
            Cell::new(resolved.column),
            Cell::new(&resolved.header),
            dim_cell(&resolved.expected),
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

fn apply_comparison_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn score_cell(result: &ComparisonResult, side: Higher) -> Cell {
    let area = if side == Higher::A { &result.a } else { &result.b };
    let cell = Cell::new(area.score).add_attribute(Attribute::Bold);
    if result.higher == side {
        cell.fg(Color::Green)
    } else if result.higher == Higher::Tie {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn population_cell(result: &ComparisonResult, side: Higher) -> Cell {
    let area = if side == Higher::A { &result.a } else { &result.b };
    match area.population {
        Some(population) if result.larger_population == Some(side) => {
            Cell::new(population).add_attribute(Attribute::Bold)
        }
        Some(population) => Cell::new(population),
        None => dim_cell("-"),
    }
}

fn category_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.1}"))
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
