use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use gastos_map::{ConfidenceLevel, ConfidenceThresholds, MappingResult, MatchKind};
use gastos_model::{CanonicalField, IssueKind, ValidationIssue};
use gastos_report::{format_brl, format_date_br};
use gastos_transform::format_cnpj;

use crate::types::{DebitosResult, SaldosResult};

/// Issues listed row by row before the table is cut off.
const MAX_ISSUE_ROWS: usize = 25;

pub fn print_debitos(result: &DebitosResult) {
    println!("Source: {}", describe_source(&result.source));
    print_mapping(&result.mapping);

    let outcome = &result.outcome;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Read"), Cell::new(outcome.input_rows)]);
    table.add_row(vec![
        Cell::new("Rejected"),
        count_cell(outcome.rejected_rows, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates collapsed"),
        count_cell(outcome.duplicates_collapsed, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Valid"), Cell::new(outcome.records.len())]);
    table.add_row(vec![
        Cell::new("After filters")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.filtered.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let kpis = &result.kpis;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total"),
        header_cell("Débitos"),
        header_cell("Fornecedores"),
        header_cell("Secretarias"),
        header_cell("Outliers"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(format_brl(kpis.total)).add_attribute(Attribute::Bold),
        Cell::new(kpis.records),
        Cell::new(kpis.fornecedores),
        Cell::new(kpis.secretarias),
        count_cell(kpis.outliers, Color::Yellow),
    ]);
    println!("{table}");

    if !result.by_secretaria.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Secretaria"), header_cell("Total")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for row in &result.by_secretaria {
            table.add_row(vec![
                text_cell(&row.secretaria),
                Cell::new(format_brl(row.total)),
            ]);
        }
        total_row(&mut table, format_brl(kpis.total));
        println!();
        println!("Totals by secretaria:");
        println!("{table}");
    }

    if !result.top_fornecedores.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("#"),
            header_cell("Fornecedor"),
            header_cell("CNPJ"),
            header_cell("Total"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for (index, row) in result.top_fornecedores.iter().enumerate() {
            table.add_row(vec![
                dim_cell(index + 1),
                text_cell(&row.fornecedor),
                Cell::new(format_cnpj(&row.cnpj)),
                Cell::new(format_brl(row.total)),
            ]);
        }
        println!();
        println!("Top fornecedores:");
        println!("{table}");
    }

    let outliers: Vec<_> = result.filtered.iter().filter(|r| r.is_outlier).collect();
    if !outliers.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Data"),
            header_cell("Secretaria"),
            header_cell("Fornecedor"),
            header_cell("Valor"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        for record in outliers {
            table.add_row(vec![
                Cell::new(format_date_br(record.date)),
                text_cell(&record.secretaria),
                text_cell(&record.fornecedor),
                Cell::new(format_brl(record.amount))
                    .fg(Color::Yellow)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        println!();
        println!("Outliers:");
        println!("{table}");
    }

    print_issue_table(&outcome.issues);
    for path in [&result.output, &result.issues_output].into_iter().flatten() {
        println!("Wrote {}", path.display());
    }
}

pub fn print_saldos(result: &SaldosResult) {
    println!("Source: {}", describe_source(&result.source));
    if result.only_livre {
        println!("Resources: LIVRE only");
    }
    let kpis = &result.kpis;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Saldo total"),
        header_cell("Contas"),
        header_cell("Secretarias"),
    ]);
    apply_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        money_cell(kpis.total).add_attribute(Attribute::Bold),
        Cell::new(kpis.contas),
        Cell::new(kpis.secretarias),
    ]);
    println!("{table}");

    if !result.by_secretaria.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Secretaria"), header_cell("Saldo")]);
        apply_summary_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for row in &result.by_secretaria {
            table.add_row(vec![text_cell(&row.secretaria), money_cell(row.saldo_livre)]);
        }
        total_row(&mut table, format_brl(kpis.total));
        println!();
        println!("Saldo by secretaria:");
        println!("{table}");
    }
    if let Some(path) = &result.output {
        println!("Wrote {}", path.display());
    }
}

pub fn print_mapping(result: &MappingResult) {
    let thresholds = ConfidenceThresholds::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Match"),
        header_cell("Score"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in CanonicalField::ALL {
        let suggestion = result.suggestions.iter().find(|s| s.field == field);
        let row = match suggestion {
            Some(suggestion) => vec![
                field_cell(field),
                Cell::new(&suggestion.source_column),
                match_cell(suggestion.kind),
                confidence_cell(suggestion.confidence, &thresholds),
                dim_cell(&suggestion.explanation),
            ],
            None if field.is_required() => vec![
                field_cell(field),
                Cell::new("missing")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ],
            None => vec![
                field_cell(field),
                dim_cell("not mapped"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
    if !result.unmapped_columns.is_empty() {
        println!("Unused columns: {}", result.unmapped_columns.join(", "));
    }
}

fn print_issue_table(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Detail"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in issues.iter().take(MAX_ISSUE_ROWS) {
        table.add_row(vec![
            // Spreadsheet row: header is row 1.
            Cell::new(issue.row + 2),
            field_cell(issue.field),
            kind_cell(issue.kind),
            Cell::new(&issue.detail),
        ]);
    }
    println!();
    println!("Issues ({}):", issues.len());
    println!("{table}");
    if issues.len() > MAX_ISSUE_ROWS {
        println!(
            "... {} more (use --issues-output to save all)",
            issues.len() - MAX_ISSUE_ROWS
        );
    }
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
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn total_row(table: &mut Table, total: String) {
    let mut row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    for _ in 1..table.column_count().saturating_sub(1) {
        row.push(dim_cell("-"));
    }
    row.push(Cell::new(total).add_attribute(Attribute::Bold));
    table.add_row(row);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: CanonicalField) -> Cell {
    Cell::new(field.source_label())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(vazio)")
    } else {
        Cell::new(value)
    }
}

fn money_cell(value: f64) -> Cell {
    let cell = Cell::new(format_brl(value));
    if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Explicit => Cell::new("explicit").fg(Color::Green),
        MatchKind::Exact => Cell::new("exact").fg(Color::Green),
        MatchKind::Fuzzy => Cell::new("fuzzy").fg(Color::Yellow),
    }
}

fn confidence_cell(confidence: f32, thresholds: &ConfidenceThresholds) -> Cell {
    let cell = Cell::new(format!("{confidence:.2}"));
    match thresholds.categorize(confidence) {
        Some(ConfidenceLevel::High) => cell.fg(Color::Green),
        Some(ConfidenceLevel::Medium) => cell.fg(Color::Yellow),
        Some(ConfidenceLevel::Low) | None => cell.fg(Color::Red),
    }
}

fn kind_cell(kind: IssueKind) -> Cell {
    let color = match kind {
        IssueKind::MissingColumn => Color::Magenta,
        _ => Color::Red,
    };
    Cell::new(kind.as_str()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn describe_source(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
