use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dwc_model::{Finding, Severity};

use crate::types::CheckResult;

pub fn print_summary(result: &CheckResult) {
    println!("Event table: {}", result.paths.event.display());
    println!("Occurrence table: {}", result.paths.occurrence.display());
    println!("Emof table: {}", result.paths.emof.display());
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    if !result.taxonomy_checked {
        println!("Taxonomy verification skipped (--no-taxonomy)");
    }

    let summary = &result.report.summary;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("event"), Cell::new(summary.event_rows)]);
    table.add_row(vec![
        Cell::new("occurrence"),
        Cell::new(summary.occurrence_rows),
    ]);
    table.add_row(vec![Cell::new("emof"), Cell::new(summary.emof_rows)]);
    table.add_row(vec![
        Cell::new("merged")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.merged_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Findings: {} error(s), {} warning(s)",
        result.report.error_count(),
        result.report.warning_count()
    );
    print_finding_table(&result.report.findings);
}

fn print_finding_table(findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        let category = a.category.cmp(&b.category);
        if category != Ordering::Equal {
            return category;
        }
        let row = |f: &Finding| f.record.as_ref().map(|r| (r.table, r.row));
        row(a).cmp(&row(b))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Category"),
        header_cell("Record"),
        header_cell("Column"),
        header_cell("Message"),
    ]);
    apply_finding_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for finding in ordered {
        table.add_row(vec![
            severity_cell(finding.severity),
            Cell::new(finding.category),
            match &finding.record {
                Some(record) => Cell::new(record),
                None => dim_cell("-"),
            },
            match &finding.column {
                Some(column) => Cell::new(column),
                None => dim_cell("-"),
            },
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
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
        .set_width(60);
}

fn apply_finding_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 2,
        Severity::Warning => 1,
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
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
