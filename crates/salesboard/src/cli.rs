//! CLI helpers: argument parsing and table/JSON formatters

use anyhow::{bail, Result};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use salesboard_core::analytics::{CategoryView, DimensionTable, SeriesView};
use salesboard_core::sort::metric;
use salesboard_core::types::{ComparisonRow, SortDirection, SortState};
use serde_json::json;

/// Placeholder for a delta with no meaningful baseline
pub const NO_DELTA: &str = "—";

// ============================================================================
// Argument Parsing
// ============================================================================

/// Build a sort state from `--sort` / `--asc`, rejecting unknown columns
pub fn parse_sort(key: &str, asc: bool) -> Result<SortState> {
    if key != SortState::ID_KEY && !metric::COMPARISON_KEYS.contains(&key) {
        bail!(
            "Unknown sort column '{}' (expected one of: {}, {})",
            key,
            SortState::ID_KEY,
            metric::COMPARISON_KEYS.join(", ")
        );
    }

    let direction = if asc {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    Ok(SortState::new(key, direction))
}

// ============================================================================
// Value Formatting
// ============================================================================

/// Relative change as a signed percentage; `None` renders as the placeholder
pub fn format_delta(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:+.1}%", d * 100.0),
        None => NO_DELTA.to_string(),
    }
}

/// Currency amount with two decimals and thousands separators
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

fn delta_cell(delta: Option<f64>, no_color: bool) -> Cell {
    let cell = Cell::new(format_delta(delta));
    if no_color {
        return cell;
    }
    match delta {
        Some(d) if d > 0.0 => cell.fg(Color::Green),
        Some(d) if d < 0.0 => cell.fg(Color::Red),
        Some(_) => cell,
        None => cell.fg(Color::DarkGrey),
    }
}

fn header(table: &mut Table, columns: &[&str], no_color: bool) {
    if no_color {
        table.set_header(columns.to_vec());
    } else {
        table.set_header(
            columns
                .iter()
                .map(|c| Cell::new(*c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
}

// ============================================================================
// Formatters
// ============================================================================

/// Format a series view as a per-bucket table (human) or JSON
pub fn format_series(view: &SeriesView, json: bool, no_color: bool) -> String {
    if json {
        let value = json!({
            "period": view.period.key(),
            "actual": view.actual,
            "reference": view.reference,
            "projection": view.projection,
            "totalToDate": view.total_to_date,
            "displayTotal": view.display_total,
            "referenceDelta": view.reference_delta,
        });
        return serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut columns = vec!["Bucket", "Actual"];
    if view.reference.is_some() {
        columns.push("Reference");
    }
    if view.projection.is_some() {
        columns.push("Projection");
    }
    header(&mut table, &columns, no_color);

    for point in &view.actual.points {
        let mut row = vec![point.label.clone(), format_amount(point.value)];
        if let Some(reference) = &view.reference {
            let value = reference.value_at(point.bucket).unwrap_or(0.0);
            row.push(format_amount(value));
        }
        if let Some(projection) = &view.projection {
            let value = projection.value_at(point.bucket).unwrap_or(0.0);
            row.push(format_amount(value));
        }
        table.add_row(Row::from(row));
    }

    let headline = if view.projection.is_some() {
        "Projected total"
    } else {
        "Total"
    };

    format!(
        "Period {}\n{}\n{}: {}  (to date: {}, vs reference: {})",
        view.period,
        table,
        headline,
        format_amount(view.display_total),
        format_amount(view.total_to_date),
        format_delta(view.reference_delta)
    )
}

/// Format comparison rows as a table (human) or JSON
pub fn format_comparison_rows(
    id_header: &str,
    rows: &[ComparisonRow],
    json: bool,
    no_color: bool,
) -> String {
    if json {
        return serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string());
    }

    if rows.is_empty() {
        return "No rows for this context.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    header(
        &mut table,
        &[
            id_header,
            "Revenue",
            "Prev revenue",
            "Δ revenue",
            "Avg ticket",
            "Prev ticket",
            "Δ ticket",
        ],
        no_color,
    );

    for row in rows {
        table.add_row(Row::from(vec![
            Cell::new(&row.id),
            Cell::new(format_amount(row.revenue)),
            Cell::new(format_amount(row.prev_revenue)),
            delta_cell(row.revenue_delta, no_color),
            Cell::new(format_amount(row.avg_ticket)),
            Cell::new(format_amount(row.prev_avg_ticket)),
            delta_cell(row.ticket_delta, no_color),
        ]));
    }

    table.to_string()
}

/// Format a dimension table against its selected baseline
pub fn format_dimension_table(table: &DimensionTable, json: bool, no_color: bool) -> String {
    let rows = table.rows();
    if json {
        let value = json!({
            "dimension": table.dimension,
            "baseline": table.selected_baseline(),
            "sort": table.sort_state(),
            "rows": rows,
        });
        return serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    }

    let kpi = &table.kpi;
    let delta = kpi.delta(table.selected_baseline());
    format!(
        "{} vs {} period(s) back\nRevenue {} ({})  Orders {}  Avg ticket {} ({})\n{}",
        table.dimension.header(),
        table.selected_baseline(),
        format_amount(kpi.revenue),
        format_delta(delta.and_then(|d| d.revenue_delta)),
        kpi.orders_count,
        format_amount(kpi.avg_ticket),
        format_delta(delta.and_then(|d| d.ticket_delta)),
        format_comparison_rows(table.dimension.header(), &rows, false, no_color)
    )
}

/// Format a drill-down view: breadcrumb trail plus the scoped table
pub fn format_drill(view: &CategoryView, json: bool, no_color: bool) -> String {
    let trail: Vec<&str> = view.breadcrumbs.iter().map(|c| c.label.as_str()).collect();

    if json {
        let value = json!({
            "drill": view.drill,
            "breadcrumbs": trail,
            "baseline": view.table.selected_baseline(),
            "rows": view.table.rows(),
        });
        return serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    }

    format!(
        "{}\n{}",
        trail.join(" > "),
        format_comparison_rows("Category", &view.table.rows(), false, no_color)
    )
}
