use colored::Colorize;

use crate::report::{BalanceMetric, GroupSummary, ReportPayload};

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 12;

/// Formats minor units as a decimal amount, e.g. `-12345` as `-123.45`.
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

pub fn empty_notice() -> String {
    "No groups to report on.".yellow().to_string()
}

/// Renders groups as rows and intervals as columns, with a trailing total.
pub fn render_report(payload: &ReportPayload, metric: BalanceMetric) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!(
            "{} ({} to {})",
            metric.label(),
            payload.start_date,
            payload.end_date
        )
        .bold()
    ));

    let mut header = format!("{:<NAME_WIDTH$}", "");
    for record in &payload.interval_data {
        header.push_str(&format!("{:>CELL_WIDTH$}", record.date));
    }
    header.push_str(&format!("{:>CELL_WIDTH$}", "Total"));
    out.push_str(&format!("{}\n", header.bold()));

    for group in &payload.data {
        out.push_str(&group_line(group, metric));
        out.push('\n');
    }

    let mut footer = format!("{:<NAME_WIDTH$}", truncate("Total"));
    for record in &payload.interval_data {
        footer.push_str(&cell(metric.of_totals(&record.totals)));
    }
    footer.push_str(&cell(metric.of_totals(&payload.totals)));
    out.push_str(&format!("{}\n", footer.bold()));
    out
}

fn group_line(group: &GroupSummary, metric: BalanceMetric) -> String {
    let mut line = format!("{:<NAME_WIDTH$}", truncate(&group.name));
    for record in &group.interval_data {
        line.push_str(&cell(metric.of_totals(&record.totals)));
    }
    line.push_str(&cell(metric.of_totals(&group.totals)));
    line
}

fn cell(value: i64) -> String {
    let text = format!("{:>CELL_WIDTH$}", format_amount(value));
    if value < 0 {
        text.red().to_string()
    } else {
        text
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH - 1 {
        return name.to_string();
    }
    let mut short: String = name.chars().take(NAME_WIDTH - 2).collect();
    short.push('~');
    short
}
