use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::config::{AnalyticsConfig, ToolKind};
use crate::models::{AgenticFteRecord, MonthProjection, MonthlyUsageRecord, ToolFte};

/// FTE-equivalent gain for one tool-month of usage.
///
/// Productivity tools scale with active users, coding tools with generated
/// lines. An unconfigured tool contributes 0.0 so the monthly total always
/// equals the sum of its breakdown.
pub fn tool_fte(record: &MonthlyUsageRecord, config: &AnalyticsConfig) -> f64 {
    match config.tool(&record.tool).map(|tool| tool.kind) {
        Some(ToolKind::Productivity {
            time_savings_fraction,
        }) => record.active_users as f64 * time_savings_fraction,
        Some(ToolKind::Coding) => {
            let lines = record.lines_generated.unwrap_or(0) as f64;
            lines * config.hours_per_line / config.hours_per_fte
        }
        None => 0.0,
    }
}

/// Build the month-by-month Agentic FTE series, oldest first.
///
/// The latest month gets a linear full-month projection when it is marked
/// partial. The scale-up is a documented simplification, kept as-is.
pub fn compute_fte_series(
    usage: &[MonthlyUsageRecord],
    config: &AnalyticsConfig,
) -> Vec<AgenticFteRecord> {
    let mut by_month: BTreeMap<&str, Vec<&MonthlyUsageRecord>> = BTreeMap::new();
    for record in usage {
        by_month.entry(record.month.as_str()).or_default().push(record);
    }

    let mut series = Vec::with_capacity(by_month.len());
    let mut previous_total: Option<f64> = None;
    let last_month = by_month.keys().next_back().copied();

    for (month, records) in &by_month {
        let breakdown: Vec<ToolFte> = records
            .iter()
            .map(|record| ToolFte {
                tool: record.tool.clone(),
                fte: tool_fte(record, config),
            })
            .collect();
        let total: f64 = breakdown.iter().map(|entry| entry.fte).sum();

        let change_percent = previous_total
            .filter(|prev| *prev > 0.0)
            .map(|prev| (total - prev) / prev * 100.0);
        previous_total = Some(total);

        let projection = if last_month == Some(*month) {
            month_projection(month, records, total)
        } else {
            None
        };

        series.push(AgenticFteRecord {
            month: month.to_string(),
            breakdown,
            total_agentic_ftes: total,
            total_productive_hours: total * config.hours_per_fte,
            change_percent,
            projection,
        });
    }

    series
}

fn month_projection(
    month: &str,
    records: &[&MonthlyUsageRecord],
    total: f64,
) -> Option<MonthProjection> {
    let days_of_data = records
        .iter()
        .filter_map(|record| record.days_of_data)
        .max()?;
    let days_in_month = days_in_month(month)?;
    if days_of_data == 0 || days_of_data >= days_in_month {
        return None;
    }

    Some(MonthProjection {
        days_of_data,
        days_in_month,
        projected_total: total * days_in_month as f64 / days_of_data as f64,
    })
}

/// Calendar days in a "YYYY-MM" month; `None` for malformed keys.
pub fn days_in_month(month: &str) -> Option<u32> {
    let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
