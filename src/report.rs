use std::fmt::Write;

use crate::config::AnalyticsConfig;
use crate::models::{
    AgenticFteRecord, AttributionSummary, DepartmentAdoptionRecord, ExpansionPlan,
    IncrementalRoiResult, ToolSentimentResult, TrendLabel,
};

/// Display band for a composite adoption score. Presentation-only.
pub fn adoption_band(score: u32) -> &'static str {
    if score >= 80 {
        "Excellent"
    } else if score >= 60 {
        "Good"
    } else {
        "Low"
    }
}

fn trend_label(trend: TrendLabel) -> &'static str {
    match trend {
        TrendLabel::Improving => "improving",
        TrendLabel::Declining => "declining",
        TrendLabel::Stable => "stable",
        TrendLabel::InsufficientData => "insufficient data",
    }
}

fn tool_name<'a>(config: &'a AnalyticsConfig, id: &'a str) -> &'a str {
    config.tool(id).map_or(id, |tool| tool.name.as_str())
}

pub fn build_report(
    config: &AnalyticsConfig,
    sentiment: &[ToolSentimentResult],
    attribution: &AttributionSummary,
    fte_series: &[AgenticFteRecord],
    roi: Option<&IncrementalRoiResult>,
    adoption: &[DepartmentAdoptionRecord],
    plan: &ExpansionPlan,
) -> String {
    let mut output = String::new();
    let period = fte_series
        .last()
        .map(|record| record.month.as_str())
        .unwrap_or("no usage data");

    let _ = writeln!(output, "# AI Tool Adoption & Value Report");
    let _ = writeln!(output, "Reporting period through {period}");
    let _ = writeln!(output);

    let _ = writeln!(output, "## Perceived Value by Tool");
    if sentiment.is_empty() {
        let _ = writeln!(output, "No tools configured.");
    } else {
        for result in sentiment {
            let _ = writeln!(
                output,
                "- {}: {}/100 across {} messages ({} positive / {} neutral / {} negative), trend {}",
                tool_name(config, &result.tool),
                result.score,
                result.total_feedback,
                result.breakdown.positive,
                result.breakdown.neutral,
                result.breakdown.negative,
                trend_label(result.trend)
            );
            if !result.themes.is_empty() {
                let _ = writeln!(output, "  - themes: {}", result.themes.join(", "));
            }
            for impact in result.top_impacts.iter().take(2) {
                let reduction = impact
                    .reduction_percent
                    .map(|percent| format!("{percent}%"))
                    .unwrap_or_else(|| "N/A".to_string());
                let _ = writeln!(
                    output,
                    "  - {}: {} -> {} ({} less time)",
                    impact.task, impact.before, impact.after, reduction
                );
            }
            for challenge in &result.challenges {
                let _ = writeln!(output, "  - challenge: {challenge}");
            }
            if let Some(quote) = result.quotes.first() {
                let _ = writeln!(output, "  - \"{}\" ({})", quote.text, quote.author);
            }
        }
        let _ = writeln!(
            output,
            "{} of {} messages were attributed; {} mention more than one tool.",
            attribution.attributed_messages,
            attribution.total_messages,
            attribution.multi_tool_messages
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Agentic FTE Trajectory");
    if fte_series.is_empty() {
        let _ = writeln!(output, "No usage recorded.");
    } else {
        for record in fte_series {
            let change = record
                .change_percent
                .map(|percent| format!(", {percent:+.1}% vs prior month"))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "- {}: {:.1} agentic FTEs ({:.0} productive hours){}",
                record.month, record.total_agentic_ftes, record.total_productive_hours, change
            );
            if let Some(projection) = record.projection {
                let _ = writeln!(
                    output,
                    "  - month to date ({} of {} days); linear full-month projection {:.1} FTEs",
                    projection.days_of_data, projection.days_in_month, projection.projected_total
                );
            }
        }
        if let Some(latest) = fte_series.last() {
            for entry in &latest.breakdown {
                let _ = writeln!(
                    output,
                    "  - {}: {:.1} FTEs in {}",
                    tool_name(config, &entry.tool),
                    entry.fte,
                    latest.month
                );
            }
        }
        let _ = writeln!(
            output,
            "Assumes {} hours per FTE-month; coding tools at {} manual hours per generated line ({} lines/hour baseline).",
            config.hours_per_fte, config.hours_per_line, config.manual_lines_per_hour
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Incremental ROI: Upgrade Scenarios");
    match roi {
        None => {
            let _ = writeln!(output, "No upgrade comparison configured.");
        }
        Some(result) => {
            let _ = writeln!(
                output,
                "{:.0} incremental hours per month, valued at {:.0} ({:.0}/hour).",
                result.incremental_hours, result.incremental_value, config.hourly_rate
            );
            for (label, scenario) in [
                ("Additive (keep both tools)", result.additive),
                ("Replacement (swap seats)", result.replacement),
            ] {
                let roi_text = scenario
                    .incremental_roi
                    .map(|value| format!("{value:.1}x"))
                    .unwrap_or_else(|| "undefined (no incremental cost)".to_string());
                let delta = scenario
                    .delta_percent
                    .map(|percent| format!(", {percent:+.0}% vs industry benchmark"))
                    .unwrap_or_default();
                let _ = writeln!(
                    output,
                    "- {}: cost {:.0}/month, ROI {}{}",
                    label, scenario.incremental_cost, roi_text, delta
                );
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Department Adoption");
    if adoption.is_empty() {
        let _ = writeln!(output, "No department usage recorded.");
    } else {
        for record in adoption.iter().take(10) {
            let _ = writeln!(
                output,
                "- {}: {}/100 ({}) with {} seats across {} employees",
                record.department,
                record.adoption_score,
                adoption_band(record.adoption_score),
                record.active_seats,
                record.employees
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## License Expansion Plan");
    if plan.phases.is_empty() {
        let _ = writeln!(output, "No expansion candidates.");
    } else {
        for opportunity in plan.opportunities.iter().take(5) {
            let roi_text = opportunity
                .roi
                .map(|value| format!("{value:.1}x"))
                .unwrap_or_else(|| "undefined".to_string());
            let _ = writeln!(
                output,
                "- {}: {} new seats, net annual benefit {:.0}, ROI {}",
                opportunity.department, opportunity.new_seats, opportunity.net_annual_benefit,
                roi_text
            );
        }
        let _ = writeln!(output);
        for phase in &plan.phases {
            let _ = writeln!(
                output,
                "- Phase {} ({}): {} new seats, first-year cost {:.0} (run rate {:.0}/yr), cumulative coverage {:.1}%",
                phase.phase,
                phase.departments.join(", "),
                phase.new_seats,
                phase.first_year_cost,
                phase.annual_cost,
                phase.cumulative_coverage_percent
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpansionCandidate, MonthlyUsageRecord};
    use crate::{adoption, expansion, fte, sentiment};
    use std::collections::BTreeMap;

    #[test]
    fn bands_split_at_sixty_and_eighty() {
        assert_eq!(adoption_band(92), "Excellent");
        assert_eq!(adoption_band(80), "Excellent");
        assert_eq!(adoption_band(79), "Good");
        assert_eq!(adoption_band(60), "Good");
        assert_eq!(adoption_band(59), "Low");
        assert_eq!(adoption_band(0), "Low");
    }

    #[test]
    fn report_renders_every_section_on_empty_inputs() {
        let config = AnalyticsConfig::default();
        let classifier = sentiment::KeywordClassifier::from_tools(&config.tools);
        let (results, summary) = sentiment::analyze_feedback(&[], &config.tools, &classifier);
        let series = fte::compute_fte_series(&[], &config);
        let records = adoption::score_departments(&[], &BTreeMap::new());
        let plan = expansion::build_plan(&[], 0);

        let report = build_report(&config, &results, &summary, &series, None, &records, &plan);
        assert!(report.contains("# AI Tool Adoption & Value Report"));
        assert!(report.contains("## Perceived Value by Tool"));
        assert!(report.contains("No usage recorded."));
        assert!(report.contains("No upgrade comparison configured."));
        assert!(report.contains("No department usage recorded."));
        assert!(report.contains("No expansion candidates."));
        // zero-feedback tools still score the neutral default
        assert!(report.contains("50/100 across 0 messages"));
    }

    #[test]
    fn report_surfaces_projection_and_phases() {
        let config = AnalyticsConfig::default();
        let classifier = sentiment::KeywordClassifier::from_tools(&config.tools);
        let (results, summary) = sentiment::analyze_feedback(&[], &config.tools, &classifier);

        let usage = vec![
            MonthlyUsageRecord {
                tool: "chatgpt".to_string(),
                month: "2026-05".to_string(),
                active_users: 100,
                messages: Some(10_000),
                lines_generated: None,
                days_of_data: None,
            },
            MonthlyUsageRecord {
                tool: "chatgpt".to_string(),
                month: "2026-06".to_string(),
                active_users: 100,
                messages: Some(4_000),
                lines_generated: None,
                days_of_data: Some(10),
            },
        ];
        let series = fte::compute_fte_series(&usage, &config);

        let candidates = vec![ExpansionCandidate {
            department: "Sales".to_string(),
            employees: 140,
            current_seats: 80,
            seat_gaps: BTreeMap::from([("chatgpt".to_string(), 45u64)]),
            upgrade_seats: 0,
            total_additional_monthly_cost: 2_700.0,
            monthly_opportunity_value: 7_200.0,
        }];
        let plan = expansion::build_plan(&candidates, 500);

        let report = build_report(
            &config,
            &results,
            &summary,
            &series,
            None,
            &[],
            &plan,
        );
        assert!(report.contains("Reporting period through 2026-06"));
        assert!(report.contains("linear full-month projection"));
        assert!(report.contains("Phase 1 (Sales): 45 new seats"));
        assert!(report.contains("cumulative coverage 9.0%"));
    }
}
