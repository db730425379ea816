use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;

use crate::config::AnalyticsConfig;
use crate::models::{
    DepartmentHeadcount, DepartmentUsage, ExpansionCandidate, FeedbackMessage, MonthlyUsageRecord,
    QuantifiedImpact,
};

pub fn load_config(path: &Path) -> anyhow::Result<AnalyticsConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: AnalyticsConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid analytics config in {}", path.display()))?;
    log::debug!("loaded {} tools from {}", config.tools.len(), path.display());
    Ok(config)
}

pub fn load_feedback(path: &Path) -> anyhow::Result<Vec<FeedbackMessage>> {
    let messages: Vec<FeedbackMessage> = load_json(path, "feedback messages")?;
    log::info!("loaded {} feedback messages from {}", messages.len(), path.display());
    Ok(messages)
}

pub fn load_usage(path: &Path) -> anyhow::Result<Vec<MonthlyUsageRecord>> {
    let records: Vec<MonthlyUsageRecord> = load_json(path, "usage records")?;
    log::info!("loaded {} usage records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_department_usage(path: &Path) -> anyhow::Result<Vec<DepartmentUsage>> {
    load_json(path, "department usage rollups")
}

pub fn load_expansion_candidates(path: &Path) -> anyhow::Result<Vec<ExpansionCandidate>> {
    load_json(path, "expansion candidates")
}

/// Static headcount table, keyed by department name.
pub fn load_headcount(path: &Path) -> anyhow::Result<BTreeMap<String, u64>> {
    let rows: Vec<DepartmentHeadcount> = load_json(path, "headcount table")?;
    Ok(rows
        .into_iter()
        .map(|row| (row.department, row.employees))
        .collect())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {what} in {}", path.display()))
}

/// Import feedback rows from a CSV export of the scraper pipeline.
/// The impact columns are optional as a trio; a partial trio is dropped.
pub fn import_feedback_csv(path: &Path) -> anyhow::Result<Vec<FeedbackMessage>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        text: String,
        author: String,
        department: String,
        date: NaiveDate,
        sentiment: crate::models::Sentiment,
        tool: Option<String>,
        themes: Option<String>,
        challenge: Option<String>,
        impact_task: Option<String>,
        impact_before: Option<String>,
        impact_after: Option<String>,
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open feedback CSV {}", path.display()))?;
    let mut messages = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let impact = match (row.impact_task, row.impact_before, row.impact_after) {
            (Some(task), Some(before), Some(after)) => {
                Some(QuantifiedImpact { task, before, after })
            }
            _ => None,
        };
        let themes = row
            .themes
            .map(|raw| {
                raw.split(';')
                    .map(|theme| theme.trim().to_string())
                    .filter(|theme| !theme.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        messages.push(FeedbackMessage {
            text: row.text,
            author: row.author,
            department: row.department,
            date: row.date,
            sentiment: row.sentiment,
            tool: row.tool,
            themes,
            challenge: row.challenge,
            impact,
        });
    }

    log::info!("imported {} feedback rows from {}", messages.len(), path.display());
    Ok(messages)
}

/// Write a realistic sample dataset for every input the CLI reads.
pub fn seed(dir: &Path) -> anyhow::Result<()> {
    use crate::models::Sentiment;

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;

    let config = AnalyticsConfig::default();

    let feedback = vec![
        FeedbackMessage {
            text: "ChatGPT cut my weekly reporting from 3 hours to 1 hour".to_string(),
            author: "Priya Raman".to_string(),
            department: "Finance".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 4).context("invalid date")?,
            sentiment: Sentiment::Positive,
            tool: None,
            themes: vec!["time savings".to_string()],
            challenge: None,
            impact: Some(QuantifiedImpact {
                task: "weekly reporting".to_string(),
                before: "3 hours".to_string(),
                after: "1 hour".to_string(),
            }),
        },
        FeedbackMessage {
            text: "Cursor's tab completion writes half the boilerplate for me".to_string(),
            author: "Dana Kim".to_string(),
            department: "Engineering".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 12).context("invalid date")?,
            sentiment: Sentiment::Positive,
            tool: Some("cursor".to_string()),
            themes: vec!["code generation".to_string()],
            challenge: None,
            impact: None,
        },
        FeedbackMessage {
            text: "Gemini summaries keep missing action items from long threads".to_string(),
            author: "Marcus Webb".to_string(),
            department: "Sales".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 5, 20).context("invalid date")?,
            sentiment: Sentiment::Negative,
            tool: None,
            themes: vec!["summaries".to_string()],
            challenge: Some("misses action items in long threads".to_string()),
            impact: None,
        },
        FeedbackMessage {
            text: "Tried ChatGPT and Gemini side by side for deck outlines, both fine".to_string(),
            author: "Lena Fischer".to_string(),
            department: "Marketing".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 6, 2).context("invalid date")?,
            sentiment: Sentiment::Neutral,
            tool: None,
            themes: vec!["content drafting".to_string()],
            challenge: None,
            impact: None,
        },
    ];

    let usage = vec![
        MonthlyUsageRecord {
            tool: "chatgpt".to_string(),
            month: "2026-04".to_string(),
            active_users: 310,
            messages: Some(41_200),
            lines_generated: None,
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "gemini".to_string(),
            month: "2026-04".to_string(),
            active_users: 140,
            messages: Some(9_800),
            lines_generated: None,
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "cursor".to_string(),
            month: "2026-04".to_string(),
            active_users: 85,
            messages: None,
            lines_generated: Some(240_000),
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "chatgpt".to_string(),
            month: "2026-05".to_string(),
            active_users: 342,
            messages: Some(48_900),
            lines_generated: None,
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "gemini".to_string(),
            month: "2026-05".to_string(),
            active_users: 151,
            messages: Some(11_400),
            lines_generated: None,
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "cursor".to_string(),
            month: "2026-05".to_string(),
            active_users: 92,
            messages: None,
            lines_generated: Some(265_000),
            days_of_data: None,
        },
        MonthlyUsageRecord {
            tool: "chatgpt".to_string(),
            month: "2026-06".to_string(),
            active_users: 355,
            messages: Some(18_700),
            lines_generated: None,
            days_of_data: Some(11),
        },
        MonthlyUsageRecord {
            tool: "gemini".to_string(),
            month: "2026-06".to_string(),
            active_users: 149,
            messages: Some(4_100),
            lines_generated: None,
            days_of_data: Some(11),
        },
        MonthlyUsageRecord {
            tool: "cursor".to_string(),
            month: "2026-06".to_string(),
            active_users: 97,
            messages: None,
            lines_generated: Some(98_000),
            days_of_data: Some(11),
        },
    ];

    let departments = vec![
        DepartmentUsage {
            department: "Engineering".to_string(),
            seats_by_tool: BTreeMap::from([
                ("chatgpt".to_string(), 110u64),
                ("cursor".to_string(), 92),
            ]),
            activity: 212_000,
        },
        DepartmentUsage {
            department: "Sales".to_string(),
            seats_by_tool: BTreeMap::from([
                ("chatgpt".to_string(), 95u64),
                ("gemini".to_string(), 60),
            ]),
            activity: 31_000,
        },
        DepartmentUsage {
            department: "Marketing".to_string(),
            seats_by_tool: BTreeMap::from([
                ("chatgpt".to_string(), 48u64),
                ("gemini".to_string(), 41),
            ]),
            activity: 18_500,
        },
        DepartmentUsage {
            department: "Finance".to_string(),
            seats_by_tool: BTreeMap::from([("chatgpt".to_string(), 34u64)]),
            activity: 6_900,
        },
        DepartmentUsage {
            department: "Support".to_string(),
            seats_by_tool: BTreeMap::from([("gemini".to_string(), 50u64)]),
            activity: 12_300,
        },
    ];

    let headcount = vec![
        DepartmentHeadcount {
            department: "Engineering".to_string(),
            employees: 180,
        },
        DepartmentHeadcount {
            department: "Sales".to_string(),
            employees: 140,
        },
        DepartmentHeadcount {
            department: "Marketing".to_string(),
            employees: 75,
        },
        DepartmentHeadcount {
            department: "Finance".to_string(),
            employees: 60,
        },
        DepartmentHeadcount {
            department: "Support".to_string(),
            employees: 110,
        },
    ];

    let expansion = vec![
        ExpansionCandidate {
            department: "Engineering".to_string(),
            employees: 180,
            current_seats: 202,
            seat_gaps: BTreeMap::from([("cursor".to_string(), 60u64)]),
            upgrade_seats: 25,
            total_additional_monthly_cost: 3_400.0,
            monthly_opportunity_value: 11_800.0,
        },
        ExpansionCandidate {
            department: "Sales".to_string(),
            employees: 140,
            current_seats: 155,
            seat_gaps: BTreeMap::from([("chatgpt".to_string(), 45u64)]),
            upgrade_seats: 0,
            total_additional_monthly_cost: 2_700.0,
            monthly_opportunity_value: 7_200.0,
        },
        ExpansionCandidate {
            department: "Support".to_string(),
            employees: 110,
            current_seats: 50,
            seat_gaps: BTreeMap::from([
                ("chatgpt".to_string(), 40u64),
                ("gemini".to_string(), 20),
            ]),
            upgrade_seats: 0,
            total_additional_monthly_cost: 3_000.0,
            monthly_opportunity_value: 6_500.0,
        },
        ExpansionCandidate {
            department: "Finance".to_string(),
            employees: 60,
            current_seats: 34,
            seat_gaps: BTreeMap::from([("chatgpt".to_string(), 15u64)]),
            upgrade_seats: 0,
            total_additional_monthly_cost: 900.0,
            monthly_opportunity_value: 2_100.0,
        },
        ExpansionCandidate {
            department: "Marketing".to_string(),
            employees: 75,
            current_seats: 89,
            seat_gaps: BTreeMap::from([("gemini".to_string(), 10u64)]),
            upgrade_seats: 12,
            total_additional_monthly_cost: 1_020.0,
            monthly_opportunity_value: 1_950.0,
        },
    ];

    write_json(&dir.join("config.json"), &config)?;
    write_json(&dir.join("feedback.json"), &feedback)?;
    write_json(&dir.join("usage.json"), &usage)?;
    write_json(&dir.join("departments.json"), &departments)?;
    write_json(&dir.join("headcount.json"), &headcount)?;
    write_json(&dir.join("expansion.json"), &expansion)?;

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
