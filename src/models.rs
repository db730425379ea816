use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment label assigned upstream by the feedback classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// A before/after time claim quoted in a feedback message ("3 hours" -> "1 hour").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantifiedImpact {
    pub task: String,
    pub before: String,
    pub after: String,
}

/// One piece of tool feedback scraped from Confluence or Slack.
/// Immutable once ingested; the sentiment tag arrives pre-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMessage {
    pub text: String,
    pub author: String,
    pub department: String,
    pub date: NaiveDate,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub impact: Option<QuantifiedImpact>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

/// A quantified impact with its derived time reduction.
/// `reduction_percent` is `None` when either duration failed to parse.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactHighlight {
    pub task: String,
    pub before: String,
    pub after: String,
    pub reduction_percent: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub sentiment: Sentiment,
}

/// Perceived-value result for one tool over one reporting run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSentimentResult {
    pub tool: String,
    /// 0-100; exactly 50 with zero feedback.
    pub score: u32,
    pub total_feedback: usize,
    pub breakdown: SentimentBreakdown,
    pub themes: Vec<String>,
    pub top_impacts: Vec<ImpactHighlight>,
    pub challenges: Vec<String>,
    pub quotes: Vec<Quote>,
    pub trend: TrendLabel,
}

/// How feedback messages mapped onto tools: a message can count toward
/// several tools, so `attribution_total` may exceed `attributed_messages`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributionSummary {
    pub total_messages: usize,
    pub attributed_messages: usize,
    pub attribution_total: usize,
    pub multi_tool_messages: usize,
}

/// One tool-month of usage. Closed months are immutable; the latest month
/// may be partial, in which case `days_of_data` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyUsageRecord {
    pub tool: String,
    /// "YYYY-MM"; lexicographic order is chronological order.
    pub month: String,
    pub active_users: u64,
    #[serde(default)]
    pub messages: Option<u64>,
    #[serde(default)]
    pub lines_generated: Option<u64>,
    #[serde(default)]
    pub days_of_data: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolFte {
    pub tool: String,
    pub fte: f64,
}

/// Linear scale-up of a partial month to a full-month estimate.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    pub days_of_data: u32,
    pub days_in_month: u32,
    pub projected_total: f64,
}

/// Derived productivity metrics for one month; no state of its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgenticFteRecord {
    pub month: String,
    pub breakdown: Vec<ToolFte>,
    pub total_agentic_ftes: f64,
    pub total_productive_hours: f64,
    /// vs the previous month; `None` for the first month or a zero baseline.
    pub change_percent: Option<f64>,
    pub projection: Option<MonthProjection>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiScenario {
    pub incremental_cost: f64,
    /// `None` when the scenario costs nothing to adopt.
    pub incremental_roi: Option<f64>,
    /// vs the industry benchmark; `None` without one.
    pub delta_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementalRoiResult {
    pub incremental_hours: f64,
    pub incremental_value: f64,
    pub additive: RoiScenario,
    pub replacement: RoiScenario,
}

/// Per-department usage rollup for one reporting period. Activity is
/// already summed across tools upstream (messages, prompts, or lines).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUsage {
    pub department: String,
    pub seats_by_tool: BTreeMap<String, u64>,
    pub activity: u64,
}

impl DepartmentUsage {
    pub fn active_seats(&self) -> u64 {
        self.seats_by_tool.values().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHeadcount {
    pub department: String,
    pub employees: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub coverage: f64,
    pub multi_tool: f64,
    pub intensity: f64,
    pub impact: f64,
}

/// Composite adoption record, recomputed from scratch each period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAdoptionRecord {
    pub department: String,
    pub employees: u64,
    pub active_seats: u64,
    pub activity: u64,
    pub seats_per_employee: f64,
    pub activity_per_seat: f64,
    pub activity_per_employee: f64,
    pub components: ScoreComponents,
    /// 0-100 composite.
    pub adoption_score: u32,
}

/// Upstream-sized expansion candidate for one department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionCandidate {
    pub department: String,
    pub employees: u64,
    pub current_seats: u64,
    /// Additional seats per tool.
    #[serde(default)]
    pub seat_gaps: BTreeMap<String, u64>,
    /// Existing seats moved to a higher tier.
    #[serde(default)]
    pub upgrade_seats: u64,
    pub total_additional_monthly_cost: f64,
    pub monthly_opportunity_value: f64,
}

impl ExpansionCandidate {
    pub fn new_seats(&self) -> u64 {
        self.seat_gaps.values().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionOpportunity {
    pub department: String,
    pub employees: u64,
    pub new_seats: u64,
    pub upgrade_seats: u64,
    pub monthly_cost: f64,
    pub monthly_value: f64,
    pub net_annual_benefit: f64,
    /// `None` when the candidate adds no cost.
    pub roi: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloutPhase {
    /// 1-based phase number; one phase per quarter.
    pub phase: usize,
    pub departments: Vec<String>,
    pub new_seats: u64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
    /// Pro-rated for a mid-quarter deployment.
    pub first_year_cost: f64,
    pub monthly_value: f64,
    pub phase_roi: Option<f64>,
    pub cumulative_seats: u64,
    pub cumulative_coverage_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionPlan {
    pub opportunities: Vec<ExpansionOpportunity>,
    pub phases: Vec<RolloutPhase>,
    pub total_org_headcount: u64,
}
