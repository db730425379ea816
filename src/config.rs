use serde::{Deserialize, Serialize};

/// How a tool converts usage volume into productive time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ToolKind {
    /// Chat-style assistant; savings scale with active users.
    Productivity { time_savings_fraction: f64 },
    /// Code generator; savings scale with lines generated.
    Coding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Stable identifier used in usage records and explicit feedback tags.
    pub id: String,
    pub name: String,
    /// Case-insensitive substrings that attribute free-text feedback here.
    pub keywords: Vec<String>,
    pub monthly_cost_per_seat: f64,
    #[serde(flatten)]
    pub kind: ToolKind,
}

/// Default upgrade comparison rendered in the full report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeComparison {
    pub baseline_tool: String,
    pub target_tool: String,
    pub baseline_seats: u64,
    pub target_seats: u64,
    pub incremental_hours: f64,
}

/// Externally-aggregated industry benchmark ROI scalars.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiBenchmarks {
    #[serde(default)]
    pub additive_roi: Option<f64>,
    #[serde(default)]
    pub replacement_roi: Option<f64>,
}

/// Every numeric constant the calculators use, in one injected structure.
/// Nothing here is hardcoded at a call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub tools: Vec<ToolConfig>,
    /// Loaded value of one productive hour.
    pub hourly_rate: f64,
    /// Working hours that make up one FTE-month.
    pub hours_per_fte: f64,
    /// Hours of manual work replaced per generated line.
    pub hours_per_line: f64,
    /// Baseline hand-written throughput, used for manual-equivalent framing.
    pub manual_lines_per_hour: f64,
    #[serde(default)]
    pub benchmarks: RoiBenchmarks,
    #[serde(default)]
    pub upgrade_comparison: Option<UpgradeComparison>,
}

impl AnalyticsConfig {
    pub fn tool(&self, id: &str) -> Option<&ToolConfig> {
        self.tools.iter().find(|tool| tool.id == id)
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            tools: vec![
                ToolConfig {
                    id: "chatgpt".to_string(),
                    name: "ChatGPT Enterprise".to_string(),
                    keywords: vec!["chatgpt".to_string(), "gpt".to_string()],
                    monthly_cost_per_seat: 60.0,
                    kind: ToolKind::Productivity {
                        time_savings_fraction: 0.28,
                    },
                },
                ToolConfig {
                    id: "gemini".to_string(),
                    name: "Gemini for Workspace".to_string(),
                    keywords: vec!["gemini".to_string()],
                    monthly_cost_per_seat: 30.0,
                    kind: ToolKind::Productivity {
                        time_savings_fraction: 0.14,
                    },
                },
                ToolConfig {
                    id: "cursor".to_string(),
                    name: "Cursor".to_string(),
                    keywords: vec!["cursor".to_string()],
                    monthly_cost_per_seat: 40.0,
                    kind: ToolKind::Coding,
                },
            ],
            hourly_rate: 75.0,
            hours_per_fte: 173.0,
            hours_per_line: 0.08,
            manual_lines_per_hour: 12.5,
            benchmarks: RoiBenchmarks {
                additive_roi: Some(3.5),
                replacement_roi: Some(5.0),
            },
            upgrade_comparison: Some(UpgradeComparison {
                baseline_tool: "gemini".to_string(),
                target_tool: "chatgpt".to_string(),
                baseline_seats: 200,
                target_seats: 200,
                incremental_hours: 2400.0,
            }),
        }
    }
}
