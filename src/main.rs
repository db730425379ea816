use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};

mod adoption;
mod config;
mod dataset;
mod duration;
mod expansion;
mod fte;
mod models;
mod report;
mod roi;
mod sentiment;

use crate::roi::RoiInputs;
use crate::sentiment::KeywordClassifier;

#[derive(Parser)]
#[command(name = "adoption-analytics")]
#[command(about = "Usage-to-value analytics for AI tool adoption reporting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a realistic sample dataset
    Seed {
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },
    /// Score perceived value per tool from feedback messages
    #[command(group(
        ArgGroup::new("source")
            .args(["feedback", "csv"])
            .multiple(false)
    ))]
    Sentiment {
        #[arg(long)]
        feedback: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value = "data/config.json")]
        config: PathBuf,
    },
    /// Compute the Agentic FTE series from monthly usage
    Fte {
        #[arg(long, default_value = "data/usage.json")]
        usage: PathBuf,
        #[arg(long, default_value = "data/config.json")]
        config: PathBuf,
    },
    /// Compare additive vs replacement upgrade scenarios
    Roi {
        #[arg(long)]
        baseline: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        baseline_seats: u64,
        #[arg(long)]
        target_seats: u64,
        #[arg(long)]
        incremental_hours: f64,
        #[arg(long, default_value = "data/config.json")]
        config: PathBuf,
    },
    /// Score composite department adoption
    Adoption {
        #[arg(long, default_value = "data/departments.json")]
        departments: PathBuf,
        #[arg(long, default_value = "data/headcount.json")]
        headcount: PathBuf,
    },
    /// Rank expansion opportunities and plan rollout phases
    Expansion {
        #[arg(long, default_value = "data/expansion.json")]
        candidates: PathBuf,
        #[arg(long, default_value = "data/headcount.json")]
        headcount: PathBuf,
    },
    /// Generate the full markdown report
    Report {
        #[arg(long, default_value = "data/config.json")]
        config: PathBuf,
        #[arg(long, default_value = "data/feedback.json")]
        feedback: PathBuf,
        #[arg(long, default_value = "data/usage.json")]
        usage: PathBuf,
        #[arg(long, default_value = "data/departments.json")]
        departments: PathBuf,
        #[arg(long, default_value = "data/headcount.json")]
        headcount: PathBuf,
        #[arg(long, default_value = "data/expansion.json")]
        candidates: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { dir } => {
            dataset::seed(&dir)?;
            println!("Sample dataset written to {}.", dir.display());
        }
        Commands::Sentiment {
            feedback,
            csv,
            config,
        } => {
            let cfg = dataset::load_config(&config)?;
            let messages = match (feedback, csv) {
                (_, Some(path)) => dataset::import_feedback_csv(&path)?,
                (Some(path), None) => dataset::load_feedback(&path)?,
                (None, None) => dataset::load_feedback(&PathBuf::from("data/feedback.json"))?,
            };

            let classifier = KeywordClassifier::from_tools(&cfg.tools);
            let (results, summary) =
                sentiment::analyze_feedback(&messages, &cfg.tools, &classifier);

            println!("Perceived value by tool:");
            for result in &results {
                println!(
                    "- {} score {}/100 across {} messages ({} positive / {} neutral / {} negative)",
                    result.tool,
                    result.score,
                    result.total_feedback,
                    result.breakdown.positive,
                    result.breakdown.neutral,
                    result.breakdown.negative
                );
            }
            println!(
                "{} of {} messages attributed; {} mention more than one tool.",
                summary.attributed_messages, summary.total_messages, summary.multi_tool_messages
            );
        }
        Commands::Fte { usage, config } => {
            let cfg = dataset::load_config(&config)?;
            let records = dataset::load_usage(&usage)?;
            let series = fte::compute_fte_series(&records, &cfg);

            if series.is_empty() {
                println!("No usage records found.");
                return Ok(());
            }

            println!("Agentic FTEs by month:");
            for record in &series {
                let change = record
                    .change_percent
                    .map(|percent| format!(" ({percent:+.1}% vs prior)"))
                    .unwrap_or_default();
                println!(
                    "- {}: {:.1} FTEs, {:.0} productive hours{}",
                    record.month, record.total_agentic_ftes, record.total_productive_hours, change
                );
                if let Some(projection) = record.projection {
                    println!(
                        "  month to date; projects to {:.1} FTEs over {} days",
                        projection.projected_total, projection.days_in_month
                    );
                }
            }
        }
        Commands::Roi {
            baseline,
            target,
            baseline_seats,
            target_seats,
            incremental_hours,
            config,
        } => {
            let cfg = dataset::load_config(&config)?;
            let baseline_tool = cfg
                .tool(&baseline)
                .with_context(|| format!("unknown baseline tool {baseline}"))?;
            let target_tool = cfg
                .tool(&target)
                .with_context(|| format!("unknown target tool {target}"))?;

            let result = roi::compare_incremental_roi(&RoiInputs {
                baseline_seats,
                baseline_cost_per_seat: baseline_tool.monthly_cost_per_seat,
                target_seats,
                target_cost_per_seat: target_tool.monthly_cost_per_seat,
                hourly_rate: cfg.hourly_rate,
                incremental_hours,
                additive_benchmark: cfg.benchmarks.additive_roi,
                replacement_benchmark: cfg.benchmarks.replacement_roi,
            });

            println!(
                "Upgrading {baseline} -> {target}: {:.0} incremental hours worth {:.0}",
                result.incremental_hours, result.incremental_value
            );
            for (label, scenario) in [
                ("additive", result.additive),
                ("replacement", result.replacement),
            ] {
                let roi_text = scenario
                    .incremental_roi
                    .map(|value| format!("{value:.1}x"))
                    .unwrap_or_else(|| "undefined".to_string());
                let delta = scenario
                    .delta_percent
                    .map(|percent| format!(" ({percent:+.0}% vs benchmark)"))
                    .unwrap_or_default();
                println!(
                    "- {label}: cost {:.0}/month, ROI {roi_text}{delta}",
                    scenario.incremental_cost
                );
            }
        }
        Commands::Adoption {
            departments,
            headcount,
        } => {
            let usage = dataset::load_department_usage(&departments)?;
            let heads = dataset::load_headcount(&headcount)?;
            let records = adoption::score_departments(&usage, &heads);

            if records.is_empty() {
                println!("No department usage found.");
                return Ok(());
            }

            println!("Department adoption scores:");
            for record in &records {
                println!(
                    "- {}: {}/100 ({}) with {} seats across {} employees",
                    record.department,
                    record.adoption_score,
                    report::adoption_band(record.adoption_score),
                    record.active_seats,
                    record.employees
                );
            }
        }
        Commands::Expansion {
            candidates,
            headcount,
        } => {
            let entries = dataset::load_expansion_candidates(&candidates)?;
            let heads = dataset::load_headcount(&headcount)?;
            let total_org_headcount: u64 = heads.values().sum();
            let plan = expansion::build_plan(&entries, total_org_headcount);

            if plan.phases.is_empty() {
                println!("No expansion candidates found.");
                return Ok(());
            }

            println!("Top expansion opportunities:");
            for opportunity in plan.opportunities.iter().take(10) {
                let roi_text = opportunity
                    .roi
                    .map(|value| format!("{value:.1}x"))
                    .unwrap_or_else(|| "undefined".to_string());
                println!(
                    "- {}: {} new seats, net annual benefit {:.0}, ROI {roi_text}",
                    opportunity.department, opportunity.new_seats, opportunity.net_annual_benefit
                );
            }
            println!("Rollout phases:");
            for phase in &plan.phases {
                println!(
                    "- Phase {} ({}): {} seats, first-year cost {:.0}, coverage {:.1}%",
                    phase.phase,
                    phase.departments.join(", "),
                    phase.new_seats,
                    phase.first_year_cost,
                    phase.cumulative_coverage_percent
                );
            }
        }
        Commands::Report {
            config,
            feedback,
            usage,
            departments,
            headcount,
            candidates,
            out,
        } => {
            let cfg = dataset::load_config(&config)?;
            let messages = dataset::load_feedback(&feedback)?;
            let usage_records = dataset::load_usage(&usage)?;
            let department_usage = dataset::load_department_usage(&departments)?;
            let heads = dataset::load_headcount(&headcount)?;
            let expansion_candidates = dataset::load_expansion_candidates(&candidates)?;

            let classifier = KeywordClassifier::from_tools(&cfg.tools);
            let (sentiment_results, attribution) =
                sentiment::analyze_feedback(&messages, &cfg.tools, &classifier);
            let fte_series = fte::compute_fte_series(&usage_records, &cfg);
            let adoption_records = adoption::score_departments(&department_usage, &heads);
            let total_org_headcount: u64 = heads.values().sum();
            let plan = expansion::build_plan(&expansion_candidates, total_org_headcount);

            let roi_result = cfg.upgrade_comparison.as_ref().and_then(|comparison| {
                let baseline_tool = cfg.tool(&comparison.baseline_tool)?;
                let target_tool = cfg.tool(&comparison.target_tool)?;
                Some(roi::compare_incremental_roi(&RoiInputs {
                    baseline_seats: comparison.baseline_seats,
                    baseline_cost_per_seat: baseline_tool.monthly_cost_per_seat,
                    target_seats: comparison.target_seats,
                    target_cost_per_seat: target_tool.monthly_cost_per_seat,
                    hourly_rate: cfg.hourly_rate,
                    incremental_hours: comparison.incremental_hours,
                    additive_benchmark: cfg.benchmarks.additive_roi,
                    replacement_benchmark: cfg.benchmarks.replacement_roi,
                }))
            });

            let rendered = report::build_report(
                &cfg,
                &sentiment_results,
                &attribution,
                &fte_series,
                roi_result.as_ref(),
                &adoption_records,
                &plan,
            );
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
