use std::collections::BTreeMap;

use crate::models::{DepartmentAdoptionRecord, DepartmentUsage, ScoreComponents};

const COVERAGE_CEILING: f64 = 30.0;
const MULTI_TOOL_CEILING: f64 = 25.0;
const MULTI_TOOL_SLOPE: f64 = 16.67;
const MULTI_TOOL_FLOOR_RATIO: f64 = 0.5;
const INTENSITY_CEILING: f64 = 25.0;
const IMPACT_CEILING: f64 = 20.0;

/// Score every department's composite adoption for one reporting period,
/// highest score first.
///
/// Departments with no headcount entry score their ratio components as zero
/// rather than failing; upstream data quality is not this layer's concern.
pub fn score_departments(
    usage: &[DepartmentUsage],
    headcount: &BTreeMap<String, u64>,
) -> Vec<DepartmentAdoptionRecord> {
    let intensities: Vec<f64> = usage
        .iter()
        .map(|dept| ratio(dept.activity as f64, dept.active_seats() as f64))
        .collect();
    let impacts: Vec<f64> = usage
        .iter()
        .map(|dept| {
            let employees = headcount.get(&dept.department).copied().unwrap_or(0);
            ratio(dept.activity as f64, employees as f64)
        })
        .collect();

    let intensity_sorted = ascending(&intensities);
    let impact_sorted = ascending(&impacts);

    let mut records: Vec<DepartmentAdoptionRecord> = usage
        .iter()
        .zip(intensities.iter().zip(impacts.iter()))
        .map(|(dept, (&activity_per_seat, &activity_per_employee))| {
            let employees = headcount.get(&dept.department).copied().unwrap_or(0);
            let active_seats = dept.active_seats();
            let seats_per_employee = ratio(active_seats as f64, employees as f64);

            let components = ScoreComponents {
                coverage: (seats_per_employee * COVERAGE_CEILING).min(COVERAGE_CEILING),
                multi_tool: ((seats_per_employee - MULTI_TOOL_FLOOR_RATIO) * MULTI_TOOL_SLOPE)
                    .max(0.0)
                    .min(MULTI_TOOL_CEILING),
                intensity: percentile_rank(&intensity_sorted, activity_per_seat)
                    * INTENSITY_CEILING,
                impact: percentile_rank(&impact_sorted, activity_per_employee) * IMPACT_CEILING,
            };

            DepartmentAdoptionRecord {
                department: dept.department.clone(),
                employees,
                active_seats,
                activity: dept.activity,
                seats_per_employee,
                activity_per_seat,
                activity_per_employee,
                adoption_score: composite(&components),
                components,
            }
        })
        .collect();

    records.sort_by(|a, b| b.adoption_score.cmp(&a.adoption_score));
    records
}

fn composite(components: &ScoreComponents) -> u32 {
    (components.coverage + components.multi_tool + components.intensity + components.impact)
        .round() as u32
}

/// Rank of `value` in an ascending distribution, as a 0.0-1.0 fraction:
/// the index of the first value >= this one over the population size.
/// A single-value population ranks at 1.0 (its own 100th percentile).
/// Identical values share a rank; ties are accepted, not broken.
pub fn percentile_rank(sorted: &[f64], value: f64) -> f64 {
    if sorted.len() <= 1 {
        return 1.0;
    }
    let index = sorted
        .iter()
        .position(|candidate| *candidate >= value)
        .unwrap_or(sorted.len());
    index as f64 / sorted.len() as f64
}

fn ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(name: &str, seats: &[(&str, u64)], activity: u64) -> DepartmentUsage {
        DepartmentUsage {
            department: name.to_string(),
            seats_by_tool: seats
                .iter()
                .map(|(tool, count)| (tool.to_string(), *count))
                .collect(),
            activity,
        }
    }

    fn headcount(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries
            .iter()
            .map(|(name, employees)| (name.to_string(), *employees))
            .collect()
    }

    #[test]
    fn scores_stay_in_range_and_rank_descending() {
        let usage = vec![
            dept("Engineering", &[("chatgpt", 90), ("cursor", 70)], 48_000),
            dept("Marketing", &[("chatgpt", 25)], 4_000),
            dept("Finance", &[("gemini", 10)], 600),
            dept("Support", &[], 0),
        ];
        let heads = headcount(&[
            ("Engineering", 100),
            ("Marketing", 60),
            ("Finance", 40),
            ("Support", 30),
        ]);

        let records = score_departments(&usage, &heads);
        assert_eq!(records.len(), 4);
        for pair in records.windows(2) {
            assert!(pair[0].adoption_score >= pair[1].adoption_score);
        }
        for record in &records {
            assert!(record.adoption_score <= 100);
        }
        assert_eq!(records[0].department, "Engineering");
    }

    #[test]
    fn multi_tool_component_matches_the_slope() {
        let usage = vec![dept("Sales", &[("chatgpt", 35), ("gemini", 25)], 9_000)];
        let heads = headcount(&[("Sales", 50)]);

        let records = score_departments(&usage, &heads);
        let record = &records[0];
        assert!((record.seats_per_employee - 1.2).abs() < 1e-9);
        // (1.2 - 0.5) * 16.67 = 11.669
        assert!((record.components.multi_tool - 11.669).abs() < 1e-3);
    }

    #[test]
    fn coverage_caps_at_thirty() {
        let usage = vec![dept("Sales", &[("chatgpt", 80), ("gemini", 80)], 1_000)];
        let heads = headcount(&[("Sales", 50)]);
        let records = score_departments(&usage, &heads);
        assert_eq!(records[0].components.coverage, 30.0);
    }

    #[test]
    fn single_department_ranks_at_the_top_percentile() {
        let usage = vec![dept("Sales", &[("chatgpt", 25)], 5_000)];
        let heads = headcount(&[("Sales", 50)]);
        let records = score_departments(&usage, &heads);
        assert_eq!(records[0].components.intensity, INTENSITY_CEILING);
        assert_eq!(records[0].components.impact, IMPACT_CEILING);
    }

    #[test]
    fn percentile_uses_first_index_at_or_above() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_rank(&sorted, 1.0), 0.0);
        assert_eq!(percentile_rank(&sorted, 3.0), 0.5);
        assert_eq!(percentile_rank(&sorted, 4.0), 0.75);
        // ties share a rank
        let tied = vec![2.0, 2.0, 5.0];
        assert_eq!(percentile_rank(&tied, 2.0), 0.0);
    }

    #[test]
    fn zero_data_department_scores_zero_components() {
        let usage = vec![
            dept("Support", &[], 0),
            dept("Engineering", &[("chatgpt", 50)], 10_000),
        ];
        let heads = headcount(&[("Engineering", 100)]);

        let records = score_departments(&usage, &heads);
        let support = records
            .iter()
            .find(|record| record.department == "Support")
            .unwrap();
        assert_eq!(support.components.coverage, 0.0);
        assert_eq!(support.components.multi_tool, 0.0);
        assert_eq!(support.seats_per_employee, 0.0);
        assert_eq!(support.activity_per_seat, 0.0);
    }
}
