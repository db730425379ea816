use crate::models::{ExpansionCandidate, ExpansionOpportunity, ExpansionPlan, RolloutPhase};

const PHASE_COUNT: usize = 4;
const MONTHS_PER_QUARTER: f64 = 3.0;
const MID_QUARTER_MONTHS: f64 = 1.5;

/// Rank candidates by financial opportunity: net annual benefit descending,
/// ROI descending on ties, input order on remaining ties (stable sort, so
/// re-running on identical input yields the identical order).
pub fn rank_opportunities(candidates: &[ExpansionCandidate]) -> Vec<ExpansionOpportunity> {
    let mut opportunities: Vec<ExpansionOpportunity> = candidates
        .iter()
        .map(|candidate| {
            let monthly_cost = candidate.total_additional_monthly_cost;
            let monthly_value = candidate.monthly_opportunity_value;
            let roi = if monthly_cost == 0.0 {
                None
            } else {
                Some(monthly_value / monthly_cost)
            };

            ExpansionOpportunity {
                department: candidate.department.clone(),
                employees: candidate.employees,
                new_seats: candidate.new_seats(),
                upgrade_seats: candidate.upgrade_seats,
                monthly_cost,
                monthly_value,
                net_annual_benefit: (monthly_value - monthly_cost) * 12.0,
                roi,
            }
        })
        .collect();

    opportunities.sort_by(|a, b| {
        b.net_annual_benefit
            .partial_cmp(&a.net_annual_benefit)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let a_roi = a.roi.unwrap_or(f64::NEG_INFINITY);
                let b_roi = b.roi.unwrap_or(f64::NEG_INFINITY);
                b_roi.partial_cmp(&a_roi).unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    opportunities
}

/// Partition ranked opportunities into up to four contiguous quarterly
/// phases of ceil(n/4) departments; the last phase takes the remainder.
///
/// Cumulative coverage is computed strictly in phase order.
pub fn plan_phases(
    opportunities: &[ExpansionOpportunity],
    total_org_headcount: u64,
) -> Vec<RolloutPhase> {
    if opportunities.is_empty() {
        return Vec::new();
    }

    let chunk = opportunities.len().div_ceil(PHASE_COUNT);
    let mut phases = Vec::with_capacity(PHASE_COUNT);
    let mut cumulative_seats = 0u64;

    for (index, group) in opportunities.chunks(chunk).enumerate() {
        let new_seats: u64 = group.iter().map(|opp| opp.new_seats).sum();
        let monthly_cost: f64 = group.iter().map(|opp| opp.monthly_cost).sum();
        let monthly_value: f64 = group.iter().map(|opp| opp.monthly_value).sum();

        cumulative_seats += new_seats;
        let cumulative_coverage_percent = if total_org_headcount == 0 {
            0.0
        } else {
            cumulative_seats as f64 / total_org_headcount as f64 * 100.0
        };

        // One phase per quarter, deployed mid-quarter.
        let months_remaining =
            12.0 - (index as f64 * MONTHS_PER_QUARTER + MID_QUARTER_MONTHS);

        phases.push(RolloutPhase {
            phase: index + 1,
            departments: group.iter().map(|opp| opp.department.clone()).collect(),
            new_seats,
            monthly_cost,
            annual_cost: monthly_cost * 12.0,
            first_year_cost: monthly_cost * months_remaining,
            monthly_value,
            phase_roi: if monthly_cost == 0.0 {
                None
            } else {
                Some(monthly_value / monthly_cost)
            },
            cumulative_seats,
            cumulative_coverage_percent,
        });
    }

    phases
}

pub fn build_plan(candidates: &[ExpansionCandidate], total_org_headcount: u64) -> ExpansionPlan {
    let opportunities = rank_opportunities(candidates);
    let phases = plan_phases(&opportunities, total_org_headcount);
    ExpansionPlan {
        opportunities,
        phases,
        total_org_headcount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn candidate(name: &str, seats: u64, cost: f64, value: f64) -> ExpansionCandidate {
        let mut seat_gaps = BTreeMap::new();
        if seats > 0 {
            seat_gaps.insert("chatgpt".to_string(), seats);
        }
        ExpansionCandidate {
            department: name.to_string(),
            employees: seats * 2,
            current_seats: seats / 2,
            seat_gaps,
            upgrade_seats: 0,
            total_additional_monthly_cost: cost,
            monthly_opportunity_value: value,
        }
    }

    #[test]
    fn ranks_by_net_annual_benefit_then_roi() {
        let candidates = vec![
            // equal benefit (2_000/month), differing ROI: 2.0 vs 3.0
            candidate("Finance", 20, 2_000.0, 4_000.0),
            candidate("Sales", 20, 1_000.0, 3_000.0),
            candidate("Engineering", 50, 3_000.0, 9_000.0),
        ];

        let ranked = rank_opportunities(&candidates);
        assert_eq!(ranked[0].department, "Engineering");
        assert_eq!(ranked[1].department, "Sales");
        assert_eq!(ranked[2].department, "Finance");
        assert!((ranked[0].net_annual_benefit - 72_000.0).abs() < 1e-9);
    }

    #[test]
    fn full_ties_preserve_input_order() {
        let candidates = vec![
            candidate("Alpha", 10, 500.0, 1_500.0),
            candidate("Beta", 10, 500.0, 1_500.0),
            candidate("Gamma", 10, 500.0, 1_500.0),
        ];
        let ranked = rank_opportunities(&candidates);
        let order: Vec<&str> = ranked.iter().map(|opp| opp.department.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "Beta", "Gamma"]);

        // idempotent: re-ranking the same input gives the same order
        let again = rank_opportunities(&candidates);
        let order_again: Vec<&str> = again.iter().map(|opp| opp.department.as_str()).collect();
        assert_eq!(order, order_again);
    }

    #[test]
    fn zero_cost_candidate_has_undefined_roi() {
        let ranked = rank_opportunities(&[candidate("Ops", 5, 0.0, 1_000.0)]);
        assert_eq!(ranked[0].roi, None);
        assert!((ranked[0].net_annual_benefit - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn phases_partition_exhaustively_without_overlap() {
        let candidates: Vec<ExpansionCandidate> = (0..10)
            .map(|i| {
                candidate(
                    &format!("Dept{i}"),
                    10,
                    1_000.0 + i as f64,
                    3_000.0 - i as f64,
                )
            })
            .collect();

        let plan = build_plan(&candidates, 1_000);
        assert_eq!(plan.phases.len(), 4);
        let sizes: Vec<usize> = plan.phases.iter().map(|p| p.departments.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);

        let mut seen: Vec<&str> = plan
            .phases
            .iter()
            .flat_map(|p| p.departments.iter().map(String::as_str))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), candidates.len());
    }

    #[test]
    fn small_inputs_yield_fewer_phases() {
        let plan = build_plan(
            &[
                candidate("Alpha", 10, 500.0, 1_500.0),
                candidate("Beta", 10, 400.0, 1_200.0),
            ],
            100,
        );
        assert_eq!(plan.phases.len(), 2);
        assert!(plan.phases.iter().all(|p| p.departments.len() == 1));
    }

    #[test]
    fn cumulative_coverage_accumulates_in_phase_order() {
        let candidates = vec![
            candidate("Alpha", 30, 900.0, 2_700.0),
            candidate("Beta", 20, 600.0, 1_500.0),
            candidate("Gamma", 10, 300.0, 600.0),
            candidate("Delta", 40, 1_200.0, 1_300.0),
        ];

        let plan = build_plan(&candidates, 200);
        let seats: Vec<u64> = plan.phases.iter().map(|p| p.cumulative_seats).collect();
        assert_eq!(seats, vec![30, 50, 60, 100]);
        let coverage: Vec<f64> = plan
            .phases
            .iter()
            .map(|p| p.cumulative_coverage_percent)
            .collect();
        assert!((coverage[3] - 50.0).abs() < 1e-9);
        for pair in coverage.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn first_year_budget_prorates_by_deployment_midpoint() {
        let candidates = vec![
            candidate("Alpha", 30, 1_000.0, 3_000.0),
            candidate("Beta", 20, 1_000.0, 2_500.0),
            candidate("Gamma", 10, 1_000.0, 2_000.0),
            candidate("Delta", 40, 1_000.0, 1_500.0),
        ];

        let plan = build_plan(&candidates, 500);
        let prorated: Vec<f64> = plan.phases.iter().map(|p| p.first_year_cost).collect();
        assert!((prorated[0] - 10_500.0).abs() < 1e-9);
        assert!((prorated[1] - 7_500.0).abs() < 1e-9);
        assert!((prorated[2] - 4_500.0).abs() < 1e-9);
        assert!((prorated[3] - 1_500.0).abs() < 1e-9);
        assert!(plan.phases.iter().all(|p| (p.annual_cost - 12_000.0).abs() < 1e-9));
    }
}
