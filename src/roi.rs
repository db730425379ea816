use crate::models::{IncrementalRoiResult, RoiScenario};

/// Seat counts and per-seat costs for an upgrade comparison.
#[derive(Debug, Clone, Copy)]
pub struct RoiInputs {
    pub baseline_seats: u64,
    pub baseline_cost_per_seat: f64,
    pub target_seats: u64,
    pub target_cost_per_seat: f64,
    pub hourly_rate: f64,
    /// Hours gained per period by upgrading, supplied by the caller.
    pub incremental_hours: f64,
    pub additive_benchmark: Option<f64>,
    pub replacement_benchmark: Option<f64>,
}

/// Compare the additive and replacement upgrade scenarios.
///
/// The two scenarios are peers; neither is flagged as the winner here.
pub fn compare_incremental_roi(inputs: &RoiInputs) -> IncrementalRoiResult {
    let incremental_value = inputs.incremental_hours * inputs.hourly_rate;

    let baseline_total = inputs.baseline_seats as f64 * inputs.baseline_cost_per_seat;
    let target_total = inputs.target_seats as f64 * inputs.target_cost_per_seat;

    // Additive keeps the baseline seats; replacement swaps them out.
    let additive = scenario(incremental_value, target_total, inputs.additive_benchmark);
    let replacement = scenario(
        incremental_value,
        target_total - baseline_total,
        inputs.replacement_benchmark,
    );

    IncrementalRoiResult {
        incremental_hours: inputs.incremental_hours,
        incremental_value,
        additive,
        replacement,
    }
}

fn scenario(incremental_value: f64, incremental_cost: f64, benchmark: Option<f64>) -> RoiScenario {
    let incremental_roi = if incremental_cost == 0.0 {
        None
    } else {
        Some(incremental_value / incremental_cost)
    };

    let delta_percent = match (incremental_roi, benchmark) {
        (Some(roi), Some(benchmark)) if benchmark != 0.0 => {
            Some((roi - benchmark) / benchmark * 100.0)
        }
        _ => None,
    };

    RoiScenario {
        incremental_cost,
        incremental_roi,
        delta_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RoiInputs {
        RoiInputs {
            baseline_seats: 200,
            baseline_cost_per_seat: 30.0,
            target_seats: 200,
            target_cost_per_seat: 60.0,
            hourly_rate: 75.0,
            incremental_hours: 800.0,
            additive_benchmark: Some(4.0),
            replacement_benchmark: None,
        }
    }

    #[test]
    fn additive_scenario_charges_the_full_target() {
        let result = compare_incremental_roi(&inputs());
        assert!((result.incremental_value - 60_000.0).abs() < 1e-9);
        assert!((result.additive.incremental_cost - 12_000.0).abs() < 1e-9);
        assert!((result.additive.incremental_roi.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn replacement_scenario_charges_only_the_delta() {
        let result = compare_incremental_roi(&inputs());
        assert!((result.replacement.incremental_cost - 6_000.0).abs() < 1e-9);
        assert!((result.replacement.incremental_roi.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn benchmark_delta_only_where_a_benchmark_exists() {
        let result = compare_incremental_roi(&inputs());
        // additive ROI 5.0 vs benchmark 4.0 -> +25%
        assert!((result.additive.delta_percent.unwrap() - 25.0).abs() < 1e-9);
        assert_eq!(result.replacement.delta_percent, None);
    }

    #[test]
    fn zero_cost_yields_undefined_roi_not_infinity() {
        let mut zero_cost = inputs();
        zero_cost.target_cost_per_seat = 0.0;
        let result = compare_incremental_roi(&zero_cost);
        assert_eq!(result.additive.incremental_roi, None);
        assert_eq!(result.additive.delta_percent, None);
    }

    #[test]
    fn like_for_like_replacement_costs_nothing() {
        let mut same = inputs();
        same.target_cost_per_seat = 30.0;
        let result = compare_incremental_roi(&same);
        assert_eq!(result.replacement.incremental_cost, 0.0);
        assert_eq!(result.replacement.incremental_roi, None);
    }
}
