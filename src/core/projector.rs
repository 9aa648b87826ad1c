use tracing::{debug, warn};

use super::growth::{discount_monthly, future_value_monthly};
use super::types::{
    MonthlyProjection, ProjectionResult, ProjectorConfig, ProjectorInputs, ReturnScenario,
    YearlyContribution,
};

impl ProjectorInputs {
    /// Months between the two ages; zero when the span is empty or does not
    /// fit in a `u32` month count.
    pub fn total_months(&self) -> u32 {
        self.retirement_age
            .saturating_sub(self.current_age)
            .checked_mul(12)
            .unwrap_or(0)
    }

    pub fn is_valid(&self) -> bool {
        self.current_age > 0
            && self.retirement_age > self.current_age
            && self.monthly_contribution.is_finite()
            && self.monthly_contribution > 0.0
            && self.yearly_increase.is_finite()
            && self.yearly_increase >= 0.0
            && self.inflation.is_finite()
            && self.inflation >= 0.0
            && self.total_months() > 0
    }

    /// Contribution paid in `month` (1-based); it steps up once every twelve
    /// months by `yearly_increase`.
    pub fn contribution_for_month(&self, month: u32) -> f64 {
        let year = month.saturating_sub(1) / 12 + 1;
        if year == 1 {
            return self.monthly_contribution;
        }
        self.monthly_contribution * (1.0 + self.yearly_increase).powi((year - 1) as i32)
    }
}

/// Month-by-month growth of the contribution schedule at one annual rate.
///
/// Each contribution compounds monthly until retirement; its inflation-adjusted
/// value is discounted over the same number of months. Returns an empty table
/// for inputs that cannot be projected.
pub fn project_monthly(inputs: &ProjectorInputs, annual_rate: f64) -> Vec<MonthlyProjection> {
    if !inputs.is_valid() {
        return Vec::new();
    }

    let total_months = inputs.total_months();
    let mut rows = Vec::with_capacity(total_months as usize);
    let mut cumulative_fv = 0.0;
    let mut cumulative_npv = 0.0;

    for month in 1..=total_months {
        let remaining = total_months - month;
        let contribution = inputs.contribution_for_month(month);
        let fv = future_value_monthly(contribution, remaining, annual_rate);
        let npv = discount_monthly(fv, remaining, inputs.inflation);
        cumulative_fv += fv;
        cumulative_npv += npv;

        rows.push(MonthlyProjection {
            month,
            year: month.div_ceil(12),
            monthly_contribution: contribution,
            fv,
            cumulative_fv,
            npv,
            cumulative_npv,
        });
    }
    rows
}

/// Contribution at the first month of each projection year.
pub fn yearly_summary(inputs: &ProjectorInputs) -> Vec<YearlyContribution> {
    if !inputs.is_valid() {
        return Vec::new();
    }
    (1..=inputs.total_months().div_ceil(12))
        .map(|year| YearlyContribution {
            year,
            monthly_contribution: inputs.contribution_for_month((year - 1) * 12 + 1),
        })
        .collect()
}

/// Total paid in over the whole schedule.
pub fn total_invested(summary: &[YearlyContribution]) -> f64 {
    summary.iter().map(|row| row.monthly_contribution * 12.0).sum()
}

/// Evaluates every rate in the scenario menu against the same contribution
/// schedule.
///
/// Invalid inputs produce [`ProjectionResult::empty`]; callers must read an
/// empty scenario list as "cannot project", not as a zero-value answer.
/// Monthly detail is kept per scenario only when `include_monthly` is set.
pub fn project_scenarios(
    inputs: &ProjectorInputs,
    config: &ProjectorConfig,
    include_monthly: bool,
) -> ProjectionResult {
    if !inputs.is_valid() {
        warn!(
            current_age = inputs.current_age,
            retirement_age = inputs.retirement_age,
            monthly_contribution = inputs.monthly_contribution,
            "projector inputs rejected; returning empty result"
        );
        return ProjectionResult::empty();
    }

    let scenarios = config
        .scenarios
        .iter()
        .map(|scenario| {
            let months = project_monthly(inputs, scenario.rate);
            let (total_fv, total_npv) = months
                .last()
                .map(|last| (last.cumulative_fv, last.cumulative_npv))
                .unwrap_or((0.0, 0.0));
            ReturnScenario {
                return_rate: scenario.rate,
                label: scenario.label.clone(),
                total_fv,
                total_npv,
                value_in_crores: if config.crore > 0.0 {
                    total_npv / config.crore
                } else {
                    0.0
                },
                months: if include_monthly { months } else { Vec::new() },
            }
        })
        .collect::<Vec<_>>();

    let yearly_summary = yearly_summary(inputs);
    let result = ProjectionResult {
        total_months: inputs.total_months(),
        investment_period: inputs.retirement_age - inputs.current_age,
        total_invested: total_invested(&yearly_summary),
        scenarios,
        yearly_summary,
    };
    debug!(
        total_months = result.total_months,
        scenarios = result.scenarios.len(),
        "projected contribution scenarios"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs() -> ProjectorInputs {
        ProjectorInputs {
            current_age: 26,
            retirement_age: 55,
            monthly_contribution: 10_000.0,
            yearly_increase: 0.05,
            inflation: 0.06,
        }
    }

    #[test]
    fn contribution_steps_up_each_year() {
        let inputs = sample_inputs();
        assert_eq!(inputs.total_months(), 348);
        assert_approx(inputs.contribution_for_month(1), 10_000.0);
        assert_approx(inputs.contribution_for_month(12), 10_000.0);
        assert_approx(inputs.contribution_for_month(13), 10_500.0);
        assert_approx(inputs.contribution_for_month(25), 11_025.0);
    }

    #[test]
    fn overflowing_age_span_is_not_projected() {
        let inputs = ProjectorInputs {
            current_age: 1,
            retirement_age: 400_000_000,
            monthly_contribution: 1.0,
            ..sample_inputs()
        };
        assert_eq!(inputs.total_months(), 0);
        assert!(!inputs.is_valid());
        assert!(project_scenarios(&inputs, &ProjectorConfig::default(), true).is_empty());
        assert!(project_monthly(&inputs, 0.12).is_empty());
    }

    #[test]
    fn monthly_table_matches_hand_calculation() {
        let inputs = ProjectorInputs {
            current_age: 30,
            retirement_age: 31,
            monthly_contribution: 100.0,
            yearly_increase: 0.0,
            inflation: 0.12,
        };
        let rows = project_monthly(&inputs, 0.12);
        assert_eq!(rows.len(), 12);

        // First deposit grows eleven months at 1%; the last one not at all.
        assert_approx(rows[0].fv, 100.0 * 1.01_f64.powi(11));
        assert_approx(rows[11].fv, 100.0);
        // Equal growth and inflation rates make every real value the deposit.
        assert_approx(rows[0].npv, 100.0);
        assert_approx(rows[11].cumulative_npv, 1_200.0);
        assert_eq!(rows[11].year, 1);
    }

    #[test]
    fn reference_scenarios_are_ordered_by_rate() {
        let result = project_scenarios(&sample_inputs(), &ProjectorConfig::default(), false);
        assert_eq!(result.total_months, 348);
        assert_eq!(result.investment_period, 29);
        assert_eq!(result.scenarios.len(), 8);
        assert_eq!(result.scenarios[0].label, "5% - FD returns");
        assert_approx(result.scenarios[0].return_rate, 0.05);
        assert!(result.scenarios[0].total_fv < result.scenarios[7].total_fv);
        for pair in result.scenarios.windows(2) {
            assert!(pair[0].total_fv < pair[1].total_fv);
            assert!(pair[0].total_npv < pair[1].total_npv);
        }
        for scenario in &result.scenarios {
            assert!(scenario.months.is_empty());
            assert_approx(scenario.value_in_crores, scenario.total_npv / 10_000_000.0);
            assert!(scenario.total_npv < scenario.total_fv);
        }
    }

    #[test]
    fn monthly_detail_is_kept_on_request() {
        let result = project_scenarios(&sample_inputs(), &ProjectorConfig::default(), true);
        let first = &result.scenarios[0];
        assert_eq!(first.months.len(), 348);
        assert_approx(first.total_fv, first.months[347].cumulative_fv);
        assert_approx(first.total_npv, first.months[347].cumulative_npv);
        assert_eq!(first.months[347].year, 29);
    }

    #[test]
    fn yearly_summary_samples_first_month_of_each_year() {
        let inputs = sample_inputs();
        let summary = yearly_summary(&inputs);
        assert_eq!(summary.len(), 29);
        assert_approx(summary[0].monthly_contribution, 10_000.0);
        assert_approx(summary[1].monthly_contribution, 10_500.0);
        assert_approx_tol(
            summary[28].monthly_contribution,
            10_000.0 * 1.05_f64.powi(28),
            1e-6,
        );

        let expected: f64 = (0..29).map(|y| 10_000.0 * 1.05_f64.powi(y) * 12.0).sum();
        assert_approx_tol(total_invested(&summary), expected, 1e-4);
    }

    #[test]
    fn invalid_inputs_yield_empty_result() {
        let config = ProjectorConfig::default();
        let cases = [
            ProjectorInputs {
                retirement_age: 26,
                ..sample_inputs()
            },
            ProjectorInputs {
                retirement_age: 20,
                ..sample_inputs()
            },
            ProjectorInputs {
                monthly_contribution: 0.0,
                ..sample_inputs()
            },
            ProjectorInputs {
                yearly_increase: -0.01,
                ..sample_inputs()
            },
            ProjectorInputs {
                inflation: f64::NAN,
                ..sample_inputs()
            },
            ProjectorInputs {
                current_age: 0,
                ..sample_inputs()
            },
        ];
        for inputs in cases {
            let result = project_scenarios(&inputs, &config, true);
            assert!(result.is_empty());
            assert_eq!(result, ProjectionResult::empty());
            assert!(project_monthly(&inputs, 0.1).is_empty());
            assert!(yearly_summary(&inputs).is_empty());
        }
    }

    #[test]
    fn custom_menu_is_respected() {
        let config = ProjectorConfig {
            scenarios: vec![crate::core::types::ScenarioRate {
                rate: 0.0,
                label: "flat".to_string(),
            }],
            crore: 100_000.0,
        };
        let inputs = ProjectorInputs {
            yearly_increase: 0.0,
            inflation: 0.0,
            ..sample_inputs()
        };
        let result = project_scenarios(&inputs, &config, false);
        assert_eq!(result.scenarios.len(), 1);
        assert_approx(result.scenarios[0].total_fv, 10_000.0 * 348.0);
        assert_approx(result.scenarios[0].value_in_crores, 10_000.0 * 348.0 / 100_000.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_future_value_is_monotone_in_rate(
            current_age in 18u32..60,
            span in 1u32..35,
            contribution in 1u32..100_000,
            increase_bp in 0u32..1_500,
            inflation_bp in 0u32..1_000,
            low_bp in 0u32..4_000,
            delta_bp in 1u32..1_000
        ) {
            let inputs = ProjectorInputs {
                current_age,
                retirement_age: current_age + span,
                monthly_contribution: contribution as f64,
                yearly_increase: increase_bp as f64 / 10_000.0,
                inflation: inflation_bp as f64 / 10_000.0,
            };
            let low_rate = low_bp as f64 / 10_000.0;
            let high_rate = (low_bp + delta_bp) as f64 / 10_000.0;
            let low = project_monthly(&inputs, low_rate);
            let high = project_monthly(&inputs, high_rate);
            prop_assert!(!low.is_empty());
            let low_last = low[low.len() - 1];
            let high_last = high[high.len() - 1];
            prop_assert!(high_last.cumulative_fv >= low_last.cumulative_fv);
            prop_assert!(high_last.cumulative_npv >= low_last.cumulative_npv);
            prop_assert!(low_last.cumulative_fv.is_finite());
        }
    }
}
