use tracing::debug;

use super::budget::project_budget;
use super::cashflow::simulate_cash_flow;
use super::goals::{category_totals, total_goals_value};
use super::types::{Assumptions, Goal, GoalsSummary, PlanResult, PlannerConfig};

/// Runs the full goal plan: budget table, cash-flow simulation, and the
/// aggregate verdict.
///
/// `goals_achievable` compares end-of-horizon wealth against the value of
/// every goal occurrence. It is deliberately separate from the per-year
/// `can_meet_goals` flags, and the two can disagree.
pub fn run_financial_plan(
    assumptions: &Assumptions,
    starting_salary: f64,
    goals: &[Goal],
    config: &PlannerConfig,
) -> PlanResult {
    let budget_years = project_budget(assumptions, starting_salary, config);
    let cash_flow_years = simulate_cash_flow(assumptions, &budget_years, goals);

    let total_accumulated_wealth = cash_flow_years
        .last()
        .map(|row| row.wants_amount + row.investment_amount)
        .unwrap_or(0.0);
    let total_goals_value = total_goals_value(goals, assumptions.inflation, config.horizon_years);
    let goals_achievable = total_accumulated_wealth >= total_goals_value;

    let summary = GoalsSummary {
        category_totals: category_totals(goals, assumptions.inflation, config.horizon_years),
        shortfall: (total_goals_value - total_accumulated_wealth).max(0.0),
        surplus: (total_accumulated_wealth - total_goals_value).max(0.0),
        shortfall_years: cash_flow_years
            .iter()
            .filter(|row| !row.can_meet_goals)
            .map(|row| row.year)
            .collect(),
    };

    debug!(
        wealth = total_accumulated_wealth,
        goals_value = total_goals_value,
        goals_achievable,
        shortfall_years = summary.shortfall_years.len(),
        "financial plan complete"
    );

    PlanResult {
        budget_years,
        cash_flow_years,
        total_accumulated_wealth,
        total_goals_value,
        goals_achievable,
        summary,
    }
}
