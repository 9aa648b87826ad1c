mod budget;
mod calculators;
mod cashflow;
mod error;
mod goals;
mod growth;
mod plan;
mod projector;
mod solver;
mod types;

pub use budget::project_budget;
pub use calculators::{EmiBreakdown, compound_interest, emi, required_monthly_sip};
pub use cashflow::simulate_cash_flow;
pub use error::{PlanError, Result};
pub use goals::{
    add_goal, category_totals, demand_by_year, expand_goal, goal_value, occurrences_in_year,
    remove_goal, total_goals_value, update_goal, value_goals,
};
pub use growth::{discount_monthly, future_value_monthly, inflate};
pub use plan::run_financial_plan;
pub use projector::{project_monthly, project_scenarios, total_invested, yearly_summary};
pub use solver::{
    SolveConfig, SolveFor, SolveIteration, SolveResult, solve_monthly_contribution,
    solve_starting_salary,
};
pub use types::{
    AllocationSplit, Assumptions, BudgetYear, CRORE, CashFlowYear, CategoryTotals,
    DEFAULT_HORIZON_YEARS, DueGoal, Goal, GoalCategory, GoalOccurrence, GoalPatch, GoalSchedule,
    GoalsSummary, MonthlyProjection, PlanResult, PlannerConfig, ProjectionResult, ProjectorConfig,
    ProjectorInputs, ReturnScenario, ScenarioRate, ValuedGoal, YearlyContribution,
};
