use serde::{Deserialize, Serialize};

use super::error::{PlanError, Result};
use super::plan::run_financial_plan;
use super::projector::project_monthly;
use super::types::{Assumptions, Goal, PlannerConfig, ProjectorInputs};

/// Bisection halves the bracket each step; a few hundred steps exhaust f64.
const MAX_SOLVE_ITERATIONS: u32 = 200;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveFor {
    /// Smallest starting salary that funds the goal plan.
    StartingSalary,
    /// Smallest first-year monthly contribution whose inflation-adjusted
    /// value reaches a target corpus.
    MonthlyContribution,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveIteration {
    pub iteration: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub candidate_value: f64,
    pub feasible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub solve_for: SolveFor,
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
    pub solved_value: Option<f64>,
    pub iterations: Vec<SolveIteration>,
    pub converged: bool,
    pub feasible: bool,
    pub message: String,
}

/// Finds the smallest starting salary for which the plan is achievable.
///
/// With `require_every_year` the plan must also fund each year's goals when
/// they fall due, not just beat the aggregate check at the horizon.
pub fn solve_starting_salary(
    assumptions: &Assumptions,
    goals: &[Goal],
    planner: &PlannerConfig,
    require_every_year: bool,
    config: SolveConfig,
) -> Result<SolveResult> {
    validate_config(config)?;
    Ok(bisect(SolveFor::StartingSalary, config, |salary| {
        let plan = run_financial_plan(assumptions, salary, goals, planner);
        plan.goals_achievable
            && (!require_every_year || plan.cash_flow_years.iter().all(|y| y.can_meet_goals))
    }))
}

/// Finds the smallest first-year monthly contribution whose inflation-adjusted
/// value at `annual_rate` reaches `target_real_corpus`. The contribution in
/// `inputs` is ignored; the rest of the schedule is kept.
pub fn solve_monthly_contribution(
    inputs: &ProjectorInputs,
    annual_rate: f64,
    target_real_corpus: f64,
    config: SolveConfig,
) -> Result<SolveResult> {
    validate_config(config)?;
    if !target_real_corpus.is_finite() || target_real_corpus <= 0.0 {
        return Err(PlanError::invalid("target corpus", "must be > 0"));
    }
    let unit_inputs = ProjectorInputs {
        monthly_contribution: 1.0,
        ..*inputs
    };
    if !unit_inputs.is_valid() {
        return Err(PlanError::invalid(
            "projector inputs",
            "ages, increase and inflation must describe a valid schedule",
        ));
    }

    Ok(bisect(SolveFor::MonthlyContribution, config, |contribution| {
        let candidate = ProjectorInputs {
            monthly_contribution: contribution,
            ..*inputs
        };
        project_monthly(&candidate, annual_rate)
            .last()
            .map(|last| last.cumulative_npv >= target_real_corpus)
            .unwrap_or(false)
    }))
}

/// Bisects for the smallest value in the search range that is feasible.
/// `is_feasible` must be monotone: once true, true for every larger value.
fn bisect(
    solve_for: SolveFor,
    config: SolveConfig,
    is_feasible: impl Fn(f64) -> bool,
) -> SolveResult {
    let mut iterations = Vec::new();
    let mut solved_value = None;
    let mut converged = false;
    let feasible;
    let message;

    if is_feasible(config.search_min) {
        solved_value = Some(config.search_min);
        converged = true;
        feasible = true;
        message = "Already feasible at the lower search bound.".to_string();
    } else if !is_feasible(config.search_max) {
        feasible = false;
        message = "No feasible value found within the search bounds.".to_string();
    } else {
        let mut lo = config.search_min;
        let mut hi = config.search_max;
        let mut it = 0;
        while it < config.max_iterations {
            it += 1;
            let mid = (lo + hi) * 0.5;
            let ok = is_feasible(mid);
            iterations.push(SolveIteration {
                iteration: it,
                lower_bound: lo,
                upper_bound: hi,
                candidate_value: mid,
                feasible: ok,
            });

            if ok {
                hi = mid;
            } else {
                lo = mid;
            }

            if (hi - lo).abs() <= config.tolerance {
                converged = true;
                break;
            }
        }
        solved_value = Some(hi);
        feasible = true;
        message = if converged {
            match solve_for {
                SolveFor::StartingSalary => "Solved required starting salary.".to_string(),
                SolveFor::MonthlyContribution => {
                    "Solved required monthly contribution.".to_string()
                }
            }
        } else {
            "Reached max iterations before tolerance was met; returning best estimate.".to_string()
        };
    }

    SolveResult {
        solve_for,
        search_min: config.search_min,
        search_max: config.search_max,
        tolerance: config.tolerance,
        max_iterations: config.max_iterations,
        solved_value,
        iterations,
        converged,
        feasible,
        message,
    }
}

fn validate_config(config: SolveConfig) -> Result<()> {
    if !config.search_min.is_finite() || !config.search_max.is_finite() {
        return Err(PlanError::invalid("search bounds", "must be finite"));
    }
    if config.search_min < 0.0 {
        return Err(PlanError::invalid("search_min", "must be >= 0"));
    }
    if config.search_max <= config.search_min {
        return Err(PlanError::invalid("search_max", "must be greater than search_min"));
    }
    if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
        return Err(PlanError::invalid("tolerance", "must be > 0"));
    }
    if config.max_iterations == 0 || config.max_iterations > MAX_SOLVE_ITERATIONS {
        return Err(PlanError::invalid(
            "max_iterations",
            format!("must be between 1 and {MAX_SOLVE_ITERATIONS}"),
        ));
    }
    Ok(())
}
