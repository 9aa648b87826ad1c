use super::error::{PlanError, Result};
use super::growth::inflate;
use super::types::{
    CategoryTotals, DueGoal, Goal, GoalCategory, GoalOccurrence, GoalPatch, GoalSchedule,
    ValuedGoal,
};

/// Inflation-adjusted value of `amount` (today's money) when it falls due in
/// `year`. Inactive goals (non-positive amount or year 0) are worth nothing.
pub fn goal_value(amount: f64, year: u32, inflation: f64) -> f64 {
    if amount.is_nan() || amount <= 0.0 || year == 0 {
        return 0.0;
    }
    inflate(amount, year, inflation)
}

/// Expands a goal into its dated, inflation-adjusted occurrences.
///
/// A one-time goal always yields exactly one occurrence, even past the
/// horizon. A recurring goal yields every occurrence up to and including
/// `horizon`, each valued at its own year. An interval of 0 is read as 1.
pub fn expand_goal(goal: &Goal, inflation: f64, horizon: u32) -> Vec<GoalOccurrence> {
    match goal.schedule {
        GoalSchedule::OneTime { year } => vec![GoalOccurrence {
            year,
            amount: goal_value(goal.amount, year, inflation),
        }],
        GoalSchedule::Recurring {
            first_year,
            interval,
        } => (first_year..=horizon)
            .step_by(interval.max(1) as usize)
            .map(|year| GoalOccurrence {
                year,
                amount: goal_value(goal.amount, year, inflation),
            })
            .collect(),
    }
}

/// Total goal demand per year; index 0 is unused so `demand[year]` reads
/// naturally. Occurrences past the horizon are dropped.
pub fn demand_by_year(goals: &[Goal], inflation: f64, horizon: u32) -> Vec<f64> {
    let mut demand = vec![0.0; horizon as usize + 1];
    for goal in goals {
        for occurrence in expand_goal(goal, inflation, horizon) {
            if let Some(slot) = demand.get_mut(occurrence.year as usize) {
                *slot += occurrence.amount;
            }
        }
    }
    demand
}

pub fn occurrences_in_year(
    goals: &[Goal],
    year: u32,
    inflation: f64,
    horizon: u32,
) -> Vec<DueGoal> {
    goals
        .iter()
        .flat_map(|goal| {
            expand_goal(goal, inflation, horizon)
                .into_iter()
                .filter(move |occurrence| occurrence.year == year)
                .map(move |occurrence| DueGoal {
                    goal_id: goal.id.clone(),
                    name: goal.name.clone(),
                    year: occurrence.year,
                    amount: occurrence.amount,
                })
        })
        .collect()
}

/// Sum of every occurrence of every goal, met or not.
pub fn total_goals_value(goals: &[Goal], inflation: f64, horizon: u32) -> f64 {
    goals
        .iter()
        .flat_map(|goal| expand_goal(goal, inflation, horizon))
        .map(|occurrence| occurrence.amount)
        .sum()
}

pub fn category_totals(goals: &[Goal], inflation: f64, horizon: u32) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for goal in goals {
        let value: f64 = expand_goal(goal, inflation, horizon)
            .iter()
            .map(|occurrence| occurrence.amount)
            .sum();
        match goal.category {
            GoalCategory::Short => totals.short += value,
            GoalCategory::Medium => totals.medium += value,
            GoalCategory::Long => totals.long += value,
        }
    }
    totals
}

/// Copies the caller's goals with their value at the trigger year attached.
pub fn value_goals(goals: &[Goal], inflation: f64) -> Vec<ValuedGoal> {
    goals
        .iter()
        .map(|goal| ValuedGoal {
            goal: goal.clone(),
            value_at_time: goal_value(goal.amount, goal.schedule.trigger_year(), inflation),
        })
        .collect()
}

pub fn add_goal(goals: &[Goal], goal: Goal) -> Result<Vec<Goal>> {
    validate_goal(&goal)?;
    if goals.iter().any(|existing| existing.id == goal.id) {
        return Err(PlanError::DuplicateGoal { id: goal.id });
    }
    let mut next = goals.to_vec();
    next.push(goal);
    Ok(next)
}

pub fn update_goal(goals: &[Goal], id: &str, patch: GoalPatch) -> Result<Vec<Goal>> {
    let index = position_of(goals, id)?;
    let mut next = goals.to_vec();
    let goal = &mut next[index];
    if let Some(name) = patch.name {
        goal.name = name;
    }
    if let Some(amount) = patch.amount {
        goal.amount = amount;
    }
    if let Some(category) = patch.category {
        goal.category = category;
    }
    if let Some(schedule) = patch.schedule {
        goal.schedule = schedule;
    }
    validate_goal(goal)?;
    Ok(next)
}

pub fn remove_goal(goals: &[Goal], id: &str) -> Result<Vec<Goal>> {
    let index = position_of(goals, id)?;
    let mut next = goals.to_vec();
    next.remove(index);
    Ok(next)
}

fn position_of(goals: &[Goal], id: &str) -> Result<usize> {
    goals
        .iter()
        .position(|goal| goal.id == id)
        .ok_or_else(|| PlanError::GoalNotFound { id: id.to_string() })
}

fn validate_goal(goal: &Goal) -> Result<()> {
    if goal.id.trim().is_empty() {
        return Err(PlanError::invalid("goal id", "must not be empty"));
    }
    if !goal.amount.is_finite() {
        return Err(PlanError::invalid("goal amount", "must be finite"));
    }
    Ok(())
}
