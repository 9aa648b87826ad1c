use tracing::debug;

use super::types::{AllocationSplit, Assumptions, BudgetYear, PlannerConfig};

/// Projects salary growth and the Needs/Wants/Investments split year by year.
///
/// Year 1 applies the split to the starting salary. Every later year adds the
/// raise to each bucket in the same fixed proportions instead of re-splitting
/// the new salary; the ratios are recomputed from the buckets each year and
/// only match the split up to accumulated rounding.
pub fn project_budget(
    assumptions: &Assumptions,
    starting_salary: f64,
    config: &PlannerConfig,
) -> Vec<BudgetYear> {
    let split = config.allocation;
    let mut years: Vec<BudgetYear> = Vec::with_capacity(config.horizon_years as usize);

    for year in 1..=config.horizon_years {
        let job_change = assumptions.is_job_change_year(year);
        let row = match years.last() {
            None => first_budget_year(starting_salary, job_change, split),
            Some(prev) => next_budget_year(prev, year, job_change, assumptions, split),
        };
        years.push(row);
    }

    if let Some(last) = years.last() {
        debug!(
            horizon = config.horizon_years,
            final_salary = last.ending_salary,
            "projected budget"
        );
    }
    years
}

fn first_budget_year(starting_salary: f64, job_change: bool, split: AllocationSplit) -> BudgetYear {
    let monthly_salary = starting_salary / 12.0;
    with_ratios(BudgetYear {
        year: 1,
        starting_salary: 0.0,
        job_change,
        increment: 0.0,
        ending_salary: starting_salary,
        monthly_needs: monthly_salary * split.needs,
        monthly_wants: monthly_salary * split.wants,
        monthly_investments: monthly_salary * split.investments,
        needs_percentage: 0.0,
        wants_percentage: 0.0,
        investments_percentage: 0.0,
    })
}

fn next_budget_year(
    prev: &BudgetYear,
    year: u32,
    job_change: bool,
    assumptions: &Assumptions,
    split: AllocationSplit,
) -> BudgetYear {
    let rate = if job_change {
        assumptions.job_change_increment
    } else {
        assumptions.annual_increment
    };
    let starting_salary = prev.ending_salary;
    let increment = rate * starting_salary;

    with_ratios(BudgetYear {
        year,
        starting_salary,
        job_change,
        increment,
        ending_salary: starting_salary + increment,
        monthly_needs: prev.monthly_needs + increment * split.needs / 12.0,
        monthly_wants: prev.monthly_wants + increment * split.wants / 12.0,
        monthly_investments: prev.monthly_investments + increment * split.investments / 12.0,
        needs_percentage: 0.0,
        wants_percentage: 0.0,
        investments_percentage: 0.0,
    })
}

fn with_ratios(mut row: BudgetYear) -> BudgetYear {
    let monthly_salary = row.ending_salary / 12.0;
    let ratio = |bucket: f64| {
        if monthly_salary > 0.0 && monthly_salary.is_finite() {
            bucket / monthly_salary
        } else {
            0.0
        }
    };
    row.needs_percentage = ratio(row.monthly_needs);
    row.wants_percentage = ratio(row.monthly_wants);
    row.investments_percentage = ratio(row.monthly_investments);
    row
}
