//! Plain-text tables printed by the `plan` and `project` commands.

use crate::core::{DueGoal, MonthlyProjection, PlanResult, ProjectionResult, ValuedGoal};
use crate::format::{format_crores, format_currency, format_lakhs, format_percentage};

pub fn render_plan(plan: &PlanResult, goals: &[ValuedGoal], due: &[DueGoal]) -> String {
    let mut lines = Vec::new();

    lines.push("Budget".to_string());
    lines.push(format!(
        "{:>4} {:>3} {:>14} {:>12} {:>14} {:>12} {:>12} {:>12} {:>7} {:>7} {:>7}",
        "Year",
        "Job",
        "Start salary",
        "Increment",
        "End salary",
        "Needs/mo",
        "Wants/mo",
        "Invest/mo",
        "Needs",
        "Wants",
        "Invest"
    ));
    for row in &plan.budget_years {
        lines.push(format!(
            "{:>4} {:>3} {:>14} {:>12} {:>14} {:>12} {:>12} {:>12} {:>7} {:>7} {:>7}",
            row.year,
            if row.job_change { "*" } else { "" },
            format_currency(row.starting_salary),
            format_currency(row.increment),
            format_currency(row.ending_salary),
            format_currency(row.monthly_needs),
            format_currency(row.monthly_wants),
            format_currency(row.monthly_investments),
            format_percentage(row.needs_percentage),
            format_percentage(row.wants_percentage),
            format_percentage(row.investments_percentage),
        ));
    }

    lines.push(String::new());
    lines.push("Cash flow".to_string());
    lines.push(format!(
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>5}",
        "Year",
        "Wants before",
        "Invest before",
        "Goals due",
        "From wants",
        "From invest",
        "Wants after",
        "Invest after",
        "Met"
    ));
    for row in &plan.cash_flow_years {
        lines.push(format!(
            "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>14} {:>5}",
            row.year,
            format_currency(row.wants_before_goals),
            format_currency(row.investments_before_goals),
            format_currency(row.goals_this_year),
            format_currency(row.amount_from_wants),
            format_currency(row.amount_from_investments),
            format_currency(row.wants_amount),
            format_currency(row.investment_amount),
            if row.can_meet_goals { "yes" } else { "NO" },
        ));
    }

    if !goals.is_empty() {
        lines.push(String::new());
        lines.push("Goals".to_string());
        for valued in goals {
            let goal = &valued.goal;
            let when = if goal.schedule.is_recurring() {
                format!("from year {}", goal.schedule.trigger_year())
            } else {
                format!("year {}", goal.schedule.trigger_year())
            };
            lines.push(format!(
                "  {:<28} {:<14} {:>14} -> {:>14} ({:?})",
                goal.name,
                when,
                format_currency(goal.amount),
                format_currency(valued.value_at_time),
                goal.category,
            ));
        }
    }

    if !due.is_empty() {
        lines.push(String::new());
        lines.push("Due by year".to_string());
        for goal in due {
            lines.push(format!(
                "{:>4}  {:<28} {:>14}",
                goal.year,
                goal.name,
                format_currency(goal.amount)
            ));
        }
    }

    let summary = &plan.summary;
    lines.push(String::new());
    lines.push(format!(
        "Accumulated wealth: {} ({})",
        format_currency(plan.total_accumulated_wealth),
        format_crores(plan.total_accumulated_wealth)
    ));
    lines.push(format!(
        "Goals value:        {} ({})",
        format_currency(plan.total_goals_value),
        format_crores(plan.total_goals_value)
    ));
    lines.push(format!(
        "By category:        short {} / medium {} / long {}",
        format_currency(summary.category_totals.short),
        format_currency(summary.category_totals.medium),
        format_currency(summary.category_totals.long)
    ));
    if plan.goals_achievable {
        lines.push(format!(
            "Goals achievable, surplus {}",
            format_currency(summary.surplus)
        ));
    } else {
        lines.push(format!(
            "Goals NOT achievable, shortfall {}",
            format_currency(summary.shortfall)
        ));
    }
    if !summary.shortfall_years.is_empty() {
        let years: Vec<String> = summary
            .shortfall_years
            .iter()
            .map(|year| year.to_string())
            .collect();
        lines.push(format!("Underfunded years: {}", years.join(", ")));
    }

    lines.push(String::new());
    lines.join("\n")
}

pub fn render_projection(result: &ProjectionResult) -> String {
    if result.is_empty() {
        return "Nothing to project: check ages and contribution.\n".to_string();
    }

    let mut lines = vec![
        format!(
            "Investing for {} years ({} months), {} paid in ({})",
            result.investment_period,
            result.total_months,
            format_currency(result.total_invested),
            format_lakhs(result.total_invested)
        ),
        String::new(),
        format!(
            "{:<34} {:>18} {:>18} {:>12}",
            "Scenario", "Future value", "Today's value", "Crores"
        ),
    ];
    for scenario in &result.scenarios {
        lines.push(format!(
            "{:<34} {:>18} {:>18} {:>12.2}",
            scenario.label,
            format_currency(scenario.total_fv),
            format_currency(scenario.total_npv),
            scenario.value_in_crores,
        ));
    }

    lines.push(String::new());
    lines.push(format!("{:>4} {:>16}", "Year", "Monthly SIP"));
    for row in &result.yearly_summary {
        lines.push(format!(
            "{:>4} {:>16}",
            row.year,
            format_currency(row.monthly_contribution)
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

pub fn render_monthly(annual_rate: f64, months: &[MonthlyProjection]) -> String {
    let mut lines = vec![
        format!("Month by month at {}", format_percentage(annual_rate)),
        format!(
            "{:>5} {:>4} {:>12} {:>14} {:>16} {:>14} {:>16}",
            "Month", "Year", "Contribution", "FV", "Cumulative FV", "NPV", "Cumulative NPV"
        ),
    ];
    for row in months {
        lines.push(format!(
            "{:>5} {:>4} {:>12} {:>14} {:>16} {:>14} {:>16}",
            row.month,
            row.year,
            format_currency(row.monthly_contribution),
            format_currency(row.fv),
            format_currency(row.cumulative_fv),
            format_currency(row.npv),
            format_currency(row.cumulative_npv),
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}
