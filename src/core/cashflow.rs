use tracing::debug;

use super::goals::demand_by_year;
use super::types::{Assumptions, BudgetYear, CashFlowYear, Goal};

#[derive(Debug, Clone, Copy, Default)]
struct Pools {
    wants: f64,
    investments: f64,
}

#[derive(Debug, Clone, Copy)]
struct Withdrawal {
    from_wants: f64,
    from_investments: f64,
    shortfall: f64,
}

impl Pools {
    fn contribute(&mut self, row: &BudgetYear) {
        self.wants += row.monthly_wants * 12.0;
        self.investments += row.monthly_investments * 12.0;
    }

    fn grow(&mut self, rate: f64) {
        self.wants *= 1.0 + rate;
        self.investments *= 1.0 + rate;
    }

    /// Wants are drained before investments; whatever neither pool covers is
    /// reported as shortfall. Both pools stay at or above zero.
    fn withdraw(&mut self, demand: f64) -> Withdrawal {
        let demand = demand.max(0.0);
        let from_wants = demand.min(self.wants.max(0.0));
        self.wants = (self.wants - from_wants).max(0.0);

        let remaining = demand - from_wants;
        let mut from_investments = remaining.min(self.investments.max(0.0));
        if from_investments == remaining {
            // The two draws must add back up to the demand, not an ulp short.
            while remaining > 0.0 && from_wants + from_investments < demand {
                from_investments = f64::from_bits(from_investments.to_bits() + 1);
            }
        }
        self.investments = (self.investments - from_investments).max(0.0);

        let shortfall = if from_wants + from_investments >= demand {
            0.0
        } else {
            (remaining - from_investments).max(0.0)
        };
        Withdrawal {
            from_wants,
            from_investments,
            shortfall,
        }
    }

    fn total(self) -> f64 {
        self.wants + self.investments
    }
}

/// Walks the budget table year by year, funding both pools, compounding them
/// for the full year, then paying that year's goals out of them.
///
/// Contributions land at the start of the year and earn the whole year's
/// return before any goal is paid.
pub fn simulate_cash_flow(
    assumptions: &Assumptions,
    budget: &[BudgetYear],
    goals: &[Goal],
) -> Vec<CashFlowYear> {
    let horizon = budget.last().map(|row| row.year).unwrap_or(0);
    let demand = demand_by_year(goals, assumptions.inflation, horizon);
    let mut pools = Pools::default();
    let mut years = Vec::with_capacity(budget.len());

    for row in budget {
        pools.contribute(row);
        pools.grow(assumptions.investment_returns);

        let before = pools;
        let goals_this_year = demand.get(row.year as usize).copied().unwrap_or(0.0);
        let withdrawal = pools.withdraw(goals_this_year);

        if withdrawal.shortfall > 0.0 {
            debug!(
                year = row.year,
                shortfall = withdrawal.shortfall,
                "goal demand not fully funded"
            );
        }

        years.push(CashFlowYear {
            year: row.year,
            wants_before_goals: before.wants,
            investments_before_goals: before.investments,
            goals_this_year,
            amount_from_wants: withdrawal.from_wants,
            amount_from_investments: withdrawal.from_investments,
            wants_amount: pools.wants,
            investment_amount: pools.investments,
            shortfall: withdrawal.shortfall,
            can_meet_goals: withdrawal.shortfall == 0.0,
        });
    }

    debug!(years = years.len(), final_wealth = pools.total(), "simulated cash flow");
    years
}
