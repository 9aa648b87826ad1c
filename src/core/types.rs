use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_YEARS: u32 = 30;
pub const CRORE: f64 = 10_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub annual_increment: f64,
    pub job_change_increment: f64,
    pub job_change_years: Vec<u32>,
    pub inflation: f64,
    pub investment_returns: f64,
}

impl Assumptions {
    pub fn is_job_change_year(&self, year: u32) -> bool {
        self.job_change_years.contains(&year)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Short,
    Medium,
    Long,
}

/// When a goal falls due. Years are 1-based offsets from the projection start.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum GoalSchedule {
    OneTime { year: u32 },
    Recurring { first_year: u32, interval: u32 },
}

impl GoalSchedule {
    pub fn trigger_year(self) -> u32 {
        match self {
            GoalSchedule::OneTime { year } => year,
            GoalSchedule::Recurring { first_year, .. } => first_year,
        }
    }

    pub fn is_recurring(self) -> bool {
        matches!(self, GoalSchedule::Recurring { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub category: GoalCategory,
    pub schedule: GoalSchedule,
}

/// Partial update applied to a goal by id. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<GoalCategory>,
    pub schedule: Option<GoalSchedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalOccurrence {
    pub year: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueGoal {
    pub goal_id: String,
    pub name: String,
    pub year: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedGoal {
    #[serde(flatten)]
    pub goal: Goal,
    pub value_at_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationSplit {
    pub needs: f64,
    pub wants: f64,
    pub investments: f64,
}

impl Default for AllocationSplit {
    fn default() -> Self {
        Self {
            needs: 0.50,
            wants: 0.20,
            investments: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    pub horizon_years: u32,
    pub allocation: AllocationSplit,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            allocation: AllocationSplit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetYear {
    pub year: u32,
    pub starting_salary: f64,
    pub job_change: bool,
    pub increment: f64,
    pub ending_salary: f64,
    pub monthly_needs: f64,
    pub monthly_wants: f64,
    pub monthly_investments: f64,
    pub needs_percentage: f64,
    pub wants_percentage: f64,
    pub investments_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowYear {
    pub year: u32,
    pub wants_before_goals: f64,
    pub investments_before_goals: f64,
    pub goals_this_year: f64,
    pub amount_from_wants: f64,
    pub amount_from_investments: f64,
    pub wants_amount: f64,
    pub investment_amount: f64,
    pub shortfall: f64,
    pub can_meet_goals: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
    pub category_totals: CategoryTotals,
    pub shortfall: f64,
    pub surplus: f64,
    pub shortfall_years: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    pub budget_years: Vec<BudgetYear>,
    pub cash_flow_years: Vec<CashFlowYear>,
    pub total_accumulated_wealth: f64,
    pub total_goals_value: f64,
    pub goals_achievable: bool,
    pub summary: GoalsSummary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectorInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_contribution: f64,
    pub yearly_increase: f64,
    pub inflation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRate {
    pub rate: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorConfig {
    pub scenarios: Vec<ScenarioRate>,
    pub crore: f64,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        let menu = [
            (0.05, "5% - FD returns"),
            (0.10, "10% - Gold returns"),
            (0.15, "15% - Equity returns"),
            (0.20, "20% - High risk equity returns"),
            (0.25, "25% - Very hard to get"),
            (0.30, "30% - Extremely risky"),
            (0.35, "35% - Almost impossible"),
            (0.40, "40% - Forget it :)"),
        ];
        Self {
            scenarios: menu
                .into_iter()
                .map(|(rate, label)| ScenarioRate {
                    rate,
                    label: label.to_string(),
                })
                .collect(),
            crore: CRORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    pub month: u32,
    pub year: u32,
    pub monthly_contribution: f64,
    pub fv: f64,
    pub cumulative_fv: f64,
    pub npv: f64,
    pub cumulative_npv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnScenario {
    pub return_rate: f64,
    pub label: String,
    #[serde(rename = "totalFV")]
    pub total_fv: f64,
    #[serde(rename = "totalNPV")]
    pub total_npv: f64,
    pub value_in_crores: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<MonthlyProjection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyContribution {
    pub year: u32,
    pub monthly_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_months: u32,
    pub investment_period: u32,
    pub total_invested: f64,
    pub scenarios: Vec<ReturnScenario>,
    pub yearly_summary: Vec<YearlyContribution>,
}

impl ProjectionResult {
    pub fn empty() -> Self {
        Self {
            total_months: 0,
            investment_period: 0,
            total_invested: 0.0,
            scenarios: Vec::new(),
            yearly_summary: Vec::new(),
        }
    }

    /// An empty scenario list means the inputs could not be projected.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
