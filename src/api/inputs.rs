use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::core::{
    AllocationSplit, Assumptions, DEFAULT_HORIZON_YEARS, Goal, GoalCategory, GoalSchedule,
    PlanError, PlannerConfig, ProjectorInputs, Result, SolveConfig, SolveFor, add_goal,
};

const MAX_HORIZON_YEARS: u32 = 100;
const MAX_AGE: u32 = 120;
const DEFAULT_SOLVE_RATE_PERCENT: f64 = 12.0;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "wealthplan plan",
    about = "Salary, 50/20/30 budget and goal funding, projected year by year"
)]
pub struct PlanCli {
    #[arg(long, default_value_t = 600_000.0, help = "Annual salary in year 1")]
    pub starting_salary: f64,
    #[arg(long, default_value_t = 5.0, help = "Yearly raise in percent")]
    pub annual_increment: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Raise in a job-change year in percent"
    )]
    pub job_change_increment: f64,
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [9, 14, 21, 27],
        help = "Comma-separated years (1-based) in which the job changes"
    )]
    pub job_change_years: Vec<u32>,
    #[arg(long, default_value_t = 6.0, help = "Expected annual inflation in percent")]
    pub inflation: f64,
    #[arg(
        long,
        default_value_t = 12.0,
        help = "Expected annual return on both savings pools in percent"
    )]
    pub investment_returns: f64,
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    pub horizon_years: u32,
    #[arg(long, default_value_t = 50.0, help = "Share of salary for needs in percent")]
    pub needs_percent: f64,
    #[arg(long, default_value_t = 20.0, help = "Share of salary for wants in percent")]
    pub wants_percent: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Share of salary for investments in percent"
    )]
    pub investments_percent: f64,
    #[arg(
        long,
        help = "JSON file with the goal list; the built-in goals are used when absent"
    )]
    pub goals_file: Option<PathBuf>,
}

impl Default for PlanCli {
    fn default() -> Self {
        Self::parse_from(["plan"])
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "wealthplan project",
    about = "Compounding projection of a growing monthly contribution across return scenarios"
)]
pub struct ProjectCli {
    #[arg(long, default_value_t = 26)]
    pub current_age: u32,
    #[arg(long, default_value_t = 55)]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 10_000.0, help = "Monthly contribution in year 1")]
    pub monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Yearly step-up of the contribution in percent"
    )]
    pub yearly_increase: f64,
    #[arg(long, default_value_t = 6.0, help = "Expected annual inflation in percent")]
    pub inflation: f64,
    #[arg(
        long,
        help = "Also print the month-by-month table at this annual return in percent"
    )]
    pub detail_rate: Option<f64>,
}

impl Default for ProjectCli {
    fn default() -> Self {
        Self::parse_from(["project"])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub assumptions: Assumptions,
    pub starting_salary: f64,
    pub goals: Vec<Goal>,
    pub config: PlannerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectRequest {
    pub inputs: ProjectorInputs,
    pub include_monthly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveRequest {
    StartingSalary {
        plan: PlanRequest,
        require_every_year: bool,
        config: SolveConfig,
    },
    MonthlyContribution {
        inputs: ProjectorInputs,
        annual_rate: f64,
        target_real_corpus: f64,
        config: SolveConfig,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipRequest {
    pub target_corpus: f64,
    pub annual_return: f64,
    pub years: u32,
    pub inflation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiRequest {
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundRequest {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub frequency: u32,
}

/// Plan fields as sent by HTTP clients. Rates are in percent. Query strings
/// can carry the scalar fields only.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanPayload {
    pub starting_salary: Option<f64>,
    pub annual_increment: Option<f64>,
    pub job_change_increment: Option<f64>,
    pub job_change_years: Option<Vec<u32>>,
    pub inflation: Option<f64>,
    pub investment_returns: Option<f64>,
    pub horizon_years: Option<u32>,
    pub needs_percent: Option<f64>,
    pub wants_percent: Option<f64>,
    pub investments_percent: Option<f64>,
    pub goals: Option<Vec<Goal>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPayload {
    pub current_age: Option<u32>,
    pub retirement_age: Option<u32>,
    pub monthly_contribution: Option<f64>,
    pub yearly_increase: Option<f64>,
    pub inflation: Option<f64>,
    pub include_monthly: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvePayload {
    pub solve_for: SolveFor,
    #[serde(default)]
    pub plan: PlanPayload,
    #[serde(default)]
    pub projection: ProjectPayload,
    #[serde(default)]
    pub require_every_year: bool,
    pub target_corpus: Option<f64>,
    pub return_rate: Option<f64>,
    pub search_min: Option<f64>,
    pub search_max: Option<f64>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipPayload {
    pub target_corpus: Option<f64>,
    pub rate_of_return: Option<f64>,
    pub time_period: Option<u32>,
    pub inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmiPayload {
    pub principal: Option<f64>,
    pub interest_rate: Option<f64>,
    pub tenure: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompoundPayload {
    pub principal: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
    pub frequency: Option<u32>,
}

/// The goal list a new plan starts with.
pub fn default_goals() -> Vec<Goal> {
    use GoalCategory::{Long, Medium, Short};

    [
        ("1", "Emergency Fund", 300_000.0, 1, Short),
        ("2", "Vacation every year", 50_000.0, 1, Short),
        ("3", "Mobile Phone", 50_000.0, 3, Short),
        ("4", "International Vacation", 250_000.0, 3, Medium),
        ("5", "Education", 3_000_000.0, 6, Medium),
        ("6", "Marriage", 1_000_000.0, 4, Medium),
        ("7", "Car", 500_000.0, 3, Medium),
        ("8", "Home downpayment", 3_000_000.0, 10, Long),
        ("9", "Kids education", 2_500_000.0, 25, Long),
        ("10", "Retirement", 10_000_000.0, 30, Long),
    ]
    .into_iter()
    .map(|(id, name, amount, year, category)| Goal {
        id: id.to_string(),
        name: name.to_string(),
        amount,
        category,
        schedule: GoalSchedule::OneTime { year },
    })
    .collect()
}

/// Reads a JSON array of goals.
pub fn load_goals(path: &Path) -> Result<Vec<Goal>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PlanError::invalid("--goals-file", format!("could not be read: {e}"))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        PlanError::invalid("--goals-file", format!("is not a valid goal list: {e}"))
    })
}

pub fn build_plan_request(cli: &PlanCli, goals: Vec<Goal>) -> Result<PlanRequest> {
    if !cli.starting_salary.is_finite() || cli.starting_salary <= 0.0 {
        return Err(PlanError::invalid("--starting-salary", "must be > 0"));
    }

    if cli.horizon_years == 0 || cli.horizon_years > MAX_HORIZON_YEARS {
        return Err(PlanError::invalid(
            "--horizon-years",
            format!("must be between 1 and {MAX_HORIZON_YEARS}"),
        ));
    }

    if cli.job_change_years.contains(&0) {
        return Err(PlanError::invalid("--job-change-years", "must all be >= 1"));
    }

    let needs = share("--needs-percent", cli.needs_percent)?;
    let wants = share("--wants-percent", cli.wants_percent)?;
    let investments = share("--investments-percent", cli.investments_percent)?;
    if ((needs + wants + investments) - 1.0).abs() > 1e-9 {
        return Err(PlanError::invalid(
            "allocation",
            "needs, wants and investments must add up to 100",
        ));
    }

    // Goes through add_goal so duplicate ids and bad amounts are rejected.
    let goals = goals
        .into_iter()
        .try_fold(Vec::new(), |acc: Vec<Goal>, goal| add_goal(&acc, goal))?;

    Ok(PlanRequest {
        assumptions: Assumptions {
            annual_increment: rate("--annual-increment", cli.annual_increment)?,
            job_change_increment: rate("--job-change-increment", cli.job_change_increment)?,
            job_change_years: cli.job_change_years.clone(),
            inflation: rate("--inflation", cli.inflation)?,
            investment_returns: rate("--investment-returns", cli.investment_returns)?,
        },
        starting_salary: cli.starting_salary,
        goals,
        config: PlannerConfig {
            horizon_years: cli.horizon_years,
            allocation: AllocationSplit {
                needs,
                wants,
                investments,
            },
        },
    })
}

pub fn build_projector_inputs(cli: &ProjectCli) -> Result<ProjectorInputs> {
    if cli.current_age == 0 {
        return Err(PlanError::invalid("--current-age", "must be > 0"));
    }

    if cli.retirement_age <= cli.current_age {
        return Err(PlanError::invalid(
            "--retirement-age",
            "must be > --current-age",
        ));
    }

    if cli.retirement_age > MAX_AGE {
        return Err(PlanError::invalid(
            "--retirement-age",
            format!("must be <= {MAX_AGE}"),
        ));
    }

    if !cli.monthly_contribution.is_finite() || cli.monthly_contribution <= 0.0 {
        return Err(PlanError::invalid("--monthly-contribution", "must be > 0"));
    }

    if !cli.yearly_increase.is_finite() || cli.yearly_increase < 0.0 {
        return Err(PlanError::invalid("--yearly-increase", "must be >= 0"));
    }

    if !cli.inflation.is_finite() || cli.inflation < 0.0 {
        return Err(PlanError::invalid("--inflation", "must be >= 0"));
    }

    Ok(ProjectorInputs {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        monthly_contribution: cli.monthly_contribution,
        yearly_increase: cli.yearly_increase / 100.0,
        inflation: cli.inflation / 100.0,
    })
}

pub fn plan_request_from_payload(payload: PlanPayload) -> Result<PlanRequest> {
    let mut cli = PlanCli::default();

    if let Some(v) = payload.starting_salary {
        cli.starting_salary = v;
    }
    if let Some(v) = payload.annual_increment {
        cli.annual_increment = v;
    }
    if let Some(v) = payload.job_change_increment {
        cli.job_change_increment = v;
    }
    if let Some(v) = payload.job_change_years {
        cli.job_change_years = v;
    }
    if let Some(v) = payload.inflation {
        cli.inflation = v;
    }
    if let Some(v) = payload.investment_returns {
        cli.investment_returns = v;
    }
    if let Some(v) = payload.horizon_years {
        cli.horizon_years = v;
    }
    if let Some(v) = payload.needs_percent {
        cli.needs_percent = v;
    }
    if let Some(v) = payload.wants_percent {
        cli.wants_percent = v;
    }
    if let Some(v) = payload.investments_percent {
        cli.investments_percent = v;
    }

    let goals = payload.goals.unwrap_or_else(default_goals);
    build_plan_request(&cli, goals)
}

pub fn project_request_from_payload(payload: ProjectPayload) -> Result<ProjectRequest> {
    let mut cli = ProjectCli::default();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.monthly_contribution {
        cli.monthly_contribution = v;
    }
    if let Some(v) = payload.yearly_increase {
        cli.yearly_increase = v;
    }
    if let Some(v) = payload.inflation {
        cli.inflation = v;
    }

    Ok(ProjectRequest {
        inputs: build_projector_inputs(&cli)?,
        include_monthly: payload.include_monthly.unwrap_or(false),
    })
}

pub fn solve_request_from_payload(payload: SolvePayload) -> Result<SolveRequest> {
    match payload.solve_for {
        SolveFor::StartingSalary => {
            let config = SolveConfig {
                search_min: payload.search_min.unwrap_or(0.0),
                search_max: payload.search_max.unwrap_or(100_000_000.0),
                tolerance: payload.tolerance.unwrap_or(1.0),
                max_iterations: payload.max_iterations.unwrap_or(100),
            };
            Ok(SolveRequest::StartingSalary {
                plan: plan_request_from_payload(payload.plan)?,
                require_every_year: payload.require_every_year,
                config,
            })
        }
        SolveFor::MonthlyContribution => {
            let Some(target_real_corpus) = payload.target_corpus else {
                return Err(PlanError::invalid(
                    "targetCorpus",
                    "is required when solveFor is monthly-contribution",
                ));
            };
            let config = SolveConfig {
                search_min: payload.search_min.unwrap_or(0.0),
                search_max: payload.search_max.unwrap_or(10_000_000.0),
                tolerance: payload.tolerance.unwrap_or(1.0),
                max_iterations: payload.max_iterations.unwrap_or(100),
            };
            let annual_rate = rate(
                "returnRate",
                payload.return_rate.unwrap_or(DEFAULT_SOLVE_RATE_PERCENT),
            )?;
            Ok(SolveRequest::MonthlyContribution {
                inputs: project_request_from_payload(payload.projection)?.inputs,
                annual_rate,
                target_real_corpus,
                config,
            })
        }
    }
}

pub fn sip_request_from_payload(payload: SipPayload) -> Result<SipRequest> {
    Ok(SipRequest {
        target_corpus: payload.target_corpus.unwrap_or(1_000_000.0),
        annual_return: rate("rateOfReturn", payload.rate_of_return.unwrap_or(12.0))?,
        years: payload.time_period.unwrap_or(10),
        inflation: rate("inflationRate", payload.inflation_rate.unwrap_or(0.0))?,
    })
}

pub fn emi_request_from_payload(payload: EmiPayload) -> Result<EmiRequest> {
    Ok(EmiRequest {
        principal: payload.principal.unwrap_or(1_000_000.0),
        annual_rate: rate("interestRate", payload.interest_rate.unwrap_or(8.5))?,
        tenure_years: payload.tenure.unwrap_or(20),
    })
}

pub fn compound_request_from_payload(payload: CompoundPayload) -> Result<CompoundRequest> {
    let principal = payload.principal.unwrap_or(100_000.0);
    if !principal.is_finite() || principal < 0.0 {
        return Err(PlanError::invalid("principal", "must be >= 0"));
    }

    let years = payload.years.unwrap_or(10.0);
    if !years.is_finite() || years < 0.0 {
        return Err(PlanError::invalid("years", "must be >= 0"));
    }

    Ok(CompoundRequest {
        principal,
        annual_rate: rate("rate", payload.rate.unwrap_or(12.0))?,
        years,
        frequency: payload.frequency.unwrap_or(12),
    })
}

/// Percent to fraction; anything at or below -100% is rejected.
fn rate(field: &str, percent: f64) -> Result<f64> {
    if !percent.is_finite() || percent <= -100.0 {
        return Err(PlanError::invalid(field, "must be > -100"));
    }
    Ok(percent / 100.0)
}

fn share(field: &str, percent: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(PlanError::invalid(field, "must be between 0 and 100"));
    }
    Ok(percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn plan_defaults_convert_percent_to_fractions() {
        let request =
            build_plan_request(&PlanCli::default(), default_goals()).expect("valid defaults");
        assert_approx(request.starting_salary, 600_000.0);
        assert_approx(request.assumptions.annual_increment, 0.05);
        assert_approx(request.assumptions.job_change_increment, 0.30);
        assert_approx(request.assumptions.inflation, 0.06);
        assert_approx(request.assumptions.investment_returns, 0.12);
        assert_eq!(request.assumptions.job_change_years, vec![9, 14, 21, 27]);
        assert_eq!(request.config, PlannerConfig::default());
        assert_eq!(request.goals.len(), 10);
    }

    #[test]
    fn default_goals_are_one_time_and_unique() {
        let goals = default_goals();
        assert!(goals.iter().all(|g| !g.schedule.is_recurring()));
        assert_eq!(goals[9].name, "Retirement");
        assert_eq!(goals[9].schedule.trigger_year(), 30);
        let mut ids: Vec<&str> = goals.iter().map(|g| g.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn plan_cli_parses_flags() {
        let cli = PlanCli::parse_from([
            "plan",
            "--starting-salary",
            "1800000",
            "--annual-increment",
            "7",
            "--job-change-years",
            "5,10",
            "--investment-returns",
            "10",
        ]);
        let request = build_plan_request(&cli, Vec::new()).expect("valid flags");
        assert_approx(request.starting_salary, 1_800_000.0);
        assert_approx(request.assumptions.annual_increment, 0.07);
        assert_approx(request.assumptions.investment_returns, 0.10);
        assert_eq!(request.assumptions.job_change_years, vec![5, 10]);
        assert!(request.goals.is_empty());
    }

    #[test]
    fn build_plan_request_rejects_bad_allocation() {
        let cli = PlanCli {
            needs_percent: 60.0,
            ..PlanCli::default()
        };
        let err = build_plan_request(&cli, Vec::new()).expect_err("must reject 110% split");
        assert!(err.to_string().contains("add up to 100"));

        let cli = PlanCli {
            wants_percent: -5.0,
            ..PlanCli::default()
        };
        let err = build_plan_request(&cli, Vec::new()).expect_err("must reject negative share");
        assert!(err.to_string().contains("--wants-percent"));
    }

    #[test]
    fn build_plan_request_rejects_bad_salary_and_horizon() {
        let cli = PlanCli {
            starting_salary: 0.0,
            ..PlanCli::default()
        };
        let err = build_plan_request(&cli, Vec::new()).expect_err("must reject zero salary");
        assert!(err.to_string().contains("--starting-salary"));

        let cli = PlanCli {
            horizon_years: 0,
            ..PlanCli::default()
        };
        assert!(build_plan_request(&cli, Vec::new()).is_err());

        let cli = PlanCli {
            inflation: -100.0,
            ..PlanCli::default()
        };
        let err = build_plan_request(&cli, Vec::new()).expect_err("must reject -100% inflation");
        assert!(err.to_string().contains("--inflation"));
    }

    #[test]
    fn build_plan_request_rejects_duplicate_goal_ids() {
        let mut goals = default_goals();
        goals.push(goals[0].clone());
        let err = build_plan_request(&PlanCli::default(), goals).expect_err("must reject dup");
        assert_eq!(
            err,
            PlanError::DuplicateGoal {
                id: "1".to_string()
            }
        );
    }

    #[test]
    fn plan_payload_parses_web_keys() {
        let json = r#"{
          "startingSalary": 1800000,
          "annualIncrement": 7,
          "jobChangeIncrement": 30,
          "jobChangeYears": [9, 14, 21, 27],
          "inflation": 6,
          "investmentReturns": 10,
          "goals": [
            {"id": "a", "name": "Emergency Fund", "amount": 300000, "category": "short",
             "schedule": {"kind": "one-time", "year": 1}},
            {"id": "b", "name": "Holiday", "amount": 50000, "category": "short",
             "schedule": {"kind": "recurring", "firstYear": 2, "interval": 2}}
          ]
        }"#;
        let payload: PlanPayload = serde_json::from_str(json).expect("json should parse");
        let request = plan_request_from_payload(payload).expect("valid payload");

        assert_approx(request.starting_salary, 1_800_000.0);
        assert_approx(request.assumptions.annual_increment, 0.07);
        assert_approx(request.assumptions.investment_returns, 0.10);
        assert_eq!(request.goals.len(), 2);
        assert_eq!(
            request.goals[1].schedule,
            GoalSchedule::Recurring {
                first_year: 2,
                interval: 2
            }
        );
        assert_eq!(request.goals[0].category, GoalCategory::Short);
    }

    #[test]
    fn empty_plan_payload_uses_defaults() {
        let payload: PlanPayload = serde_json::from_str("{}").expect("json should parse");
        let request = plan_request_from_payload(payload).expect("valid payload");
        assert_eq!(request.goals, default_goals());
        assert_approx(request.starting_salary, 600_000.0);
    }

    #[test]
    fn project_payload_parses_web_keys() {
        let json = r#"{
          "currentAge": 30,
          "retirementAge": 60,
          "monthlyContribution": 25000,
          "yearlyIncrease": 10,
          "inflation": 5,
          "includeMonthly": true
        }"#;
        let payload: ProjectPayload = serde_json::from_str(json).expect("json should parse");
        let request = project_request_from_payload(payload).expect("valid payload");
        assert_eq!(request.inputs.current_age, 30);
        assert_eq!(request.inputs.retirement_age, 60);
        assert_approx(request.inputs.monthly_contribution, 25_000.0);
        assert_approx(request.inputs.yearly_increase, 0.10);
        assert_approx(request.inputs.inflation, 0.05);
        assert!(request.include_monthly);
    }

    #[test]
    fn build_projector_inputs_rejects_inverted_ages() {
        let cli = ProjectCli {
            retirement_age: 26,
            ..ProjectCli::default()
        };
        let err = build_projector_inputs(&cli).expect_err("must reject equal ages");
        assert!(err.to_string().contains("--retirement-age"));

        let cli = ProjectCli {
            monthly_contribution: 0.0,
            ..ProjectCli::default()
        };
        assert!(build_projector_inputs(&cli).is_err());
    }

    #[test]
    fn project_payload_rejects_ages_past_the_cap() {
        let json = r#"{"retirementAge": 1000000, "includeMonthly": true}"#;
        let payload: ProjectPayload = serde_json::from_str(json).expect("json should parse");
        let err = project_request_from_payload(payload).expect_err("must reject huge age");
        assert!(err.to_string().contains("--retirement-age"));

        let cli = ProjectCli {
            retirement_age: MAX_AGE,
            ..ProjectCli::default()
        };
        let inputs = build_projector_inputs(&cli).expect("age at the cap is valid");
        assert_eq!(inputs.total_months(), (MAX_AGE - 26) * 12);
    }

    #[test]
    fn solve_payload_for_monthly_contribution_requires_target() {
        let json = r#"{"solveFor": "monthly-contribution"}"#;
        let payload: SolvePayload = serde_json::from_str(json).expect("json should parse");
        let err = solve_request_from_payload(payload).expect_err("must require target");
        assert!(err.to_string().contains("targetCorpus"));

        let json = r#"{
          "solveFor": "monthly-contribution",
          "targetCorpus": 50000000,
          "returnRate": 10,
          "projection": {"currentAge": 30, "retirementAge": 50}
        }"#;
        let payload: SolvePayload = serde_json::from_str(json).expect("json should parse");
        match solve_request_from_payload(payload).expect("valid payload") {
            SolveRequest::MonthlyContribution {
                inputs,
                annual_rate,
                target_real_corpus,
                ..
            } => {
                assert_eq!(inputs.retirement_age, 50);
                assert_approx(annual_rate, 0.10);
                assert_approx(target_real_corpus, 50_000_000.0);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn solve_payload_for_starting_salary_carries_plan() {
        let json = r#"{
          "solveFor": "starting-salary",
          "requireEveryYear": true,
          "plan": {"inflation": 5, "goals": []},
          "tolerance": 10
        }"#;
        let payload: SolvePayload = serde_json::from_str(json).expect("json should parse");
        match solve_request_from_payload(payload).expect("valid payload") {
            SolveRequest::StartingSalary {
                plan,
                require_every_year,
                config,
            } => {
                assert!(require_every_year);
                assert!(plan.goals.is_empty());
                assert_approx(plan.assumptions.inflation, 0.05);
                assert_approx(config.tolerance, 10.0);
                assert_eq!(config.max_iterations, 100);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn calculator_payloads_default_and_convert() {
        let sip = sip_request_from_payload(SipPayload::default()).expect("valid defaults");
        assert_approx(sip.target_corpus, 1_000_000.0);
        assert_approx(sip.annual_return, 0.12);
        assert_eq!(sip.years, 10);
        assert_approx(sip.inflation, 0.0);

        let emi: EmiPayload =
            serde_json::from_str(r#"{"principal": 500000, "interestRate": 9}"#).expect("json");
        let emi = emi_request_from_payload(emi).expect("valid payload");
        assert_approx(emi.principal, 500_000.0);
        assert_approx(emi.annual_rate, 0.09);
        assert_eq!(emi.tenure_years, 20);

        let err = compound_request_from_payload(CompoundPayload {
            years: Some(-1.0),
            ..CompoundPayload::default()
        })
        .expect_err("must reject negative years");
        assert!(err.to_string().contains("years"));
    }

    #[test]
    fn load_goals_reports_missing_file() {
        let err = load_goals(Path::new("/nonexistent/goals.json")).expect_err("must fail");
        assert!(err.to_string().contains("--goals-file could not be read"));
    }
}
