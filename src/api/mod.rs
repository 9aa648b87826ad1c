mod inputs;
mod report;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    DueGoal, EmiBreakdown, PlanError, PlanResult, ProjectionResult, ProjectorConfig, SolveResult,
    ValuedGoal, compound_interest, emi, occurrences_in_year, project_monthly, project_scenarios,
    required_monthly_sip, run_financial_plan, solve_monthly_contribution, solve_starting_salary,
    value_goals,
};

pub use inputs::{
    CompoundPayload, EmiPayload, PlanCli, PlanPayload, PlanRequest, ProjectCli, ProjectPayload,
    ProjectRequest, SipPayload, SolvePayload, SolveRequest, build_plan_request,
    build_projector_inputs, default_goals, load_goals,
};
pub use report::{render_monthly, render_plan, render_projection};

use inputs::{
    compound_request_from_payload, emi_request_from_payload, plan_request_from_payload,
    project_request_from_payload, sip_request_from_payload, solve_request_from_payload,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    #[serde(flatten)]
    plan: PlanResult,
    goals: Vec<ValuedGoal>,
    due_goals: Vec<DueGoal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SipResponse {
    monthly_investment: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompoundResponse {
    amount: f64,
    interest: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Runs the `plan` command and returns the report to print.
pub fn run_plan_cli(cli: PlanCli) -> Result<String, PlanError> {
    let goals = match &cli.goals_file {
        Some(path) => load_goals(path)?,
        None => default_goals(),
    };
    let request = build_plan_request(&cli, goals)?;
    let response = plan_response(&request);
    Ok(render_plan(&response.plan, &response.goals, &response.due_goals))
}

/// Runs the `project` command and returns the report to print.
pub fn run_project_cli(cli: ProjectCli) -> Result<String, PlanError> {
    let inputs = build_projector_inputs(&cli)?;
    let result = project_scenarios(&inputs, &ProjectorConfig::default(), false);
    let mut out = render_projection(&result);

    if let Some(percent) = cli.detail_rate {
        if !percent.is_finite() || percent <= -100.0 {
            return Err(PlanError::invalid("--detail-rate", "must be > -100"));
        }
        let annual_rate = percent / 100.0;
        out.push('\n');
        out.push_str(&render_monthly(
            annual_rate,
            &project_monthly(&inputs, annual_rate),
        ));
    }
    Ok(out)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router();

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "wealthplan HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/plan");

    axum::serve(listener, app).await
}

fn router() -> Router {
    Router::new()
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/solve", post(solve_handler))
        .route("/api/calculators/sip", post(sip_handler))
        .route("/api/calculators/emi", post(emi_handler))
        .route("/api/calculators/compound-interest", post(compound_handler))
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(query: Result<Query<PlanPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => plan_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

async fn plan_post_handler(body: Result<Json<PlanPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => plan_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

fn plan_handler_impl(payload: PlanPayload) -> Response {
    let request = match plan_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => return plan_error_response(e),
    };
    info!(
        goals = request.goals.len(),
        horizon = request.config.horizon_years,
        "plan request"
    );
    json_response(StatusCode::OK, plan_response(&request))
}

async fn project_get_handler(query: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

async fn project_post_handler(body: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let request = match project_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => return plan_error_response(e),
    };
    info!(
        months = request.inputs.total_months(),
        include_monthly = request.include_monthly,
        "projection request"
    );
    json_response(StatusCode::OK, project_response(request))
}

async fn solve_handler(body: Result<Json<SolvePayload>, JsonRejection>) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let result = solve_request_from_payload(payload).and_then(run_solve);
    match result {
        Ok(result) => {
            info!(
                solve_for = ?result.solve_for,
                feasible = result.feasible,
                iterations = result.iterations.len(),
                "solve request"
            );
            json_response(StatusCode::OK, result)
        }
        Err(e) => plan_error_response(e),
    }
}

async fn sip_handler(body: Result<Json<SipPayload>, JsonRejection>) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let result = sip_request_from_payload(payload).and_then(|r| {
        required_monthly_sip(r.target_corpus, r.annual_return, r.years, r.inflation)
    });
    match result {
        Ok(monthly_investment) => {
            json_response(StatusCode::OK, SipResponse { monthly_investment })
        }
        Err(e) => plan_error_response(e),
    }
}

async fn emi_handler(body: Result<Json<EmiPayload>, JsonRejection>) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    let result: Result<EmiBreakdown, PlanError> = emi_request_from_payload(payload)
        .and_then(|r| emi(r.principal, r.annual_rate, r.tenure_years));
    match result {
        Ok(breakdown) => json_response(StatusCode::OK, breakdown),
        Err(e) => plan_error_response(e),
    }
}

async fn compound_handler(body: Result<Json<CompoundPayload>, JsonRejection>) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };
    match compound_request_from_payload(payload) {
        Ok(r) => {
            let amount = compound_interest(r.principal, r.annual_rate, r.years, r.frequency);
            json_response(
                StatusCode::OK,
                CompoundResponse {
                    amount,
                    interest: amount - r.principal,
                },
            )
        }
        Err(e) => plan_error_response(e),
    }
}

fn plan_response(request: &PlanRequest) -> PlanResponse {
    let plan = run_financial_plan(
        &request.assumptions,
        request.starting_salary,
        &request.goals,
        &request.config,
    );
    let inflation = request.assumptions.inflation;
    let horizon = request.config.horizon_years;
    let due_goals = (1..=horizon)
        .flat_map(|year| occurrences_in_year(&request.goals, year, inflation, horizon))
        .collect();
    PlanResponse {
        plan,
        goals: value_goals(&request.goals, inflation),
        due_goals,
    }
}

fn project_response(request: ProjectRequest) -> ProjectionResult {
    project_scenarios(
        &request.inputs,
        &ProjectorConfig::default(),
        request.include_monthly,
    )
}

fn run_solve(request: SolveRequest) -> Result<SolveResult, PlanError> {
    match request {
        SolveRequest::StartingSalary {
            plan,
            require_every_year,
            config,
        } => solve_starting_salary(
            &plan.assumptions,
            &plan.goals,
            &plan.config,
            require_every_year,
            config,
        ),
        SolveRequest::MonthlyContribution {
            inputs,
            annual_rate,
            target_real_corpus,
            config,
        } => solve_monthly_contribution(&inputs, annual_rate, target_real_corpus, config),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn bad_request(msg: &str) -> Response {
    warn!(error = msg, "rejected malformed request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn plan_error_response(err: PlanError) -> Response {
    warn!(error = %err, "rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}
