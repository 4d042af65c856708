mod report;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    IndexedPoint, RateProfile, SimulationInput, SimulationResult, compound, derive_rates,
};

pub use report::{format_multiplier, format_report};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("contribution margin must be a finite fraction between 0 and 1, got {0}")]
    ContributionMargin(f64),
    #[error("roas must be a finite value >= 0, got {0}")]
    Roas(f64),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to encode JSON output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "cashcycle",
    about = "Compare 12-month indexed growth of a traditional and a fast cash cycle"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Contribution margin in percent, e.g. 50"
    )]
    contribution_margin: f64,
    #[arg(long, default_value_t = 3.0, help = "Return on ad spend, e.g. 3.0")]
    roas: f64,
    #[arg(long, default_value_t = 45, help = "Supplier net payment terms in days")]
    net_terms_days: u32,
    #[arg(
        long,
        default_value_t = false,
        help = "Clamp inputs to the reference slider ranges before simulating"
    )]
    clamp: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    contribution_margin: Option<f64>,
    roas: Option<f64>,
    net_terms_days: Option<u32>,
    clamp: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    inputs: SimulationInput,
    rates: RateProfile,
    series: Vec<IndexedPoint>,
    multiplier: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Checks raw inputs before they reach the simulator; the margin is a fraction here.
fn validate_inputs(inputs: SimulationInput, clamp: bool) -> Result<SimulationInput, InputError> {
    if !inputs.contribution_margin.is_finite()
        || !(0.0..=1.0).contains(&inputs.contribution_margin)
    {
        return Err(InputError::ContributionMargin(inputs.contribution_margin));
    }

    if !inputs.roas.is_finite() || inputs.roas < 0.0 {
        return Err(InputError::Roas(inputs.roas));
    }

    Ok(if clamp {
        inputs.clamped_to_reference()
    } else {
        inputs
    })
}

fn build_inputs(cli: &Cli) -> Result<SimulationInput, InputError> {
    let inputs = SimulationInput::new(
        cli.contribution_margin / 100.0,
        cli.roas,
        cli.net_terms_days,
    );
    validate_inputs(inputs, cli.clamp)
}

impl SimulateResponse {
    fn from_parts(inputs: SimulationInput, rates: RateProfile, result: SimulationResult) -> Self {
        Self {
            inputs,
            rates,
            series: result.series,
            multiplier: result.multiplier,
        }
    }
}

fn build_simulate_response(inputs: SimulationInput) -> SimulateResponse {
    let rates = derive_rates(&inputs);
    SimulateResponse::from_parts(inputs, rates, compound(&rates))
}

/// Parses command-line flags, runs one simulation and prints it to stdout.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let inputs = build_inputs(&cli)?;
    debug!(
        contribution_margin = inputs.contribution_margin,
        roas = inputs.roas,
        net_terms_days = inputs.net_terms_days,
        "running simulation"
    );

    let rates = derive_rates(&inputs);
    let result = compound(&rates);
    match cli.format {
        OutputFormat::Text => print!("{}", format_report(&inputs, &rates, &result)),
        OutputFormat::Json => {
            let response = SimulateResponse::from_parts(inputs, rates, result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "cashcycle HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/api/simulate");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(error = %err, "rejected simulate request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let response = build_simulate_response(inputs);
    debug!(multiplier = response.multiplier, "simulate request served");
    json_response(StatusCode::OK, response)
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

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<SimulationInput, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload).map_err(|e| e.to_string())
}

// The API speaks the same units it echoes back under `inputs`, so a response
// can be replayed as a request.
fn inputs_from_payload(payload: SimulatePayload) -> Result<SimulationInput, InputError> {
    let mut inputs = default_inputs_for_api();

    if let Some(v) = payload.contribution_margin {
        inputs.contribution_margin = v;
    }
    if let Some(v) = payload.roas {
        inputs.roas = v;
    }
    if let Some(v) = payload.net_terms_days {
        inputs.net_terms_days = v;
    }

    validate_inputs(inputs, payload.clamp.unwrap_or(false))
}

fn default_inputs_for_api() -> SimulationInput {
    SimulationInput::new(0.50, 3.0, 45)
}
