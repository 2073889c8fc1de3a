//! AWS Lambda handler for running RPCfi projections
//!
//! Accepts an inline chain configuration plus projection parameters via JSON
//! and returns the projected table with summary statistics.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use rpcfi_flow::chain::{config_from_value, parse_month_key};
use rpcfi_flow::projection::{
    PeriodRow, ProjectionEngine, ProjectionSettings, ProjectionSummary, DEFAULT_HORIZON_MONTHS,
    DEFAULT_PROTOCOL_SHARE, DEFAULT_START_MONTH,
};
use rpcfi_flow::RevenueMode;

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
struct ProjectionRequest {
    /// Inline chain configuration (same schema as the config files)
    config: serde_json::Value,

    /// APY scenario to project (default: base)
    #[serde(default = "default_scenario")]
    scenario: String,

    /// Revenue mode: growth or flat (default: growth)
    #[serde(default = "default_mode")]
    mode: String,

    /// Number of months to project (default: 24)
    #[serde(default = "default_horizon")]
    horizon_months: u32,

    /// Share of revenue routed to the protocol untouched (default: 0.5)
    #[serde(default = "default_protocol_share")]
    protocol_share: f64,

    /// First projected month (default: 2026-01)
    #[serde(default = "default_start_month")]
    start_month: String,
}

fn default_scenario() -> String {
    "base".to_string()
}

fn default_mode() -> String {
    "growth".to_string()
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

fn default_protocol_share() -> f64 {
    DEFAULT_PROTOCOL_SHARE
}

fn default_start_month() -> String {
    DEFAULT_START_MONTH.to_string()
}

/// Output from the projection
#[derive(Debug, Serialize)]
struct ProjectionResponse {
    chain_name: String,
    scenario: String,
    apy: f64,
    mode: String,
    summary: ProjectionSummary,
    rows: Vec<PeriodRow>,
    execution_time_ms: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers
}

fn text_response(status: i64, body: String) -> ApiGatewayV2httpResponse {
    ApiGatewayV2httpResponse {
        status_code: status,
        headers: cors_headers(),
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}

fn error_response(status: i64, message: &str) -> ApiGatewayV2httpResponse {
    text_response(status, serde_json::json!({ "error": message }).to_string())
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_str() == "OPTIONS" {
        return Ok(ApiGatewayV2httpResponse {
            status_code: 200,
            headers: cors_headers(),
            body: None,
            ..Default::default()
        });
    }

    let body_str = request.body.unwrap_or_else(|| "{}".to_string());

    let parsed: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("invalid JSON body: {e}"))),
    };

    let config = match config_from_value(&parsed.config) {
        Ok(c) => c,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let mode = match parsed.mode.parse::<RevenueMode>() {
        Ok(m) => m,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let start_month = match parse_month_key(&parsed.start_month) {
        Ok(d) => d,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let settings = ProjectionSettings {
        horizon_months: parsed.horizon_months,
        protocol_share: parsed.protocol_share,
        mode,
        start_month,
    };

    let engine = ProjectionEngine::new(config, settings);
    let table = match engine.project(&parsed.scenario) {
        Ok(t) => t,
        Err(e) => return Ok(error_response(400, &e.to_string())),
    };

    let response = ProjectionResponse {
        chain_name: table.chain_name.clone(),
        scenario: table.scenario.clone(),
        apy: table.apy,
        mode: table.mode.as_str().to_string(),
        summary: table.summary(),
        rows: table.rows,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    match serde_json::to_string(&response) {
        Ok(json) => Ok(text_response(200, json)),
        Err(e) => Ok(error_response(500, &format!("serialization failure: {e}"))),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
