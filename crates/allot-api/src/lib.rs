//! Allocation calculator HTTP API
//!
//! Serves the sale contract's counters and the oversubscription calculation
//! as JSON. Counters are read fresh on every request; nothing is cached.

use std::sync::Arc;

use allot_calculator::{ALLOCATION, Calculator, UNPURCHASED, render_whole, token_estimate};
use allot_types::{ContractCounters, FixedPointAmount};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod chain;
pub mod config;
pub mod error;
pub mod types;

use crate::chain::{CounterSource, RpcCounterReader, StaticCounterSource};
use crate::config::{AllotConfig, ConfigError};
use crate::error::ApiError;
use crate::types::{
    CalculateRequest, CalculateResponse, ContractDataResponse, CountersDisplay, HealthResponse,
};

/// Shared, read-only application state.
pub struct AppState {
    pub config: AllotConfig,
    pub calculator: Calculator,
    pub counters: Arc<dyn CounterSource>,
    token_price: FixedPointAmount,
}

impl AppState {
    pub fn new(config: AllotConfig, counters: Arc<dyn CounterSource>) -> Result<Self, ConfigError> {
        let calculator = Calculator::with_normalizer(config.normalizer()?);
        let token_price = config.token_price()?;
        Ok(Self { config, calculator, counters, token_price })
    }

    /// Picks the counter source from configuration: fixed `[counters]` when
    /// present, the chain otherwise.
    pub fn from_config(config: AllotConfig) -> anyhow::Result<Self> {
        let counters: Arc<dyn CounterSource> = match &config.counters {
            Some(counters) => {
                info!("Using static contract counters from configuration");
                Arc::new(StaticCounterSource::new(counters.clone()))
            }
            None => Arc::new(RpcCounterReader::from_config(&config.chain)?),
        };
        Ok(Self::new(config, counters)?)
    }

    /// Renders a fixed-point string the way the dashboard shows it.
    pub fn render(&self, fixed_point: &str) -> String {
        if self.config.display.whole_units_only {
            if let Ok(amount) = self.calculator.normalizer().fixed_point(fixed_point) {
                return render_whole(amount);
            }
        }
        self.calculator.display(fixed_point)
    }

    /// `allocation - reserved` as a fixed-point string, `"0"` if the counters
    /// do not allow it.
    pub fn unpurchased(&self, counters: &ContractCounters) -> String {
        match self.calculator.calculate_raw(UNPURCHASED, None, counters) {
            Ok(amount) => amount.to_string(),
            Err(error) => {
                warn!(%error, "unpurchased allocation unavailable, reporting zero");
                "0".to_string()
            }
        }
    }

    /// Sale tokens bought by a fixed-point amount, `"0"` if it cannot be
    /// worked out.
    pub fn tokens_for(&self, fixed_point: &str) -> String {
        let estimate = self
            .calculator
            .normalizer()
            .fixed_point(fixed_point)
            .and_then(|amount| token_estimate(amount, self.token_price));
        match estimate {
            Ok(tokens) => tokens.to_string(),
            Err(error) => {
                warn!(%error, fixed_point, "token estimate unavailable, reporting zero");
                "0".to_string()
            }
        }
    }

    pub fn contract_data(&self, counters: ContractCounters) -> ContractDataResponse {
        let unpurchased = self.unpurchased(&counters);
        let display = CountersDisplay {
            total_allocation: self.render(counters.total_allocation()),
            total_balance: self.render(counters.total_balance()),
            total_reserved_used: self.render(counters.total_reserved_used()),
            unpurchased: self.render(&unpurchased),
        };
        ContractDataResponse { counters, unpurchased, display }
    }

    pub fn calculate(&self, user_input: &str, counters: ContractCounters) -> CalculateResponse {
        let result = self.calculator.allocation_or_zero(user_input, &counters);
        let display = self.render(&result);
        let token_estimate = self.tokens_for(&result);
        let token_display = self.render(&token_estimate);
        CalculateResponse {
            result,
            display,
            token_estimate,
            token_display,
            token_symbol: self.config.display.token_symbol.clone(),
            counters,
        }
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contract-data", get(contract_data))
        .route("/api/calculate", post(calculate))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn contract_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractDataResponse>, ApiError> {
    let counters = state.counters.fetch_counters().await?;
    Ok(Json(state.contract_data(counters)))
}

async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    if request.user_input.trim().is_empty() {
        return Err(ApiError::validation_field("userInput", "enter an amount to calculate"));
    }

    let counters = match request.counters {
        Some(counters) => counters,
        None => state.counters.fetch_counters().await?,
    };

    let response = state.calculate(&request.user_input, counters);
    info!(
        calculator = ALLOCATION,
        user_input = %request.user_input,
        result = %response.result,
        "Calculated allocation"
    );
    Ok(Json(response))
}
