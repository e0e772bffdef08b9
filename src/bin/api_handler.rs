//! HTTP handler exposing the net worth tracker
//!
//! Accepts JSON over Lambda Function URLs (or any lambda_http front) and
//! serves login, assumptions, holdings, price refresh, and projections
//! against a shared in-memory record store.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use networth_system::pricing;
use networth_system::projection::{ProjectionConfig, ProjectionEngine};
use networth_system::store::{RecordStore, StoreError, UserId};
use networth_system::{Assumptions, Holding, PriceProvider};

type SharedStore = Arc<RwLock<RecordStore>>;

#[derive(Debug, Deserialize)]
struct LoginIn {
    username: String,
}

#[derive(Debug, Serialize)]
struct TokenOut {
    token: String,
}

/// Flat holding payload, converted to the domain enum at this edge
#[derive(Debug, Deserialize)]
struct HoldingIn {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    units: f64,
    #[serde(default)]
    price: f64,
    #[serde(default = "default_cagr")]
    cagr: f64,
    #[serde(default)]
    monthly_contrib: f64,
}

fn default_cagr() -> f64 {
    7.0
}

impl HoldingIn {
    /// A CAGR of exactly 0 means "use the assumptions default"
    fn into_holding(self) -> Result<Holding, String> {
        let cagr = (self.cagr != 0.0).then_some(self.cagr);
        match self.kind.as_str() {
            "cash" => Ok(Holding::Cash {
                name: self.name,
                amount: self.units,
                monthly_contribution: self.monthly_contrib,
            }),
            "ticker" => Ok(Holding::Ticker {
                name: self.name,
                units: self.units,
                price: self.price,
                cagr,
                monthly_contribution: self.monthly_contrib,
            }),
            "cagr" => Ok(Holding::FixedGrowth {
                name: self.name,
                current_value: self.units,
                cagr,
                monthly_contribution: self.monthly_contrib,
            }),
            other => Err(format!("Unknown holding type: {other}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct PriceRefreshOut {
    updated: u32,
    failed: u32,
}

#[derive(Debug, Serialize)]
struct DeleteOut {
    ok: bool,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response<T: Serialize>(body: &T) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn store_error_response(err: StoreError) -> Response<Body> {
    let status = match err {
        StoreError::InvalidToken => 401,
        StoreError::UserNotFound | StoreError::HoldingNotFound | StoreError::NoProjection => 404,
    };
    error_response(status, &err.to_string())
}

fn body_string(event: &Request) -> String {
    match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    }
}

fn bearer_token(event: &Request) -> Option<String> {
    event
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn authenticate(store: &SharedStore, event: &Request) -> Result<UserId, Response<Body>> {
    let token = bearer_token(event).ok_or_else(|| error_response(401, "Missing auth"))?;
    store
        .read()
        .await
        .user_for_token(&token)
        .map_err(store_error_response)
}

async fn handle_login(store: &SharedStore, event: &Request) -> Response<Body> {
    let input: LoginIn = match serde_json::from_str(&body_string(event)) {
        Ok(v) => v,
        Err(e) => return error_response(400, &format!("Invalid JSON: {e}")),
    };
    let username = input.username.trim().to_string();
    if username.is_empty() {
        return error_response(400, "Username required");
    }

    let (token, _) = store.write().await.login(&username);
    info!("login user={}", username);
    json_response(&TokenOut { token })
}

async fn handle_get_assumptions(store: &SharedStore, user: UserId) -> Response<Body> {
    match store.read().await.assumptions(user) {
        Ok(asm) => json_response(asm),
        Err(e) => store_error_response(e),
    }
}

async fn handle_put_assumptions(
    store: &SharedStore,
    user: UserId,
    event: &Request,
) -> Response<Body> {
    let assumptions: Assumptions = match serde_json::from_str(&body_string(event)) {
        Ok(v) => v,
        Err(e) => return error_response(400, &format!("Invalid JSON: {e}")),
    };

    let mut guard = store.write().await;
    if let Err(e) = guard.set_assumptions(user, assumptions) {
        return store_error_response(e);
    }
    info!("assumptions.update user_id={}", user);
    match guard.assumptions(user) {
        Ok(asm) => json_response(asm),
        Err(e) => store_error_response(e),
    }
}

async fn handle_list_holdings(store: &SharedStore, user: UserId) -> Response<Body> {
    json_response(&store.read().await.holdings(user))
}

async fn handle_create_holding(
    store: &SharedStore,
    user: UserId,
    event: &Request,
) -> Response<Body> {
    let input: HoldingIn = match serde_json::from_str(&body_string(event)) {
        Ok(v) => v,
        Err(e) => return error_response(400, &format!("Invalid JSON: {e}")),
    };
    let holding = match input.into_holding() {
        Ok(h) => h,
        Err(msg) => return error_response(400, &msg),
    };

    let record = store.write().await.add_holding(user, holding);
    info!(
        "holding.create user_id={} id={} name={}",
        user,
        record.id,
        record.holding.name()
    );
    json_response(&record)
}

async fn handle_update_holding(
    store: &SharedStore,
    user: UserId,
    id: u64,
    event: &Request,
) -> Response<Body> {
    let input: HoldingIn = match serde_json::from_str(&body_string(event)) {
        Ok(v) => v,
        Err(e) => return error_response(400, &format!("Invalid JSON: {e}")),
    };
    let holding = match input.into_holding() {
        Ok(h) => h,
        Err(msg) => return error_response(400, &msg),
    };

    match store.write().await.update_holding(user, id, holding) {
        Ok(record) => {
            info!("holding.update user_id={} id={}", user, id);
            json_response(&record)
        }
        Err(e) => store_error_response(e),
    }
}

async fn handle_delete_holding(store: &SharedStore, user: UserId, id: u64) -> Response<Body> {
    match store.write().await.delete_holding(user, id) {
        Ok(()) => {
            info!("holding.delete user_id={} id={}", user, id);
            json_response(&DeleteOut { ok: true })
        }
        Err(e) => store_error_response(e),
    }
}

async fn handle_refresh_prices(
    store: &SharedStore,
    client: &reqwest::Client,
    user: UserId,
) -> Response<Body> {
    // Snapshot what the batch needs, then drop the lock across the fetches
    let (provider, api_key, tickers) = {
        let guard = store.read().await;
        let asm = match guard.assumptions(user) {
            Ok(asm) => asm,
            Err(e) => return store_error_response(e),
        };
        let api_key = if asm.alpha_key.is_empty() {
            std::env::var("ALPHA_VANTAGE_KEY").unwrap_or_default()
        } else {
            asm.alpha_key.clone()
        };
        (asm.price_provider, api_key, guard.ticker_symbols(user))
    };

    if provider == PriceProvider::None {
        return error_response(400, "No price provider configured");
    }

    let outcome = pricing::refresh_all(client, provider, &api_key, &tickers).await;

    let updated = outcome.updated.len() as u32;
    {
        let mut guard = store.write().await;
        for (ticker, quote) in &outcome.updated {
            guard.upsert_price(user, ticker, quote.price, &quote.source);
        }
    }

    info!(
        "price.refresh user_id={} ok={} fail={}",
        user, updated, outcome.failed
    );
    json_response(&PriceRefreshOut {
        updated,
        failed: outcome.failed,
    })
}

async fn handle_run_projection(store: &SharedStore, user: UserId) -> Response<Body> {
    // Consistent snapshot of assumptions, holdings, and cached prices
    let (assumptions, holdings, price_map) = {
        let guard = store.read().await;
        let asm = match guard.assumptions(user) {
            Ok(asm) => asm.clone(),
            Err(e) => return store_error_response(e),
        };
        let holdings: Vec<Holding> = guard
            .holdings(user)
            .iter()
            .map(|r| r.holding.clone())
            .collect();
        (asm, holdings, guard.price_map(user))
    };

    let engine = ProjectionEngine::new(assumptions, ProjectionConfig::default());
    let today = chrono::Utc::now().date_naive();
    let result = engine.project(&holdings, &price_map, today);

    store.write().await.save_projection(user, &result);

    info!(
        "projection.run user_id={} days={:?} start={:.2}",
        user, result.days_to_target, result.start_total
    );
    json_response(&result)
}

async fn handle_latest_projection(store: &SharedStore, user: UserId) -> Response<Body> {
    match store.read().await.latest_projection(user) {
        Ok(stored) => json_response(stored),
        Err(e) => store_error_response(e),
    }
}

async fn handler(
    event: Request,
    store: SharedStore,
    client: reqwest::Client,
) -> Result<Response<Body>, Error> {
    // CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
            .body(Body::Empty)
            .unwrap());
    }

    let method = event.method().as_str().to_string();
    let path = event.uri().path().to_string();

    if method == "POST" && path == "/auth/login" {
        return Ok(handle_login(&store, &event).await);
    }

    // Everything else requires a valid session
    let user = match authenticate(&store, &event).await {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let response = match (method.as_str(), path.as_str()) {
        ("GET", "/assumptions") => handle_get_assumptions(&store, user).await,
        ("PUT", "/assumptions") => handle_put_assumptions(&store, user, &event).await,
        ("GET", "/holdings") => handle_list_holdings(&store, user).await,
        ("POST", "/holdings") => handle_create_holding(&store, user, &event).await,
        ("POST", "/prices/refresh") => handle_refresh_prices(&store, &client, user).await,
        ("POST", "/projections/run") => handle_run_projection(&store, user).await,
        ("GET", "/projections/latest") => handle_latest_projection(&store, user).await,
        (m, p) if p.starts_with("/holdings/") => {
            match p.trim_start_matches("/holdings/").parse::<u64>() {
                Ok(id) if m == "PUT" => handle_update_holding(&store, user, id, &event).await,
                Ok(id) if m == "DELETE" => handle_delete_holding(&store, user, id).await,
                Ok(_) => error_response(404, "Not found"),
                Err(_) => error_response(400, "Invalid holding id"),
            }
        }
        _ => error_response(404, "Not found"),
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let store: SharedStore = Arc::new(RwLock::new(RecordStore::new()));
    let client = reqwest::Client::new();

    run(service_fn(move |event| {
        let store = store.clone();
        let client = client.clone();
        async move { handler(event, store, client).await }
    }))
    .await
}
