use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::balance::balances_per_currency;
use crate::conversion::CurrencyConverter;
use crate::exchange::{aggregate_debts, simplify_per_currency, simplify_to_currency};
use crate::schemas::{Currency, Debt, Trip};
use crate::view::{settlement_view, SettlementMode};

pub struct AppState {
    pub converter: Arc<dyn CurrencyConverter>,
}

#[derive(Deserialize, Serialize)]
pub struct DebtsJson {
    pub debts: Vec<Debt>,
}

#[derive(Deserialize, Serialize)]
pub struct SettlementRequest {
    pub trip: Trip,
    pub mode: SettlementMode,
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

#[post("/debts/aggregate")]
async fn aggregate(json: web::Json<DebtsJson>) -> HttpResponse {
    HttpResponse::Ok().json(aggregate_debts(&json.debts))
}

#[post("/debts/simplify")]
async fn simplify(json: web::Json<DebtsJson>) -> HttpResponse {
    HttpResponse::Ok().json(simplify_per_currency(&json.debts))
}

#[post("/debts/convert/{currency}")]
async fn convert(
    state: web::Data<AppState>,
    currency: web::Path<String>,
    json: web::Json<DebtsJson>,
) -> HttpResponse {
    let target = match currency.parse::<Currency>() {
        Ok(target) => target,
        Err(err) => return HttpResponse::BadRequest().body(err.to_string()),
    };
    match simplify_to_currency(&json.debts, &target, state.converter.as_ref()).await {
        Ok(settled) => HttpResponse::Ok().json(settled),
        Err(err) => {
            warn!(%target, error = %err, "conversion failed");
            HttpResponse::BadGateway().body(err.to_string())
        }
    }
}

#[post("/trips/balance")]
async fn trip_balance(trip: web::Json<Trip>) -> HttpResponse {
    HttpResponse::Ok().json(balances_per_currency(&trip.debts()))
}

#[post("/trips/settlement")]
async fn trip_settlement(
    state: web::Data<AppState>,
    json: web::Json<SettlementRequest>,
) -> HttpResponse {
    let request = json.into_inner();
    let view = settlement_view(
        &request.trip.debts(),
        request.mode,
        &request.trip.currency,
        state.converter.as_ref(),
    )
    .await;
    HttpResponse::Ok().json(view)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(aggregate)
        .service(simplify)
        .service(convert)
        .service(trip_balance)
        .service(trip_settlement);
}
