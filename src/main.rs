use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tripsplit::routes::{configure, AppState};
use tripsplit::settings::Settings;

#[actix_web::main]
async fn main() -> Result<()> {
    let config_path = std::env::var("TRIPSPLIT_CONFIG").ok();
    let settings = Settings::load(config_path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rate_table = settings.rates.rate_table()?;
    info!(
        base = %rate_table.base(),
        rates = settings.rates.table.len(),
        "loaded exchange rates"
    );
    let state = web::Data::new(AppState {
        converter: Arc::new(rate_table),
    });

    let allow_any_origin = settings.server.allow_any_origin;
    let address = (settings.server.host.clone(), settings.server.port);
    info!(host = %address.0, port = address.1, "listening");

    HttpServer::new(move || {
        let cors = if allow_any_origin {
            Cors::permissive()
        } else {
            Cors::default()
        };
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(address)?
    .run()
    .await?;
    Ok(())
}
