use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use leavehub::config::Config;
use leavehub::docs::ApiDoc;
use leavehub::store::memory::InMemoryStore;
use leavehub::store::mysql::MySqlStore;
use leavehub::store::{EmployeeDirectory, LeaveLedger};
use leavehub::{AppState, routes};

#[get("/")]
async fn index() -> impl Responder {
    "LeaveHub is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .pretty()
        .init();

    info!("Server starting...");

    let (directory, ledger): (Arc<dyn EmployeeDirectory>, Arc<dyn LeaveLedger>) =
        match &config.database_url {
            Some(url) => {
                let store = Arc::new(MySqlStore::connect(url).await?);
                (store.clone(), store)
            }
            None => {
                warn!("DATABASE_URL not set; falling back to the in-memory store");
                let store = Arc::new(InMemoryStore::new());
                (store.clone(), store)
            }
        };

    let state = Data::new(AppState::new(directory, ledger));
    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
