//! Verimail API server binary.
//!
//! Wires the verification services to their SMTP and in-memory store
//! implementations and serves the HTTP endpoints. Set `EMAIL_PROVIDER=mock`
//! to run without an SMTP server (codes are logged, not delivered).

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use log::info;

use verimail_api::app::configure_routes;
use verimail_api::middleware::cors::create_cors;
use verimail_api::state::AppState;
use verimail_core::services::verification::{EmailDispatcher, VerificationServiceConfig};
use verimail_infra::email::{MockMailer, SmtpMailer};
use verimail_infra::store::InMemoryVerificationStore;
use verimail_shared::config::server::ServerConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Verimail API server");

    let server_config = ServerConfig::from_env();
    let provider = std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "smtp".to_string());

    match provider.as_str() {
        "mock" => {
            info!("Using mock email dispatcher (EMAIL_PROVIDER=mock)");
            run(Arc::new(MockMailer::new()), server_config).await
        }
        _ => {
            let mailer = SmtpMailer::from_env()?;
            run(Arc::new(mailer), server_config).await
        }
    }
}

async fn run<E>(mailer: Arc<E>, server_config: ServerConfig) -> anyhow::Result<()>
where
    E: EmailDispatcher + 'static,
{
    let store = Arc::new(InMemoryVerificationStore::new());
    let state = web::Data::new(AppState::new(
        mailer,
        store,
        VerificationServiceConfig::default(),
    ));

    let bind_address = server_config.bind_address();
    info!("Server listening on {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(state.clone())
            .configure(configure_routes::<E, InMemoryVerificationStore>)
    })
    .bind(&bind_address)?;

    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server.run().await?;
    Ok(())
}
