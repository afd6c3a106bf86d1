use http::{HeaderValue, header};
use std::net::SocketAddr;
use std::sync::Arc;
use taskboard::{
    api::handlers::AppService,
    auth::api_key::ApiKey,
    build_router,
    config::CONFIG,
    constants::constants::API_KEY_HEADER,
    infrastructure::{
        logging::in_memory::InMemoryLogging, notify::in_memory::InMemoryNotifier, storage::in_memory::InMemoryStorage,
    },
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn allowed_origin(origin: &str) -> AllowOrigin {
    if origin == "*" {
        return AllowOrigin::from(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!("Ignoring invalid CORS_ALLOWED_ORIGIN {:?}, allowing any origin", origin);
            AllowOrigin::from(Any)
        }
    }
}

fn spawn_reminders(service: Arc<AppService>) {
    let Some(period) = CONFIG.reminder_interval else {
        info!("Deadline reminders disabled");
        return;
    };
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match service.check_deadlines(chrono::Utc::now()).await {
                Ok(sent) => info!(count = sent.len(), "Deadline check finished"),
                Err(e) => error!(error = %e, "Deadline check failed"),
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(config = ?*CONFIG, "Starting taskboard");

    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let notifier = InMemoryNotifier::new();
    let service = Arc::new(
        AppService::new(storage, logging, notifier).with_reminder_window_days(CONFIG.reminder_window_days),
    );
    spawn_reminders(service.clone());

    let api_key = CONFIG.api_key.as_deref().map(ApiKey::new);
    let app = build_router(service, api_key)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(CONFIG.request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin(&CONFIG.cors_allowed_origin))
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT, http::Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static(API_KEY_HEADER)]),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::new(CONFIG.host, CONFIG.port);
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
