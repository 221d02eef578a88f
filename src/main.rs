use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use intent_dispatch::config::{LogFormat, LoggingSettings, Settings};
use intent_dispatch::routes::{self, execute::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting intent dispatch service...");

    let app_state = AppState::from_settings(&settings.dispatch);

    info!(
        "Dispatcher initialized: intents={:?}, strict_anchor={}, free_text_fields={}, no_match_status={}, arguments_format={:?}",
        app_state.dispatcher.intents().collect::<Vec<_>>(),
        settings.dispatch.matching.strict_anchor,
        settings.dispatch.matching.free_text_fields,
        app_state.no_match.status().as_u16(),
        app_state.arguments_format,
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
