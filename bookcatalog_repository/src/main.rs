use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use bookcatalog_repository::app_config::config_app;
use bookcatalog_repository::books_repository::{
    BookRepository, InMemoryBookRepository, PostgresBooksRepository,
    PostgresBooksRepositoryConfig,
};
use bookcatalog_repository::settings::Settings;
use bookcatalog_repository::telemetry::{init_telemetry, shutdown_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_telemetry(&settings.telemetry)?;

    let books_repository: Arc<dyn BookRepository> = if settings.database.use_in_memory {
        tracing::info!("Using in memory book repository");
        Arc::new(InMemoryBookRepository::default())
    } else {
        Arc::new(
            PostgresBooksRepository::init(PostgresBooksRepositoryConfig {
                connection_string: settings.database.connection_string.clone(),
            })
            .await
            .context("Failed to init postgres")?,
        )
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    tracing::info!("starting HTTP server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(books_repository.clone()))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(config_app)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await?;

    shutdown_telemetry();
    Ok(())
}
