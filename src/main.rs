#[cfg(feature = "server")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_web::{web, App, HttpServer};
    use petreviews::api;
    use petreviews::config::Config;
    use petreviews::db::Database;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config = Config::load().map_err(std::io::Error::other)?;

    // Read the JSON documents once; handlers share this snapshot
    let db = Database::load(&config.db_dir)
        .await
        .map_err(std::io::Error::other)?;
    let db = web::Data::new(db);

    let addr = config.address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .configure(api::configure)
    })
    .bind(&addr)?;

    info!("Server running on {}", addr);
    server.run().await
}

#[cfg(not(feature = "server"))]
pub fn main() {
    // the binary is only the HTTP surface
    // build with `--features server` to run it
}
