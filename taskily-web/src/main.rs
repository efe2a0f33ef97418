//! Taskily web server binary
//!
//! Carga la configuración, conecta a PostgreSQL, corre las migraciones y
//! sirve la aplicación.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskily_shared::db::{migrations::run_migrations, pool::create_pool, pool::DatabaseConfig};
use taskily_web::{
    app::{build_router, AppState},
    config::Config,
    mail::Correo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskily_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let correo = Correo::desde_config(&config.smtp)?;

    let addr = config.bind_address();
    let state = AppState::new(pool, config, correo);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Taskily escuchando");

    axum::serve(listener, router).await?;

    Ok(())
}
