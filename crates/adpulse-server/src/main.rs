mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = adpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = adpulse_core::load_catalog(&config.metrics_path)?;
    let client_config = adpulse_meta::MetaClientConfig::from_app_config(&config);
    let insights = adpulse_meta::MetaClient::with_base_url(&client_config, &config.meta_base_url)?;

    let auth = AuthState::from_env(matches!(config.env, adpulse_core::Environment::Development))?;
    let app = build_app(
        AppState {
            insights: Arc::new(insights),
            catalog: Arc::new(catalog),
        },
        auth,
        default_rate_limit_state(),
    );

    tracing::info!(
        addr = %config.bind_addr,
        account = %config.meta_ad_account_id,
        "starting adpulse server"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
