use anyhow::Context;
use dotenvy::dotenv;
use huquq_llm::LLMClient;
use portal_service::{app_module::AppState, app_router::build_app, core::app::Settings};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

fn init_tracing(is_dev: bool) -> anyhow::Result<()> {
    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    if is_dev {
        tracing::subscriber::set_global_default(subscriber_builder.pretty().with_ansi(true).finish())
            .context("setting dev subscriber failed")?;
    } else {
        tracing::subscriber::set_global_default(subscriber_builder.json().with_ansi(false).finish())
            .context("setting prod subscriber failed")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let settings = Settings::from_env().context("invalid configuration")?;
    init_tracing(settings.is_dev())?;

    if !settings.provider.has_credential() {
        tracing::warn!(
            provider = settings.provider.name(),
            "No API credential configured; generation requests will return fallbacks"
        );
    }

    let llm_client = LLMClient::new(settings.provider.clone(), Some(settings.llm.clone()));
    let state = AppState::new(llm_client);
    let app = build_app(state, settings.request_timeout());

    let address = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("unable to bind {}", address))?;

    tracing::info!(
        provider = settings.provider.name(),
        timeout = ?settings.llm.timeout,
        "Server started, listening on {}",
        address
    );
    axum::serve(listener, app).await.context("server terminated")?;

    Ok(())
}
