use blossom::{client, config::Config};
use dioxus_logger::tracing::{self, Level};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    dotenvy::dotenv().ok();

    #[cfg(target_arch = "wasm32")]
    let config = Config::from_build_env();
    #[cfg(not(target_arch = "wasm32"))]
    let config = Config::from_env();

    let level = config.as_ref().map(|c| c.log_level).unwrap_or(Level::INFO);
    dioxus_logger::init(level).ok();

    match config {
        Ok(config) => {
            tracing::info!("Starting dashboard against {}", config.api_url);
            dioxus::LaunchBuilder::new()
                .with_context(config)
                .launch(client::App);
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            dioxus::launch(client::ConfigErrorApp);
        }
    }
}
