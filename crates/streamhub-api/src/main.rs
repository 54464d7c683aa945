use streamhub_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Database, storage provider, host seed and routes. Any failure here aborts startup.
    let (_state, router) = streamhub_api::setup::initialize_app(config.clone()).await?;

    streamhub_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
