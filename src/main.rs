use log::info;
use shop_seed::config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    shop_seed::init_logging();
    info!("Starting database population...");

    let config = AppConfig::load()?;
    shop_seed::run(&config).await?;

    Ok(())
}
