pub mod config;
pub mod model;
pub mod seed;
pub mod store;

pub use model::*;
pub use seed::*;
pub use store::{open_connection, CatalogStore, MemoryStore, PostgresStore};

use crate::config::{AppConfig, SeedConfig};
use log::{error, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Log to stdout at info, sqlx at warn; `RUST_LOG` overrides both
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stdout)
        .try_init();
}

/// Connect, reset and seed the catalog, then close the connection
pub async fn run(config: &AppConfig) -> anyhow::Result<PopulationReport> {
    let database_url = config.database_url();
    let Some(mut store) = open_connection(&database_url).await else {
        anyhow::bail!("Failed to connect to the database");
    };

    let mut rng = match config.seed.rng_seed {
        Some(seed) => {
            info!("Using fixed random seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    run_with(&mut store, &mut rng, &config.seed)
        .await
        .map_err(|e| {
            error!("{}. Exiting...", e);
            anyhow::Error::from(e)
        })
}

/// Populate `store`, then close it whatever the outcome
pub async fn run_with<S: CatalogStore, R: Rng>(
    store: &mut S,
    rng: &mut R,
    config: &SeedConfig,
) -> Result<PopulationReport, SeedError> {
    let outcome = populate(store, rng, config).await;

    match store.close().await {
        Ok(()) => info!("Database connection closed."),
        Err(e) => warn!("{:#}", e),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_config() -> SeedConfig {
        SeedConfig {
            product_count: 30,
            batch_size: 10,
            rng_seed: Some(12),
        }
    }

    #[tokio::test]
    async fn test_run_with_closes_after_success() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(12);

        let report = run_with(&mut store, &mut rng, &seed_config()).await.unwrap();

        assert_eq!(report.products, 30);
        assert!(store.is_closed());
    }

    #[tokio::test]
    async fn test_run_with_closes_after_failed_clear() {
        let mut store = MemoryStore::new().with_failing_clear();
        let mut rng = StdRng::seed_from_u64(12);

        let result = run_with(&mut store, &mut rng, &seed_config()).await;

        assert!(matches!(result, Err(SeedError::Clear(_))));
        assert!(store.is_closed());
        assert!(store.brands().is_empty());
    }

    #[tokio::test]
    async fn test_run_with_closes_after_failed_stage() {
        let mut store = MemoryStore::new().with_failing_brands();
        let mut rng = StdRng::seed_from_u64(12);

        let report = run_with(&mut store, &mut rng, &seed_config()).await.unwrap();

        assert_eq!(
            report,
            PopulationReport {
                brands: 0,
                categories: 8,
                products: 0
            }
        );
        assert!(store.is_closed());
    }
}
