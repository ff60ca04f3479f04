use log::{error, info, warn};
use rand::Rng;

use crate::config::SeedConfig;
use crate::seed::data;
use crate::seed::generator::{ProductFactory, References};
use crate::store::traits::CatalogStore;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to clear tables")]
    Clear(#[source] anyhow::Error),
    #[error("no rows found in table `{table}`; seed it before generating products")]
    MissingReferences { table: &'static str },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Rows actually written by each stage of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationReport {
    pub brands: u64,
    pub categories: u64,
    pub products: u64,
}

/// Empty all catalog tables. Destroys existing data.
pub async fn clear_tables<S: CatalogStore>(store: &mut S) -> Result<(), SeedError> {
    store.clear_tables().await.map_err(SeedError::Clear)?;
    info!("All tables have been cleared successfully.");
    Ok(())
}

/// Insert the brand catalog. Returns the number of new rows, 0 on failure.
pub async fn seed_brands<S: CatalogStore>(store: &mut S) -> u64 {
    let brands = data::brands();
    match store.insert_brands(&brands).await {
        Ok(inserted) => {
            info!("Inserted {} of {} brands.", inserted, brands.len());
            inserted
        }
        Err(e) => {
            error!("Error populating brands, batch rolled back: {:#}", e);
            0
        }
    }
}

/// Insert the category catalog. Returns the number of new rows, 0 on failure.
pub async fn seed_categories<S: CatalogStore>(store: &mut S) -> u64 {
    let categories = data::categories();
    match store.insert_categories(&categories).await {
        Ok(inserted) => {
            info!("Inserted {} of {} categories.", inserted, categories.len());
            inserted
        }
        Err(e) => {
            error!("Error populating categories, batch rolled back: {:#}", e);
            0
        }
    }
}

async fn load_references<S: CatalogStore>(store: &mut S) -> Result<References, SeedError> {
    let categories = store.fetch_category_refs().await?;
    let brands = store.fetch_brand_refs().await?;
    References::new(categories, brands)
}

/// Generate `count` products with ids `1..=count`, committing every
/// `batch_size` rows.
///
/// A failing batch is rolled back on its own; batches committed before it
/// stay in place and are what the returned count reports.
pub async fn seed_products<S: CatalogStore, R: Rng>(
    store: &mut S,
    rng: &mut R,
    count: u32,
    batch_size: usize,
) -> u64 {
    let references = match load_references(store).await {
        Ok(references) => references,
        Err(e) => {
            error!("Cannot generate products: {:#}", anyhow::Error::from(e));
            return 0;
        }
    };

    let count = i32::try_from(count).unwrap_or(i32::MAX);
    // Bounded by the rows to write so capacity never exceeds the run
    let batch_size = batch_size.clamp(1, count.max(1) as usize);
    let mut factory = ProductFactory::new(rng);
    let mut batch = Vec::with_capacity(batch_size);
    let mut committed = 0;

    for id in 1..=count {
        batch.push(factory.build(id, &references));
        if batch.len() < batch_size && id < count {
            continue;
        }

        match store.insert_products(&batch).await {
            Ok(inserted) => {
                committed += inserted;
                info!("Inserted {} products...", id);
            }
            Err(e) => {
                error!("Error populating products: {:#}", e);
                warn!(
                    "Rolled back products {}..={}; {} rows from earlier batches remain",
                    id - batch.len() as i32 + 1,
                    id,
                    committed
                );
                return committed;
            }
        }
        batch.clear();
    }

    info!("Inserted {} products.", committed);
    committed
}

/// Run the whole reset-and-seed pipeline against `store`.
///
/// Only a failed clear aborts the run. Each seeding stage handles its own
/// errors and reports zero rows instead.
pub async fn populate<S: CatalogStore, R: Rng>(
    store: &mut S,
    rng: &mut R,
    config: &SeedConfig,
) -> Result<PopulationReport, SeedError> {
    info!("Clearing existing data...");
    clear_tables(store).await?;

    let brands = seed_brands(store).await;
    let categories = seed_categories(store).await;
    let products = seed_products(store, rng, config.product_count, config.batch_size).await;

    let report = PopulationReport {
        brands,
        categories,
        products,
    };
    info!("- Database population completed!");
    info!("- Brands: {}", report.brands);
    info!("- Categories: {}", report.categories);
    info!("- Products: {}", report.products);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Brand;
    use crate::store::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(product_count: u32) -> SeedConfig {
        SeedConfig {
            product_count,
            batch_size: 10,
            rng_seed: Some(1),
        }
    }

    #[tokio::test]
    async fn test_populate_fills_all_tables() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        let report = populate(&mut store, &mut rng, &config(200)).await.unwrap();

        assert_eq!(
            report,
            PopulationReport {
                brands: 15,
                categories: 8,
                products: 200
            }
        );
        assert_eq!(
            store.brands().keys().copied().collect::<Vec<_>>(),
            (1..=15).collect::<Vec<_>>()
        );
        assert_eq!(
            store.categories().keys().copied().collect::<Vec<_>>(),
            (1..=8).collect::<Vec<_>>()
        );
        assert_eq!(
            store.products().keys().copied().collect::<Vec<_>>(),
            (1..=200).collect::<Vec<_>>()
        );
        for product in store.products().values() {
            assert!(store.categories().contains_key(&product.category_id));
            assert!(store.brands().contains_key(&product.brand_id));
        }
    }

    #[tokio::test]
    async fn test_populate_twice_gives_same_counts() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(5);

        let first = populate(&mut store, &mut rng, &config(50)).await.unwrap();
        let second = populate(&mut store, &mut rng, &config(50)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.products().len(), 50);
    }

    #[tokio::test]
    async fn test_reseeding_without_clear_skips_existing_rows() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(8);
        populate(&mut store, &mut rng, &config(20)).await.unwrap();
        let before = store.products().clone();

        assert_eq!(seed_brands(&mut store).await, 0);
        assert_eq!(seed_categories(&mut store).await, 0);
        assert_eq!(seed_products(&mut store, &mut rng, 20, 10).await, 0);
        assert_eq!(store.products(), &before);
    }

    #[tokio::test]
    async fn test_products_need_categories() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        seed_brands(&mut store).await;

        assert_eq!(seed_products(&mut store, &mut rng, 10, 10).await, 0);
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_products_need_brands() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        seed_categories(&mut store).await;

        assert_eq!(seed_products(&mut store, &mut rng, 10, 10).await, 0);
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_earlier_batches() {
        let mut store = MemoryStore::new().with_product_failure_after(25);
        let mut rng = StdRng::seed_from_u64(3);

        let report = populate(&mut store, &mut rng, &config(50)).await.unwrap();

        assert_eq!(report.products, 20);
        assert_eq!(
            store.products().keys().copied().collect::<Vec<_>>(),
            (1..=20).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_partial_last_batch_is_written() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(4);

        let report = populate(&mut store, &mut rng, &config(23)).await.unwrap();

        assert_eq!(report.products, 23);
        assert!(store.products().contains_key(&23));
    }

    #[tokio::test]
    async fn test_failed_clear_aborts_before_seeding() {
        let mut store = MemoryStore::new().with_failing_clear();
        store.insert_brands(&[Brand::new(1, "Legacy")]).await.unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let result = populate(&mut store, &mut rng, &config(10)).await;

        assert!(matches!(result, Err(SeedError::Clear(_))));
        assert_eq!(store.brands().len(), 1);
        assert_eq!(store.brands()[&1].name, "Legacy");
        assert!(store.categories().is_empty());
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn test_failed_brands_starve_products() {
        let mut store = MemoryStore::new().with_failing_brands();
        let mut rng = StdRng::seed_from_u64(7);

        let report = populate(&mut store, &mut rng, &config(10)).await.unwrap();

        assert_eq!(
            report,
            PopulationReport {
                brands: 0,
                categories: 8,
                products: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failed_categories_starve_products() {
        let mut store = MemoryStore::new().with_failing_categories();
        let mut rng = StdRng::seed_from_u64(7);

        let report = populate(&mut store, &mut rng, &config(10)).await.unwrap();

        assert_eq!(report.brands, 15);
        assert_eq!(report.categories, 0);
        assert_eq!(report.products, 0);
    }

    #[tokio::test]
    async fn test_zero_batch_size_still_progresses() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(9);
        seed_brands(&mut store).await;
        seed_categories(&mut store).await;

        assert_eq!(seed_products(&mut store, &mut rng, 5, 0).await, 5);
    }

    #[tokio::test]
    async fn test_oversized_batch_size_writes_single_batch() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(10);
        seed_brands(&mut store).await;
        seed_categories(&mut store).await;

        assert_eq!(seed_products(&mut store, &mut rng, 5, usize::MAX).await, 5);
        assert_eq!(store.products().len(), 5);
    }
}
