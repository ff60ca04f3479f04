use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use log::{error, info};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::model::{Brand, BrandRef, Category, CategoryRef, Product};
use crate::store::traits::CatalogStore;

/// Tables emptied by `clear_tables`, dependents first
const CLEAR_ORDER: [&str; 3] = ["product", "brand", "category"];

/// Where a connection points, without the password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub username: String,
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
}

impl From<&PgConnectOptions> for ConnectionTarget {
    fn from(options: &PgConnectOptions) -> Self {
        Self {
            username: options.get_username().to_string(),
            host: options.get_host().to_string(),
            port: options.get_port(),
            database: options.get_database().map(str::to_string),
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.username, self.host, self.port)?;
        if let Some(database) = &self.database {
            write!(f, "/{}", database)?;
        }
        Ok(())
    }
}

/// Single PostgreSQL connection used for the whole seeding run
#[derive(Debug)]
pub struct PostgresStore {
    conn: Option<PgConnection>,
    target: ConnectionTarget,
}

impl PostgresStore {
    /// Open one connection to the database at `database_url`. Does not retry.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .context("Invalid PostgreSQL connection string")?;
        Self::connect_with(&options).await
    }

    pub async fn connect_with(options: &PgConnectOptions) -> Result<Self> {
        let target = ConnectionTarget::from(options);
        let conn = PgConnection::connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to PostgreSQL at {}", target))?;

        Ok(Self {
            conn: Some(conn),
            target,
        })
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.conn
            .as_mut()
            .context("PostgreSQL connection is already closed")
    }
}

/// Connect to `database_url`, logging troubleshooting hints on failure.
///
/// Returns `None` when the database cannot be reached; nothing downstream
/// can run without a connection, so callers must stop there.
pub async fn open_connection(database_url: &str) -> Option<PostgresStore> {
    let options = match PgConnectOptions::from_str(database_url) {
        Ok(options) => options,
        Err(e) => {
            error!("Invalid database connection string: {}", e);
            log_connection_hints(None);
            return None;
        }
    };

    let target = ConnectionTarget::from(&options);
    info!("Attempting to connect to database at: {}", target);

    match PostgresStore::connect_with(&options).await {
        Ok(store) => {
            info!("Successfully connected to the database");
            Some(store)
        }
        Err(e) => {
            error!("Error connecting to the database: {:#}", e);
            error!("Connection target used: {}", target);
            log_connection_hints(Some(&target));
            None
        }
    }
}

fn log_connection_hints(target: Option<&ConnectionTarget>) {
    let database = target
        .and_then(|t| t.database.as_deref())
        .unwrap_or("shop");
    let port = target
        .map(|t| t.port.to_string())
        .unwrap_or_else(|| "5433".to_string());

    error!("Please verify that:");
    error!("1. PostgreSQL is running");
    error!("2. The connection details in your .env file or config are correct");
    error!(
        "3. The database '{}' exists and the user has proper permissions",
        database
    );
    error!(
        "4. The port number is correct (tried {}; docker-compose maps 5433 by default)",
        port
    );
    error!("5. If using Docker, the container is running (check with 'docker ps')");
}

#[async_trait::async_trait]
impl CatalogStore for PostgresStore {
    async fn clear_tables(&mut self) -> Result<()> {
        let mut tx = self
            .conn()?
            .begin()
            .await
            .context("Failed to start clear transaction")?;

        // Suspends FK triggers; SET LOCAL reverts when the transaction ends
        sqlx::query("SET LOCAL session_replication_role = 'replica'")
            .execute(&mut *tx)
            .await
            .context("Failed to suspend referential integrity checks")?;

        for table in CLEAR_ORDER {
            let statement = format!("TRUNCATE TABLE {} CASCADE", table);
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to truncate table {}", table))?;
            info!("Cleared table: {}", table);
        }

        tx.commit().await.context("Failed to commit table clear")?;

        Ok(())
    }

    async fn insert_brands(&mut self, brands: &[Brand]) -> Result<u64> {
        let mut tx = self
            .conn()?
            .begin()
            .await
            .context("Failed to start brand transaction")?;

        let mut inserted = 0;
        for brand in brands {
            let result = sqlx::query(
                "INSERT INTO brand (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
            )
            .bind(brand.id)
            .bind(&brand.name)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert brand {} ({})", brand.id, brand.name))?;
            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit brands")?;

        Ok(inserted)
    }

    async fn insert_categories(&mut self, categories: &[Category]) -> Result<u64> {
        let mut tx = self
            .conn()?
            .begin()
            .await
            .context("Failed to start category transaction")?;

        let mut inserted = 0;
        for category in categories {
            let result = sqlx::query(
                r#"
                INSERT INTO category (id, display_text, description)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(category.id)
            .bind(&category.display_text)
            .bind(&category.description)
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!(
                    "Failed to insert category {} ({})",
                    category.id, category.display_text
                )
            })?;
            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit categories")?;

        Ok(inserted)
    }

    async fn fetch_category_refs(&mut self) -> Result<Vec<CategoryRef>> {
        sqlx::query_as::<_, CategoryRef>("SELECT id, display_text FROM category ORDER BY id")
            .fetch_all(self.conn()?)
            .await
            .context("Failed to fetch categories")
    }

    async fn fetch_brand_refs(&mut self) -> Result<Vec<BrandRef>> {
        sqlx::query_as::<_, BrandRef>("SELECT id, name FROM brand ORDER BY id")
            .fetch_all(self.conn()?)
            .await
            .context("Failed to fetch brands")
    }

    async fn insert_products(&mut self, products: &[Product]) -> Result<u64> {
        let mut tx = self
            .conn()?
            .begin()
            .await
            .context("Failed to start product transaction")?;

        let mut inserted = 0;
        for product in products {
            let result = sqlx::query(
                r#"
                INSERT INTO product (id, name, description, sku, small_image, out_of_stock, category_id, brand_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.sku)
            .bind(&product.small_image)
            .bind(product.out_of_stock)
            .bind(product.category_id)
            .bind(product.brand_id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert product {}", product.id))?;
            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit product batch")?;

        Ok(inserted)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .context("Failed to close PostgreSQL connection")?;
        }
        Ok(())
    }
}
