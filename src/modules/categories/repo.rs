use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::{Categorie, CategorieInput};

/// Persistence operations on the `categorie` table.
#[async_trait]
pub trait CategorieRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Categorie>>;

    async fn count(&self) -> anyhow::Result<i64>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Categorie>>;

    async fn insert(&self, input: &CategorieInput) -> anyhow::Result<Categorie>;

    async fn update(&self, id: i64, input: &CategorieInput) -> anyhow::Result<Option<Categorie>>;

    /// Fails while books still reference the category.
    async fn delete(&self, id: i64) -> anyhow::Result<Option<Categorie>>;
}

#[derive(Debug, Clone)]
pub struct SqliteCategorieRepository {
    pool: SqlitePool,
}

impl SqliteCategorieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategorieRepository for SqliteCategorieRepository {
    async fn list(&self) -> anyhow::Result<Vec<Categorie>> {
        sqlx::query_as::<_, Categorie>("SELECT id, libelle FROM categorie ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("failed to list categories")
    }

    async fn count(&self) -> anyhow::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM categorie")
            .fetch_one(&self.pool)
            .await
            .context("failed to count categories")
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Categorie>> {
        sqlx::query_as::<_, Categorie>("SELECT id, libelle FROM categorie WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to fetch categorie {id}"))
    }

    async fn insert(&self, input: &CategorieInput) -> anyhow::Result<Categorie> {
        let id = sqlx::query("INSERT INTO categorie (libelle) VALUES (?)")
            .bind(input.libelle.as_deref())
            .execute(&self.pool)
            .await
            .context("failed to insert categorie")?
            .last_insert_rowid();

        self.get(id)
            .await?
            .with_context(|| format!("categorie {id} vanished after insert"))
    }

    async fn update(&self, id: i64, input: &CategorieInput) -> anyhow::Result<Option<Categorie>> {
        let updated = sqlx::query("UPDATE categorie SET libelle = ? WHERE id = ?")
            .bind(input.libelle.as_deref())
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to update categorie {id}"))?
            .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Option<Categorie>> {
        // IMMEDIATE: the write lock is held before the read.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let Some(categorie) =
            sqlx::query_as::<_, Categorie>("SELECT id, libelle FROM categorie WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .with_context(|| format!("failed to fetch categorie {id}"))?
        else {
            return Ok(None);
        };

        // No cascade: the foreign key on livres.categorie_id rejects this
        // while books still reference the category.
        sqlx::query("DELETE FROM categorie WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("failed to delete categorie {id}"))?;
        tx.commit().await?;

        Ok(Some(categorie))
    }
}
