use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::{Livre, LivreInput};

const LIVRE_COLUMNS: &str = "id, isbn, titre, date_publication, auteur, editeur, categorie_id";

/// Persistence operations on the `livres` table.
#[async_trait]
pub trait LivreRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Livre>>;

    async fn count(&self) -> anyhow::Result<i64>;

    async fn get(&self, id: i64) -> anyhow::Result<Option<Livre>>;

    async fn insert(&self, input: &LivreInput) -> anyhow::Result<Livre>;

    /// Overwrites every column; `None` when no book has this id.
    async fn update(&self, id: i64, input: &LivreInput) -> anyhow::Result<Option<Livre>>;

    /// Returns the removed row, `None` when no book has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<Option<Livre>>;

    async fn list_by_categorie(&self, categorie_id: i64) -> anyhow::Result<Vec<Livre>>;
}

#[derive(Debug, Clone)]
pub struct SqliteLivreRepository {
    pool: SqlitePool,
}

impl SqliteLivreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// Inserts and updates go through `execute` so that constraint failures, including the
// statement-end foreign key check, surface as errors before anything is read.
#[async_trait]
impl LivreRepository for SqliteLivreRepository {
    async fn list(&self) -> anyhow::Result<Vec<Livre>> {
        let sql = format!("SELECT {LIVRE_COLUMNS} FROM livres ORDER BY id");
        sqlx::query_as::<_, Livre>(&sql)
            .fetch_all(self.pool())
            .await
            .context("failed to list livres")
    }

    async fn count(&self) -> anyhow::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM livres")
            .fetch_one(self.pool())
            .await
            .context("failed to count livres")
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Livre>> {
        let sql = format!("SELECT {LIVRE_COLUMNS} FROM livres WHERE id = ?");
        sqlx::query_as::<_, Livre>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .with_context(|| format!("failed to fetch livre {id}"))
    }

    async fn insert(&self, input: &LivreInput) -> anyhow::Result<Livre> {
        let id = sqlx::query(
            r#"
            INSERT INTO livres (isbn, titre, date_publication, auteur, editeur, categorie_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.isbn.as_deref())
        .bind(input.titre.as_deref())
        .bind(input.date_publication.as_deref())
        .bind(input.auteur.as_deref())
        .bind(input.editeur.as_deref())
        .bind(input.categorie_id)
        .execute(self.pool())
        .await
        .context("failed to insert livre")?
        .last_insert_rowid();

        tracing::debug!(id, "livre inserted");
        self.get(id)
            .await?
            .with_context(|| format!("livre {id} vanished after insert"))
    }

    async fn update(&self, id: i64, input: &LivreInput) -> anyhow::Result<Option<Livre>> {
        let updated = sqlx::query(
            r#"
            UPDATE livres
            SET isbn = ?, titre = ?, date_publication = ?, auteur = ?, editeur = ?, categorie_id = ?
            WHERE id = ?
            "#,
        )
        .bind(input.isbn.as_deref())
        .bind(input.titre.as_deref())
        .bind(input.date_publication.as_deref())
        .bind(input.auteur.as_deref())
        .bind(input.editeur.as_deref())
        .bind(input.categorie_id)
        .bind(id)
        .execute(self.pool())
        .await
        .with_context(|| format!("failed to update livre {id}"))?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> anyhow::Result<Option<Livre>> {
        // Single statement: the write lock is taken before the row is read.
        let sql = format!("DELETE FROM livres WHERE id = ? RETURNING {LIVRE_COLUMNS}");
        sqlx::query_as::<_, Livre>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .with_context(|| format!("failed to delete livre {id}"))
    }

    async fn list_by_categorie(&self, categorie_id: i64) -> anyhow::Result<Vec<Livre>> {
        let sql = format!("SELECT {LIVRE_COLUMNS} FROM livres WHERE categorie_id = ? ORDER BY id");
        sqlx::query_as::<_, Livre>(&sql)
            .bind(categorie_id)
            .fetch_all(self.pool())
            .await
            .with_context(|| format!("failed to list livres of categorie {categorie_id}"))
    }
}
