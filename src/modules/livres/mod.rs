pub mod models;
pub mod repo;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use biblio_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use repo::{LivreRepository, SqliteLivreRepository};
use routes::SharedLivres;

/// Books module: `/livres` CRUD over the `livres` table
pub struct LivresModule {
    repo: SharedLivres,
}

impl LivresModule {
    pub fn new(repo: SharedLivres) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Module for LivresModule {
    fn name(&self) -> &'static str {
        "livres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let total_livres = self.repo.count().await?;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            total_livres,
            "livres module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repo.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({
            "description": "Error",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                }
            }
        });
        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        }]);
        let livre_input_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/LivreInput" }
                }
            }
        });
        let list_response = json!({
            "200": {
                "description": "All books with their count",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/LivreList" }
                    }
                }
            },
            "500": error
        });

        Some(json!({
            "paths": {
                "/livres": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Livres"],
                        "responses": list_response
                    },
                    "post": {
                        "summary": "Create a book and return the updated list",
                        "tags": ["Livres"],
                        "requestBody": livre_input_body,
                        "responses": {
                            "200": list_response["200"],
                            "400": error,
                            "500": error
                        }
                    }
                },
                "/livres/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Livres"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "The selected book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "success": { "type": "boolean" },
                                                "selected_id": { "type": "integer" },
                                                "livre": { "$ref": "#/components/schemas/Livre" }
                                            }
                                        }
                                    }
                                }
                            },
                            "404": error
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Livres"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "The removed book and the remaining count",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "success": { "type": "boolean" },
                                                "id": { "type": "integer" },
                                                "livre": { "$ref": "#/components/schemas/Livre" },
                                                "total_livres": { "type": "integer" }
                                            }
                                        }
                                    }
                                }
                            },
                            "404": error
                        }
                    },
                    "patch": {
                        "summary": "Overwrite every field of a book",
                        "tags": ["Livres"],
                        "parameters": id_param,
                        "requestBody": livre_input_body,
                        "responses": {
                            "200": {
                                "description": "The updated book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "success": { "type": "boolean" },
                                                "updated_id": { "type": "integer" },
                                                "livre": { "$ref": "#/components/schemas/Livre" }
                                            }
                                        }
                                    }
                                }
                            },
                            "400": error,
                            "404": error,
                            "500": error
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Livre": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "isbn": { "type": "string" },
                            "titre": { "type": ["string", "null"] },
                            "date_publication": { "type": "string" },
                            "auteur": { "type": "string" },
                            "editeur": { "type": "string" },
                            "categorie_id": { "type": "integer" }
                        },
                        "required": ["id", "isbn", "date_publication", "auteur", "editeur", "categorie_id"]
                    },
                    "LivreInput": {
                        "type": "object",
                        "properties": {
                            "isbn": { "type": "string" },
                            "titre": { "type": "string" },
                            "date_publication": { "type": "string" },
                            "auteur": { "type": "string" },
                            "editeur": { "type": "string" },
                            "categorie_id": { "type": "integer" }
                        }
                    },
                    "LivreList": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "total_livres": { "type": "integer" },
                            "livres": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Livre" }
                            }
                        }
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS livres (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    isbn             TEXT NOT NULL UNIQUE CHECK (length(isbn) <= 20),
                    titre            TEXT,
                    date_publication TEXT NOT NULL CHECK (length(date_publication) <= 30),
                    auteur           TEXT NOT NULL CHECK (length(auteur) <= 100),
                    editeur          TEXT NOT NULL CHECK (length(editeur) <= 100),
                    categorie_id     INTEGER NOT NULL REFERENCES categorie (id)
                );
                CREATE INDEX IF NOT EXISTS livres_categorie_id ON livres (categorie_id);
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "livres module stopped");
        Ok(())
    }
}

/// Create the books module over a connection pool
pub fn create_module(pool: sqlx::SqlitePool) -> Arc<dyn Module> {
    let repo: Arc<dyn LivreRepository> = Arc::new(SqliteLivreRepository::new(pool));
    Arc::new(LivresModule::new(repo))
}
