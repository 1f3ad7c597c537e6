pub mod models;
pub mod repo;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use biblio_kernel::{InitCtx, Migration, Module};
use serde_json::json;

use crate::modules::livres::repo::SqliteLivreRepository;
use repo::SqliteCategorieRepository;
use routes::CategoriesState;

/// Categories module: `/categories` CRUD plus the books of one category
pub struct CategoriesModule {
    state: CategoriesState,
}

impl CategoriesModule {
    pub fn new(state: CategoriesState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for CategoriesModule {
    fn name(&self) -> &'static str {
        "categories"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let total_categories = self.state.categories.count().await?;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            total_categories,
            "categories module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
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
        let body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CategorieInput" }
                }
            }
        });
        let list_ok = json!({
            "description": "All categories with their count",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/CategorieList" }
                }
            }
        });
        let single_ok = |description: &str, id_field: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": {
                            "type": "object",
                            "properties": {
                                "success": { "type": "boolean" },
                                id_field: { "type": "integer" },
                                "categorie": { "$ref": "#/components/schemas/Categorie" }
                            }
                        }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/categories": {
                    "get": {
                        "summary": "List categories",
                        "tags": ["Categories"],
                        "responses": { "200": list_ok, "500": error }
                    },
                    "post": {
                        "summary": "Create a category and return the updated list",
                        "tags": ["Categories"],
                        "requestBody": body,
                        "responses": { "200": list_ok, "400": error, "500": error }
                    }
                },
                "/categories/{id}": {
                    "get": {
                        "summary": "Get a category",
                        "tags": ["Categories"],
                        "parameters": id_param,
                        "responses": {
                            "200": single_ok("The selected category", "selected_id"),
                            "404": error
                        }
                    },
                    "delete": {
                        "summary": "Delete a category no book references",
                        "tags": ["Categories"],
                        "parameters": id_param,
                        "responses": {
                            "200": single_ok("The removed category", "id"),
                            "404": error,
                            "500": error
                        }
                    },
                    "patch": {
                        "summary": "Rename a category",
                        "tags": ["Categories"],
                        "parameters": id_param,
                        "requestBody": body,
                        "responses": {
                            "200": single_ok("The updated category", "updated_id"),
                            "400": error,
                            "404": error,
                            "500": error
                        }
                    }
                },
                "/categories/{id}/livres": {
                    "get": {
                        "summary": "List the books of a category",
                        "tags": ["Categories"],
                        "parameters": id_param,
                        "responses": {
                            "200": {
                                "description": "Books referencing the category",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "success": { "type": "boolean" },
                                                "categorie_id": { "type": "integer" },
                                                "total_livres": { "type": "integer" },
                                                "livres": {
                                                    "type": "array",
                                                    "items": { "$ref": "#/components/schemas/Livre" }
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                            "404": error
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Categorie": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "libelle": { "type": "string" }
                        },
                        "required": ["id", "libelle"]
                    },
                    "CategorieInput": {
                        "type": "object",
                        "properties": {
                            "libelle": { "type": "string" }
                        }
                    },
                    "CategorieList": {
                        "type": "object",
                        "properties": {
                            "success": { "type": "boolean" },
                            "total_categories": { "type": "integer" },
                            "categories": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Categorie" }
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
                CREATE TABLE IF NOT EXISTS categorie (
                    id      INTEGER PRIMARY KEY AUTOINCREMENT,
                    libelle TEXT NOT NULL CHECK (length(libelle) <= 30)
                );
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "categories module stopped");
        Ok(())
    }
}

/// Create the categories module over a connection pool
pub fn create_module(pool: sqlx::SqlitePool) -> Arc<dyn Module> {
    let state = CategoriesState {
        categories: Arc::new(SqliteCategorieRepository::new(pool.clone())),
        livres: Arc::new(SqliteLivreRepository::new(pool)),
    };
    Arc::new(CategoriesModule::new(state))
}
