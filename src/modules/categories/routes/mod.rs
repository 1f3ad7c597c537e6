use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use biblio_http::error::AppError;

use super::models::{
    CategorieInput, CategorieList, CategorieLivres, DeletedCategorie, SelectedCategorie,
    UpdatedCategorie,
};
use super::repo::CategorieRepository;
use crate::modules::livres::repo::LivreRepository;

#[derive(Clone)]
pub struct CategoriesState {
    pub categories: Arc<dyn CategorieRepository>,
    pub livres: Arc<dyn LivreRepository>,
}

/// HTTP routes for the categories module
pub fn router(state: CategoriesState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_categorie))
        .route(
            "/categories/{id}",
            get(get_categorie)
                .delete(delete_categorie)
                .patch(update_categorie),
        )
        .route("/categories/{id}/livres", get(list_categorie_livres))
        .with_state(state)
}

async fn categorie_list(repo: &dyn CategorieRepository) -> anyhow::Result<CategorieList> {
    let categories = repo.list().await?;
    let total_categories = repo.count().await?;
    Ok(CategorieList {
        success: true,
        total_categories,
        categories,
    })
}

async fn list_categories(
    State(state): State<CategoriesState>,
) -> Result<Json<CategorieList>, AppError> {
    Ok(Json(categorie_list(state.categories.as_ref()).await?))
}

async fn create_categorie(
    State(state): State<CategoriesState>,
    payload: Result<Json<CategorieInput>, JsonRejection>,
) -> Result<Json<CategorieList>, AppError> {
    let Json(input) = payload?;

    let categorie = state.categories.insert(&input).await?;
    tracing::info!(id = categorie.id, libelle = %categorie.libelle, "categorie created");

    Ok(Json(categorie_list(state.categories.as_ref()).await?))
}

async fn get_categorie(
    State(state): State<CategoriesState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SelectedCategorie>, AppError> {
    let Path(id) = id?;

    let categorie = state
        .categories
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("categorie {id}")))?;

    Ok(Json(SelectedCategorie {
        success: true,
        selected_id: id,
        categorie,
    }))
}

async fn delete_categorie(
    State(state): State<CategoriesState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedCategorie>, AppError> {
    let Path(id) = id?;

    let categorie = state
        .categories
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("categorie {id}")))?;
    tracing::info!(id, "categorie deleted");

    let total_categories = state.categories.count().await?;
    Ok(Json(DeletedCategorie {
        success: true,
        id,
        categorie,
        total_categories,
    }))
}

async fn update_categorie(
    State(state): State<CategoriesState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CategorieInput>, JsonRejection>,
) -> Result<Json<UpdatedCategorie>, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;

    let categorie = state
        .categories
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("categorie {id}")))?;
    tracing::info!(id, "categorie updated");

    Ok(Json(UpdatedCategorie {
        success: true,
        updated_id: id,
        categorie,
    }))
}

async fn list_categorie_livres(
    State(state): State<CategoriesState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategorieLivres>, AppError> {
    let Path(id) = id?;

    if state.categories.get(id).await?.is_none() {
        return Err(AppError::not_found(format!("categorie {id}")));
    }

    let livres = state.livres.list_by_categorie(id).await?;
    Ok(Json(CategorieLivres {
        success: true,
        categorie_id: id,
        total_livres: livres.len(),
        livres,
    }))
}
