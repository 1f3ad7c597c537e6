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

use super::models::{DeletedLivre, LivreInput, LivreList, SelectedLivre, UpdatedLivre};
use super::repo::LivreRepository;

pub type SharedLivres = Arc<dyn LivreRepository>;

/// HTTP routes for the books module
pub fn router(repo: SharedLivres) -> Router {
    Router::new()
        .route("/livres", get(list_livres).post(create_livre))
        .route("/livre", get(list_livres))
        .route(
            "/livres/{id}",
            get(get_livre).delete(delete_livre).patch(update_livre),
        )
        .with_state(repo)
}

/// Full listing with a fresh count; not atomic with a preceding write
async fn livre_list(repo: &dyn LivreRepository) -> anyhow::Result<LivreList> {
    let livres = repo.list().await?;
    let total_livres = repo.count().await?;
    Ok(LivreList {
        success: true,
        total_livres,
        livres,
    })
}

async fn list_livres(State(repo): State<SharedLivres>) -> Result<Json<LivreList>, AppError> {
    Ok(Json(livre_list(repo.as_ref()).await?))
}

async fn create_livre(
    State(repo): State<SharedLivres>,
    payload: Result<Json<LivreInput>, JsonRejection>,
) -> Result<Json<LivreList>, AppError> {
    let Json(input) = payload?;

    let livre = repo.insert(&input).await?;
    tracing::info!(id = livre.id, isbn = %livre.isbn, "livre created");

    Ok(Json(livre_list(repo.as_ref()).await?))
}

async fn get_livre(
    State(repo): State<SharedLivres>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SelectedLivre>, AppError> {
    let Path(id) = id?;

    let livre = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("livre {id}")))?;

    Ok(Json(SelectedLivre {
        success: true,
        selected_id: id,
        livre,
    }))
}

async fn delete_livre(
    State(repo): State<SharedLivres>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedLivre>, AppError> {
    let Path(id) = id?;

    let livre = repo
        .delete(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("livre {id}")))?;
    tracing::info!(id, isbn = %livre.isbn, "livre deleted");

    let total_livres = repo.count().await?;
    Ok(Json(DeletedLivre {
        success: true,
        id,
        livre,
        total_livres,
    }))
}

async fn update_livre(
    State(repo): State<SharedLivres>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<LivreInput>, JsonRejection>,
) -> Result<Json<UpdatedLivre>, AppError> {
    let Path(id) = id?;
    let Json(input) = payload?;

    let livre = repo
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(format!("livre {id}")))?;
    tracing::info!(id, "livre updated");

    Ok(Json(UpdatedLivre {
        success: true,
        updated_id: id,
        livre,
    }))
}
