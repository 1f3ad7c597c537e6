use serde::{Deserialize, Serialize};

use crate::modules::livres::models::Livre;

/// Classification label referenced by books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Categorie {
    pub id: i64,
    pub libelle: String,
}

/// Request body for creating or renaming a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorieInput {
    pub libelle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategorieList {
    pub success: bool,
    pub total_categories: i64,
    pub categories: Vec<Categorie>,
}

#[derive(Debug, Serialize)]
pub struct SelectedCategorie {
    pub success: bool,
    pub selected_id: i64,
    pub categorie: Categorie,
}

#[derive(Debug, Serialize)]
pub struct DeletedCategorie {
    pub success: bool,
    pub id: i64,
    pub categorie: Categorie,
    pub total_categories: i64,
}

#[derive(Debug, Serialize)]
pub struct UpdatedCategorie {
    pub success: bool,
    pub updated_id: i64,
    pub categorie: Categorie,
}

/// `GET /categories/{id}/livres`
#[derive(Debug, Serialize)]
pub struct CategorieLivres {
    pub success: bool,
    pub categorie_id: i64,
    pub total_livres: usize,
    pub livres: Vec<Livre>,
}
