use serde::{Deserialize, Serialize};

/// A catalog entry for one bibliographic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Livre {
    /// Auto-assigned identifier
    pub id: i64,
    /// Unique ISBN
    pub isbn: String,
    pub titre: Option<String>,
    pub date_publication: String,
    pub auteur: String,
    pub editeur: String,
    /// Owning category (`categorie.id`)
    pub categorie_id: i64,
}

/// Request body for creating or overwriting a book.
///
/// Every field is optional on the wire; absent fields are written as `NULL`
/// and left for the store's constraints to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivreInput {
    pub isbn: Option<String>,
    pub titre: Option<String>,
    pub date_publication: Option<String>,
    pub auteur: Option<String>,
    pub editeur: Option<String>,
    pub categorie_id: Option<i64>,
}

/// `GET /livres` and `POST /livres`
#[derive(Debug, Serialize)]
pub struct LivreList {
    pub success: bool,
    pub total_livres: i64,
    pub livres: Vec<Livre>,
}

/// `GET /livres/{id}`
#[derive(Debug, Serialize)]
pub struct SelectedLivre {
    pub success: bool,
    pub selected_id: i64,
    pub livre: Livre,
}

/// `DELETE /livres/{id}`
#[derive(Debug, Serialize)]
pub struct DeletedLivre {
    pub success: bool,
    pub id: i64,
    pub livre: Livre,
    pub total_livres: i64,
}

/// `PATCH /livres/{id}`
#[derive(Debug, Serialize)]
pub struct UpdatedLivre {
    pub success: bool,
    pub updated_id: i64,
    pub livre: Livre,
}
