use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for a repair crew member
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
}
