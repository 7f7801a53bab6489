use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub muscle_group: String,
}
