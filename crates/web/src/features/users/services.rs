use sqlx::PgPool;
use storage::{error::Result, models::User, repository::user::UserRepository};

pub async fn list_users(pool: &PgPool) -> Result<Vec<User>> {
    UserRepository::new(pool).list().await
}

pub async fn get_user(pool: &PgPool, id: i64) -> Result<User> {
    UserRepository::new(pool).find_by_id(id).await
}
