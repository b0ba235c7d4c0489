use async_trait::async_trait;
use filmorate_model::User;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::{EntityStore, UserStorage};

const USER_COLUMNS: &str = "u.user_id, u.email, u.login, u.name, u.birth_date";

/// Postgres-backed implementation of the `UserStorage` port.
#[derive(Clone, Debug)]
pub struct PostgresUserStorage {
    pool: PgPool,
}

fn user_from_row(row: &PgRow) -> Result<User> {
    Ok(User {
        id: Some(row.try_get("user_id")?),
        email: row.try_get("email")?,
        login: row.try_get("login")?,
        name: row.try_get("name")?,
        birthday: row.try_get("birth_date")?,
        is_friend: None,
    })
}

fn friend_from_row(row: &PgRow) -> Result<User> {
    let mut user = user_from_row(row)?;
    user.is_friend = Some(row.try_get("is_friend")?);
    Ok(user)
}

impl PostgresUserStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<User> for PostgresUserStorage {
    async fn create(&self, user: User) -> Result<User> {
        let user_id: i32 = sqlx::query_scalar(
            "INSERT INTO film_user (email, login, name, birth_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING user_id",
        )
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id, login = %user.login, "created user");
        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| StoreError::Internal("created user vanished".to_string()))
    }

    async fn update(&self, user: User) -> Result<User> {
        let user_id = user.id.ok_or(StoreError::NotFound)?;
        let result = sqlx::query(
            "UPDATE film_user \
             SET email = $2, login = $3, name = $4, birth_date = $5 \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(&user.email)
        .bind(&user.login)
        .bind(&user.name)
        .bind(user.birthday)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        debug!(user_id, "updated user");
        self.get_by_id(user_id)
            .await?
            .ok_or_else(|| StoreError::Internal("updated user vanished".to_string()))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM film_user AS u WHERE u.user_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn delete(&self, id: i32) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM favorite_films WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM friendships WHERE user_left_id = $1 OR user_right_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM film_user WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(user_id = id, "deleted user, friendships and likes");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM film_user AS u ORDER BY u.user_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(user_from_row).collect()
    }
}

#[async_trait]
impl UserStorage for PostgresUserStorage {
    async fn add_friendship(&self, user_id: i32, friend_id: i32) -> Result<()> {
        sqlx::query(
            "INSERT INTO friendships (user_left_id, user_right_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_friendship(&self, user_id: i32, friend_id: i32) -> Result<()> {
        sqlx::query("DELETE FROM friendships WHERE user_left_id = $1 AND user_right_id = $2")
            .bind(user_id)
            .bind(friend_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn friends_of(&self, user_id: i32) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, \
             EXISTS (SELECT 1 FROM friendships AS r \
                     WHERE r.user_left_id = u.user_id AND r.user_right_id = $1) AS is_friend \
             FROM friendships AS f \
             JOIN film_user AS u ON u.user_id = f.user_right_id \
             WHERE f.user_left_id = $1 \
             ORDER BY u.user_id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(friend_from_row).collect()
    }

    async fn common_friends(&self, user_id: i32, other_id: i32) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS}, \
             EXISTS (SELECT 1 FROM friendships AS r \
                     WHERE r.user_left_id = u.user_id AND r.user_right_id = $1) AS is_friend \
             FROM film_user AS u \
             JOIN friendships AS a ON a.user_left_id = $1 AND a.user_right_id = u.user_id \
             JOIN friendships AS b ON b.user_left_id = $2 AND b.user_right_id = u.user_id \
             ORDER BY u.user_id"
        ))
        .bind(user_id)
        .bind(other_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(friend_from_row).collect()
    }
}
