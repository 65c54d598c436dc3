use super::IUserRepo;
use agenda_domain::{User, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Option<User> {
        let query = format!("SELECT * FROM users WHERE {} = $1", column);
        match sqlx::query_as::<_, UserRaw>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to query users by {}: {:?}", column, e);
                None
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    username: String,
    email: String,
    api_token: String,
    created: DateTime<Utc>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            username: raw.username,
            email: raw.email,
            api_token: raw.api_token,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, username, email, api_token, created)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.api_token)
        .bind(user.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        match sqlx::query_as::<_, UserRaw>("SELECT * FROM users WHERE user_uid = $1")
            .bind(user_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
        {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user {}: {:?}", user_id, e);
                None
            }
        }
    }

    async fn find_by_api_token(&self, api_token: &str) -> Option<User> {
        if api_token.is_empty() {
            return None;
        }
        self.find_one("api_token", api_token).await
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        self.find_one("email", &User::normalize_email(email)).await
    }
}
