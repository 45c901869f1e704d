use aetherium_core::{
    DatastoreError, DatastoreProbe, Email, PasswordHash, RefreshTokenRecord, RefreshTokenStore,
    RefreshTokenStoreError, StoredUser, User, UserId, UserStore, UserStoreError,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError};
use uuid::Uuid;

/// Users and refresh tokens in PostgreSQL. Uniqueness of emails and tokens
/// is enforced by the schema, not by read-then-write checks.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_stored_user(self) -> Result<StoredUser, UserStoreError> {
        let email = Email::parse(Secret::new(self.email))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(StoredUser {
            user: User {
                id: UserId::from(self.id),
                email,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            password_hash: PasswordHash::new(Secret::new(self.password_hash)),
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        Self {
            token: Secret::new(row.token),
            owner_id: UserId::from(row.user_id),
            expires_at: row.expires_at,
        }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Running database migrations", skip_all)]
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: StoredUser) -> Result<User, UserStoreError> {
        sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user.id.as_uuid())
        .bind(user.user.email.as_ref().expose_secret())
        .bind(user.password_hash.as_ref().expose_secret())
        .bind(user.user.created_at)
        .bind(user.user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return UserStoreError::UserAlreadyExists;
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(user.into_user())
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<StoredUser, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, password_hash, created_at, updated_at
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.into_stored_user()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip(self))]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, password_hash, created_at, updated_at
                FROM users
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.into_stored_user().map(StoredUser::into_user)
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for PostgresCredentialStore {
    #[tracing::instrument(
        name = "Storing refresh token",
        skip_all,
        fields(owner_id = %record.owner_id)
    )]
    async fn add_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<(), RefreshTokenStoreError> {
        let mut transaction = self.pool.begin().await.map_err(unexpected)?;

        purge_expired_tokens(&mut transaction).await?;
        insert_token(&mut transaction, &record).await?;

        transaction.commit().await.map_err(unexpected)
    }

    #[tracing::instrument(name = "Looking up refresh token", skip_all)]
    async fn find_valid_refresh_token(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshTokenRecord>, RefreshTokenStoreError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
                SELECT token, user_id, expires_at
                FROM refresh_tokens
                WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token.expose_secret())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(row.map(RefreshTokenRecord::from))
    }

    #[tracing::instrument(name = "Deleting refresh token", skip_all)]
    async fn delete_refresh_token(
        &self,
        token: &Secret<String>,
    ) -> Result<bool, RefreshTokenStoreError> {
        let result = sqlx::query(
            r#"
                DELETE FROM refresh_tokens
                WHERE token = $1
            "#,
        )
        .bind(token.expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| RefreshTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(
        name = "Rotating refresh token",
        skip_all,
        fields(owner_id = %replacement.owner_id)
    )]
    async fn rotate_refresh_token(
        &self,
        consumed: &Secret<String>,
        replacement: RefreshTokenRecord,
    ) -> Result<bool, RefreshTokenStoreError> {
        let mut transaction = self.pool.begin().await.map_err(unexpected)?;

        // The row lock taken by DELETE makes a concurrent rotation of the
        // same token wait here and then see zero rows.
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(consumed.expose_secret())
            .execute(&mut *transaction)
            .await
            .map_err(unexpected)?;
        if deleted.rows_affected() == 0 {
            transaction.rollback().await.map_err(unexpected)?;
            return Ok(false);
        }

        purge_expired_tokens(&mut transaction).await?;
        insert_token(&mut transaction, &replacement).await?;

        transaction.commit().await.map_err(unexpected)?;
        Ok(true)
    }
}

fn unexpected(e: sqlx::Error) -> RefreshTokenStoreError {
    RefreshTokenStoreError::UnexpectedError(e.to_string())
}

async fn purge_expired_tokens(
    transaction: &mut Transaction<'_, Postgres>,
) -> Result<(), RefreshTokenStoreError> {
    let purged = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
        .bind(Utc::now())
        .execute(&mut **transaction)
        .await
        .map_err(unexpected)?;
    if purged.rows_affected() > 0 {
        tracing::debug!(purged = purged.rows_affected(), "Purged expired refresh tokens");
    }
    Ok(())
}

async fn insert_token(
    transaction: &mut Transaction<'_, Postgres>,
    record: &RefreshTokenRecord,
) -> Result<(), RefreshTokenStoreError> {
    sqlx::query(
        r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
        "#,
    )
    .bind(record.token.expose_secret())
    .bind(record.owner_id.as_uuid())
    .bind(record.expires_at)
    .execute(&mut **transaction)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            return RefreshTokenStoreError::DuplicateToken;
        }
        unexpected(e)
    })?;

    Ok(())
}

#[async_trait::async_trait]
impl DatastoreProbe for PostgresCredentialStore {
    #[tracing::instrument(name = "Pinging PostgreSQL", skip_all)]
    async fn ping(&self) -> Result<(), DatastoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| DatastoreError(e.to_string()))
    }
}
