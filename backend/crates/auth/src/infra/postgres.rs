//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, NewAccount, ProfileUpdate},
    credential::Credential,
    login_attempt::LoginAttempt,
    session::Session,
};
use crate::domain::repository::{
    AccountRepository, CredentialRepository, FailureOutcome, LoginAttemptRepository,
    SessionRepository,
};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, user_password::UserPassword, user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove sessions idle since before `cutoff`
    pub async fn cleanup_stale(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE last_activity_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up stale sessions");

        Ok(deleted)
    }
}

/// Whether a sqlx error is a unique-constraint violation (PG 23505)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<AccountId> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (
                username,
                username_canonical,
                email,
                display_name,
                phone,
                location,
                role
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(account.username.original())
        .bind(account.username.canonical())
        .bind(account.email.as_str())
        .bind(&account.display_name)
        .bind(&account.phone)
        .bind(&account.location)
        .bind(account.role.id())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(AccountId::from_i64(id)),
            // Two concurrent registrations: the unique index decides
            Err(e) if is_unique_violation(&e) => Err(AuthError::IdentityTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                display_name,
                phone,
                location,
                role,
                rating,
                total_reviews,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                username,
                email,
                display_name,
                phone,
                location,
                role,
                rating,
                total_reviews,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn identity_taken(&self, username_canonical: &str, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1 OR email = $2)",
        )
        .bind(username_canonical)
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                display_name = COALESCE($2, display_name),
                phone = COALESCE($3, phone),
                location = COALESCE($4, location),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .bind(&update.display_name)
        .bind(&update.phone)
        .bind(&update.location)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn record_login(&self, account_id: &AccountId) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(account_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAuthRepository {
    async fn create(&self, credential: &Credential) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_credentials (
                account_id,
                password_hash,
                login_attempts,
                account_locked,
                locked_until,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(credential.account_id.as_i64())
        .bind(credential.password_hash.as_phc_string())
        .bind(credential.login_attempts as i16)
        .bind(credential.account_locked)
        .bind(credential.locked_until)
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_account_id(&self, account_id: &AccountId) -> AuthResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                account_id,
                password_hash,
                login_attempts,
                account_locked,
                locked_until,
                created_at,
                updated_at
            FROM auth_credentials
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn record_failure(
        &self,
        account_id: &AccountId,
        locked_until: DateTime<Utc>,
    ) -> AuthResult<FailureOutcome> {
        // Increment and lock transition in one statement: concurrent
        // failures against the same row serialize on the row lock, so no
        // update is ever lost. All SET expressions read the pre-update row.
        let row = sqlx::query_as::<_, (i16, bool)>(
            r#"
            UPDATE auth_credentials SET
                account_locked = login_attempts + 1 >= $2,
                locked_until = CASE WHEN login_attempts + 1 >= $2
                                    THEN $3 ELSE locked_until END,
                login_attempts = CASE WHEN login_attempts + 1 >= $2
                                      THEN 0 ELSE login_attempts + 1 END,
                updated_at = NOW()
            WHERE account_id = $1
            RETURNING login_attempts, account_locked
            "#,
        )
        .bind(account_id.as_i64())
        .bind(Credential::MAX_LOGIN_ATTEMPTS as i16)
        .bind(locked_until)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::NotFound("Account"))?;

        Ok(FailureOutcome {
            login_attempts: row.0 as u16,
            locked: row.1,
        })
    }

    async fn reset_failures(&self, account_id: &AccountId) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_credentials SET
                login_attempts = 0,
                account_locked = FALSE,
                locked_until = NULL,
                updated_at = NOW()
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_lock(&self, account_id: &AccountId) -> AuthResult<()> {
        self.reset_failures(account_id).await
    }

    async fn update_password_hash(
        &self,
        account_id: &AccountId,
        phc_string: &str,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE auth_credentials SET password_hash = $2, updated_at = NOW() WHERE account_id = $1",
        )
        .bind(account_id.as_i64())
        .bind(phc_string)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Login Attempt Repository Implementation
// ============================================================================

impl LoginAttemptRepository for PgAuthRepository {
    async fn record(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (email, ip_address, success, attempted_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&attempt.email)
        .bind(&attempt.ip_address)
        .bind(attempt.success)
        .bind(attempt.attempted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_for_identifier(&self, email: &str, cutoff: DateTime<Utc>) -> AuthResult<u32> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM login_attempts WHERE email = $1 AND attempted_at > $2",
        )
        .bind(email)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u32)
    }

    async fn count_for_origin(&self, ip_address: &str, cutoff: DateTime<Utc>) -> AuthResult<u32> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM login_attempts WHERE ip_address = $1 AND attempted_at > $2",
        )
        .bind(ip_address)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u32)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                account_id,
                role,
                csrf_token,
                csrf_issued_at,
                issued_at,
                last_activity_at,
                client_ip,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id)
        .bind(session.account_id.map(|id| id.as_i64()))
        .bind(session.role.map(|r| r.id()))
        .bind(&session.csrf_token)
        .bind(session.csrf_issued_at)
        .bind(session.issued_at)
        .bind(session.last_activity_at)
        .bind(&session.client_ip)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                role,
                csrf_token,
                csrf_issued_at,
                issued_at,
                last_activity_at,
                client_ip,
                created_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_session()).transpose()
    }

    async fn update(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                csrf_token = $2,
                csrf_issued_at = $3,
                last_activity_at = $4
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(&session.csrf_token)
        .bind(session.csrf_issued_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace_id(&self, old_id: Uuid, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                session_id = $2,
                account_id = $3,
                role = $4,
                csrf_token = $5,
                csrf_issued_at = $6,
                issued_at = $7,
                last_activity_at = $8
            WHERE session_id = $1
            "#,
        )
        .bind(old_id)
        .bind(session.session_id)
        .bind(session.account_id.map(|id| id.as_i64()))
        .bind(session.role.map(|r| r.id()))
        .bind(&session.csrf_token)
        .bind(session.csrf_issued_at)
        .bind(session.issued_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_stale(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        self.cleanup_stale(cutoff).await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    username: String,
    email: String,
    display_name: String,
    phone: String,
    location: String,
    role: i16,
    rating: f64,
    total_reviews: i32,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let role = UserRole::from_id(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", self.role)))?;

        Ok(Account {
            account_id: AccountId::from_i64(self.id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            display_name: self.display_name,
            phone: self.phone,
            location: self.location,
            role,
            rating: self.rating,
            total_reviews: self.total_reviews,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    account_id: i64,
    password_hash: String,
    login_attempts: i16,
    account_locked: bool,
    locked_until: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<Credential> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored hash: {}", e)))?;

        Ok(Credential {
            account_id: AccountId::from_i64(self.account_id),
            password_hash,
            login_attempts: self.login_attempts as u16,
            account_locked: self.account_locked,
            locked_until: self.locked_until,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    account_id: Option<i64>,
    role: Option<i16>,
    csrf_token: Option<String>,
    csrf_issued_at: Option<DateTime<Utc>>,
    issued_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
    client_ip: Option<String>,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<Session> {
        let role = match self.role {
            Some(id) => Some(
                UserRole::from_id(id)
                    .ok_or_else(|| AuthError::Internal(format!("Invalid role id: {}", id)))?,
            ),
            None => None,
        };

        Ok(Session {
            session_id: self.session_id,
            account_id: self.account_id.map(AccountId::from_i64),
            role,
            csrf_token: self.csrf_token,
            csrf_issued_at: self.csrf_issued_at,
            issued_at: self.issued_at,
            last_activity_at: self.last_activity_at,
            client_ip: self.client_ip,
            created_at: self.created_at,
        })
    }
}
