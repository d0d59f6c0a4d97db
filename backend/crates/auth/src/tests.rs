//! Unit tests for the auth crate
//!
//! Use cases run against an in-memory repository so the full login /
//! lockout / rate-limit flow is exercised without a database. The
//! in-memory `record_failure` mirrors the store's atomic statement.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CheckSessionUseCase, CsrfTokenUseCase, LoginInput,
    LoginUseCase, RegisterInput, RegisterUseCase, UpdateProfileUseCase, session_token,
};
use crate::domain::entity::account::{Account, NewAccount, ProfileUpdate};
use crate::domain::entity::credential::Credential;
use crate::domain::entity::login_attempt::LoginAttempt;
use crate::domain::entity::session::Session;
use crate::domain::repository::{
    AccountRepository, CredentialRepository, FailureOutcome, LoginAttemptRepository,
    SessionRepository,
};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct MemState {
    next_id: i64,
    accounts: Vec<Account>,
    credentials: HashMap<i64, Credential>,
    attempts: Vec<LoginAttempt>,
    sessions: HashMap<Uuid, Session>,
}

#[derive(Clone, Default)]
struct MemRepo {
    state: Arc<Mutex<MemState>>,
}

impl MemRepo {
    fn new() -> Self {
        Self::default()
    }

    fn attempt_count(&self) -> usize {
        self.state.lock().unwrap().attempts.len()
    }

    fn credential(&self, account_id: AccountId) -> Credential {
        self.state
            .lock()
            .unwrap()
            .credentials
            .get(&account_id.as_i64())
            .cloned()
            .expect("credential exists")
    }

    fn backdate_lock(&self, account_id: AccountId, until: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        let cred = state
            .credentials
            .get_mut(&account_id.as_i64())
            .expect("credential exists");
        cred.account_locked = true;
        cred.locked_until = Some(until);
    }

    fn session(&self, session_id: Uuid) -> Option<Session> {
        self.state.lock().unwrap().sessions.get(&session_id).cloned()
    }

    fn account(&self, account_id: AccountId) -> Account {
        self.state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned()
            .expect("account exists")
    }
}

impl AccountRepository for MemRepo {
    async fn create(&self, account: &NewAccount) -> AuthResult<AccountId> {
        let mut state = self.state.lock().unwrap();

        let taken = state.accounts.iter().any(|a| {
            a.username.canonical() == account.username.canonical()
                || a.email.as_str() == account.email.as_str()
        });
        if taken {
            return Err(AuthError::IdentityTaken);
        }

        state.next_id += 1;
        let account_id = AccountId::from_i64(state.next_id);
        let now = Utc::now();
        state.accounts.push(Account {
            account_id,
            username: account.username.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            phone: account.phone.clone(),
            location: account.location.clone(),
            role: account.role,
            rating: 0.0,
            total_reviews: 0,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        });
        Ok(account_id)
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.account_id == *account_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.email.as_str() == email.as_str())
            .cloned())
    }

    async fn identity_taken(&self, username_canonical: &str, email: &Email) -> AuthResult<bool> {
        Ok(self.state.lock().unwrap().accounts.iter().any(|a| {
            a.username.canonical() == username_canonical || a.email.as_str() == email.as_str()
        }))
    }

    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> AuthResult<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(account) = state
            .accounts
            .iter_mut()
            .find(|a| a.account_id == *account_id)
        else {
            return Ok(false);
        };
        if let Some(display_name) = &update.display_name {
            account.display_name = display_name.clone();
        }
        if let Some(phone) = &update.phone {
            account.phone = phone.clone();
        }
        if let Some(location) = &update.location {
            account.location = location.clone();
        }
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn record_login(&self, account_id: &AccountId) -> AuthResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(account) = state
            .accounts
            .iter_mut()
            .find(|a| a.account_id == *account_id)
        {
            account.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl CredentialRepository for MemRepo {
    async fn create(&self, credential: &Credential) -> AuthResult<()> {
        self.state
            .lock()
            .unwrap()
            .credentials
            .insert(credential.account_id.as_i64(), credential.clone());
        Ok(())
    }

    async fn find_by_account_id(&self, account_id: &AccountId) -> AuthResult<Option<Credential>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .credentials
            .get(&account_id.as_i64())
            .cloned())
    }

    async fn record_failure(
        &self,
        account_id: &AccountId,
        locked_until: DateTime<Utc>,
    ) -> AuthResult<FailureOutcome> {
        let mut state = self.state.lock().unwrap();
        let cred = state
            .credentials
            .get_mut(&account_id.as_i64())
            .ok_or(AuthError::NotFound("Account"))?;

        // Same transition as the store's single UPDATE statement
        if cred.login_attempts + 1 >= Credential::MAX_LOGIN_ATTEMPTS {
            cred.account_locked = true;
            cred.locked_until = Some(locked_until);
            cred.login_attempts = 0;
        } else {
            cred.login_attempts += 1;
        }
        Ok(FailureOutcome {
            login_attempts: cred.login_attempts,
            locked: cred.account_locked,
        })
    }

    async fn reset_failures(&self, account_id: &AccountId) -> AuthResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(cred) = state.credentials.get_mut(&account_id.as_i64()) {
            cred.login_attempts = 0;
            cred.account_locked = false;
            cred.locked_until = None;
        }
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
        use crate::domain::value_object::user_password::UserPassword;
        let mut state = self.state.lock().unwrap();
        if let Some(cred) = state.credentials.get_mut(&account_id.as_i64()) {
            cred.password_hash = UserPassword::from_phc_string(phc_string)
                .map_err(|e| AuthError::Internal(e.to_string()))?;
        }
        Ok(())
    }
}

impl LoginAttemptRepository for MemRepo {
    async fn record(&self, attempt: &LoginAttempt) -> AuthResult<()> {
        self.state.lock().unwrap().attempts.push(attempt.clone());
        Ok(())
    }

    async fn count_for_identifier(&self, email: &str, cutoff: DateTime<Utc>) -> AuthResult<u32> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attempts
            .iter()
            .filter(|a| a.email == email && a.attempted_at > cutoff)
            .count() as u32)
    }

    async fn count_for_origin(&self, ip_address: &str, cutoff: DateTime<Utc>) -> AuthResult<u32> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attempts
            .iter()
            .filter(|a| a.ip_address == ip_address && a.attempted_at > cutoff)
            .count() as u32)
    }
}

impl SessionRepository for MemRepo {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        Ok(self.state.lock().unwrap().sessions.get(&session_id).cloned())
    }

    async fn update(&self, session: &Session) -> AuthResult<()> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn replace_id(&self, old_id: Uuid, session: &Session) -> AuthResult<()> {
        let mut state = self.state.lock().unwrap();
        state.sessions.remove(&old_id);
        state.sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.state.lock().unwrap().sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_stale(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.last_activity_at >= cutoff);
        Ok((before - state.sessions.len()) as u64)
    }
}

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    repo: Arc<MemRepo>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: Arc::new(MemRepo::new()),
            config: Arc::new(AuthConfig::development()),
        }
    }

    fn register_use_case(&self) -> RegisterUseCase<MemRepo, MemRepo, MemRepo> {
        RegisterUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }

    fn login_use_case(&self) -> LoginUseCase<MemRepo, MemRepo, MemRepo, MemRepo> {
        LoginUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }

    async fn guest_session(&self) -> Session {
        let session = Session::guest(None);
        SessionRepository::create(self.repo.as_ref(), &session)
            .await
            .unwrap();
        session
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> AuthResult<AccountId> {
        let session = self.guest_session().await;
        let output = self
            .register_use_case()
            .execute(
                RegisterInput {
                    username: username.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    display_name: String::new(),
                    phone: String::new(),
                    location: String::new(),
                    role: None,
                },
                session,
            )
            .await?;
        Ok(output.account_id)
    }

    async fn login(&self, email: &str, password: &str, origin: &str) -> AuthResult<Session> {
        let session = self.guest_session().await;
        let output = self
            .login_use_case()
            .execute(
                LoginInput {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                Some(origin.parse().unwrap()),
                session,
            )
            .await?;
        Ok(output.session)
    }
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn register_assigns_sequential_ids() {
    let h = Harness::new();
    let a = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();
    let b = h.register("bolanle", "b@x.com", "longenough1").await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let h = Harness::new();
    let err = h.register("adaeze", "a@x.com", "short1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(_)));
    assert_eq!(err.status_code(), 400);

    // Same identity with a valid secret goes through afterwards
    assert!(h.register("adaeze", "a@x.com", "longenough1").await.is_ok());
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let h = Harness::new();
    let err = h
        .register("adaeze", "not-an-email", "longenough1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(_)));
}

#[tokio::test]
async fn register_duplicate_email_conflicts_in_either_order() {
    let h = Harness::new();
    assert!(h.register("first", "dup@x.com", "longenough1").await.is_ok());
    let err = h
        .register("second", "dup@x.com", "longenough1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::IdentityTaken));

    let h = Harness::new();
    assert!(h.register("second", "dup@x.com", "longenough1").await.is_ok());
    let err = h
        .register("first", "dup@x.com", "longenough1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::IdentityTaken));
}

#[tokio::test]
async fn register_duplicate_username_conflicts_case_insensitively() {
    let h = Harness::new();
    assert!(h.register("Adaeze", "a@x.com", "longenough1").await.is_ok());
    let err = h
        .register("adaeze", "other@x.com", "longenough1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::IdentityTaken));
}

#[tokio::test]
async fn register_signs_the_session_in() {
    let h = Harness::new();
    let session = h.guest_session().await;
    let guest_id = session.session_id;

    let output = h
        .register_use_case()
        .execute(
            RegisterInput {
                username: "adaeze".to_string(),
                email: "a@x.com".to_string(),
                password: "longenough1".to_string(),
                display_name: "Adaeze N.".to_string(),
                phone: String::new(),
                location: "Lagos".to_string(),
                role: Some("seller".to_string()),
            },
            session,
        )
        .await
        .unwrap();

    assert!(output.session.is_authenticated());
    assert_ne!(output.session.session_id, guest_id);
    // Old identity is gone from the store; the new one is present
    assert!(h.repo.session(guest_id).is_none());
    assert!(h.repo.session(output.session.session_id).is_some());
}

// ============================================================================
// Login and the lockout state machine
// ============================================================================

#[tokio::test]
async fn login_success_returns_account() {
    let h = Harness::new();
    h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    let session = h.login("a@x.com", "longenough1", "10.0.0.1").await.unwrap();
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn login_unknown_email_is_plain_invalid_credentials() {
    let h = Harness::new();

    let err = h
        .login("ghost@x.com", "longenough1", "10.0.0.1")
        .await
        .unwrap_err();
    // Not NotFound: a miss is indistinguishable from a wrong password
    assert!(matches!(
        err,
        AuthError::InvalidCredentials { remaining: None }
    ));
    // The attempt is still audited
    assert_eq!(h.repo.attempt_count(), 1);
}

#[tokio::test]
async fn login_wrong_password_counts_down_remaining() {
    let h = Harness::new();
    h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    let err = h
        .login("a@x.com", "wrongpassword9", "10.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidCredentials {
            remaining: Some(4)
        }
    ));

    let err = h
        .login("a@x.com", "wrongpassword9", "10.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidCredentials {
            remaining: Some(3)
        }
    ));
}

#[tokio::test]
async fn fifth_failure_locks_and_correct_password_stays_rejected() {
    let h = Harness::new();
    let account_id = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    for _ in 0..4 {
        let err = h
            .login("a@x.com", "wrongpassword9", "10.0.0.1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials { .. }));
    }

    // Fifth failure trips the lock
    let err = h
        .login("a@x.com", "wrongpassword9", "10.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountLocked));

    let cred = h.repo.credential(account_id);
    assert!(cred.account_locked);
    assert_eq!(cred.login_attempts, 0);

    // Even the correct secret is rejected while locked
    let err = h
        .login("a@x.com", "longenough1", "10.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountLocked));
}

#[tokio::test]
async fn expired_lock_clears_and_login_succeeds() {
    let h = Harness::new();
    let account_id = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    // Simulate the lockout window having elapsed
    h.repo
        .backdate_lock(account_id, Utc::now() - Duration::seconds(1));

    let session = h.login("a@x.com", "longenough1", "10.0.0.1").await.unwrap();
    assert!(session.is_authenticated());

    let cred = h.repo.credential(account_id);
    assert!(!cred.account_locked);
    assert_eq!(cred.login_attempts, 0);
}

#[tokio::test]
async fn success_resets_failure_counter() {
    let h = Harness::new();
    let account_id = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    for _ in 0..2 {
        let _ = h.login("a@x.com", "wrongpassword9", "10.0.0.1").await;
    }
    assert_eq!(h.repo.credential(account_id).login_attempts, 2);

    h.login("a@x.com", "longenough1", "10.0.0.1").await.unwrap();
    assert_eq!(h.repo.credential(account_id).login_attempts, 0);
}

#[tokio::test]
async fn login_rotates_session_identity() {
    let h = Harness::new();
    h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    let guest = h.guest_session().await;
    let guest_id = guest.session_id;

    let output = h
        .login_use_case()
        .execute(
            LoginInput {
                email: "a@x.com".to_string(),
                password: "longenough1".to_string(),
            },
            None,
            guest,
        )
        .await
        .unwrap();

    assert_ne!(output.session.session_id, guest_id);
    assert!(h.repo.session(guest_id).is_none());
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn identifier_window_rejects_before_account_lookup() {
    let h = Harness::new();
    let max = h.config.login_rate_limit.max_attempts;

    // Saturate the window for an address that was never registered
    for _ in 0..max {
        LoginAttemptRepository::record(
            h.repo.as_ref(),
            &LoginAttempt::now("ghost@x.com", "10.0.0.1", false),
        )
        .await
        .unwrap();
    }

    let err = h
        .login("ghost@x.com", "longenough1", "10.0.0.2")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::RateLimited));
    // Rate-limited requests are not audited; the window drains naturally
    assert_eq!(h.repo.attempt_count(), max as usize);
}

#[tokio::test]
async fn origin_window_rejects_identifier_spray() {
    let h = Harness::new();
    h.register("adaeze", "a@x.com", "longenough1").await.unwrap();
    let max = h.config.login_rate_limit.max_attempts;

    // One origin spraying many identifiers exhausts its own budget
    for i in 0..max {
        LoginAttemptRepository::record(
            h.repo.as_ref(),
            &LoginAttempt::now(format!("target{}@x.com", i), "172.16.0.9", false),
        )
        .await
        .unwrap();
    }

    let err = h
        .login("a@x.com", "longenough1", "172.16.0.9")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::RateLimited));

    // The same account remains reachable from a clean origin
    assert!(h.login("a@x.com", "longenough1", "10.9.9.9").await.is_ok());
}

// ============================================================================
// Change password / profile
// ============================================================================

#[tokio::test]
async fn change_password_requires_current_secret() {
    let h = Harness::new();
    let account_id = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    let use_case = ChangePasswordUseCase::new(h.repo.clone(), h.config.clone());

    let err = use_case
        .execute(
            account_id,
            ChangePasswordInput {
                current_password: "notthesecret1".to_string(),
                new_password: "brandnewsecret2".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PasswordMismatch));
    assert_eq!(err.status_code(), 401);

    let err = use_case
        .execute(
            account_id,
            ChangePasswordInput {
                current_password: "longenough1".to_string(),
                new_password: "short2".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidInput(_)));

    use_case
        .execute(
            account_id,
            ChangePasswordInput {
                current_password: "longenough1".to_string(),
                new_password: "brandnewsecret2".to_string(),
            },
        )
        .await
        .unwrap();

    // Old secret is dead, new one authenticates
    assert!(h.login("a@x.com", "longenough1", "10.0.0.1").await.is_err());
    assert!(h
        .login("a@x.com", "brandnewsecret2", "10.0.0.1")
        .await
        .is_ok());
}

#[tokio::test]
async fn update_profile_is_partial() {
    let h = Harness::new();
    let account_id = h.register("adaeze", "a@x.com", "longenough1").await.unwrap();

    let use_case = UpdateProfileUseCase::new(h.repo.clone());
    use_case
        .execute(
            account_id,
            ProfileUpdate {
                display_name: Some("Adaeze N.".to_string()),
                phone: None,
                location: Some("Abuja".to_string()),
            },
        )
        .await
        .unwrap();

    let account = h.repo.account(account_id);
    assert_eq!(account.display_name, "Adaeze N.");
    assert_eq!(account.location, "Abuja");
    assert_eq!(account.phone, "");
}

#[tokio::test]
async fn update_profile_missing_account_is_not_found() {
    let h = Harness::new();
    let use_case = UpdateProfileUseCase::new(h.repo.clone());

    let err = use_case
        .execute(
            AccountId::from_i64(404),
            ProfileUpdate {
                phone: Some("+2348000000000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound(_)));
}

// ============================================================================
// Sessions and CSRF issuance
// ============================================================================

#[tokio::test]
async fn csrf_use_case_mints_guest_session_and_reuses_it() {
    let h = Harness::new();
    let use_case = CsrfTokenUseCase::new(h.repo.clone(), h.config.clone());

    let first = use_case.execute(None, None).await.unwrap();
    let cookie = first.new_session_token.clone().expect("guest session minted");

    // Second call with the cookie reuses both session and token
    let second = use_case.execute(Some(cookie), None).await.unwrap();
    assert!(second.new_session_token.is_none());
    assert_eq!(second.csrf_token, first.csrf_token);
}

#[tokio::test]
async fn check_session_rejects_guest_for_authenticated_routes() {
    let h = Harness::new();
    let session = h.guest_session().await;
    let token = session_token::sign(session.session_id, &h.config.session_secret);

    let use_case = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    assert!(use_case.get_session(&token).await.is_ok());

    let err = use_case.get_authenticated(&token).await.unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[tokio::test]
async fn check_session_renews_aged_identity() {
    let h = Harness::new();

    let mut session = Session::guest(None);
    session.issued_at = Utc::now() - Duration::seconds(3601);
    SessionRepository::create(h.repo.as_ref(), &session)
        .await
        .unwrap();
    let old_id = session.session_id;
    let token = session_token::sign(old_id, &h.config.session_secret);

    let use_case = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    let renewed = use_case.get_session(&token).await.unwrap();

    // Sliding renewal: new identity, new cookie, session preserved
    assert_ne!(renewed.session.session_id, old_id);
    let reissued = renewed.reissued_token.expect("cookie reissued");
    assert_eq!(
        session_token::parse(&reissued, &h.config.session_secret).unwrap(),
        renewed.session.session_id
    );
    assert!(h.repo.session(old_id).is_none());
}

#[tokio::test]
async fn check_session_rejects_forged_token() {
    let h = Harness::new();
    let session = h.guest_session().await;

    let other_secret = [9u8; 32];
    let forged = session_token::sign(session.session_id, &other_secret);

    let use_case = CheckSessionUseCase::new(h.repo.clone(), h.config.clone());
    let err = use_case.get_session(&forged).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionInvalid));
}
