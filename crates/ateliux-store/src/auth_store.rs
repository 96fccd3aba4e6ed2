//! # Mock Auth Store
//!
//! Demo sign-up and login over key-value storage: a table of registered
//! users and the current session record.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Auth State Machine                                   │
//! │                                                                         │
//! │   ┌─────────┐  hydrate()  ┌─────────────────┐  login() / register()     │
//! │   │ Unknown │────────────►│ Unauthenticated │─────────────────────┐     │
//! │   └─────────┘             └─────────────────┘                     │     │
//! │        │                          ▲                               ▼     │
//! │        │  stored session          │ logout()        ┌──────────────────┐│
//! │        └──────────────────────────┼────────────────►│ Authenticated    ││
//! │                                   └─────────────────│   (Session)      ││
//! │                                                     └──────────────────┘│
//! │                                                                         │
//! │  ⚠️  Credential tokens are placeholders, not password hashes.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never reach the caller. The in-memory user table and
//! session are authoritative: unreadable storage counts as "no users" and
//! "no session", and a failed write leaves the in-memory copy in place.
//! Users registered through another store on the same storage are merged in
//! on every `register` and `login`.

use tracing::{debug, info, warn};

use ateliux_core::credential::{generate_user_id, normalize_username};
use ateliux_core::error::AuthResult;
use ateliux_core::validation::{LoginInput, RegistrationInput};
use ateliux_core::{AuthError, CredentialToken, Session, UserRecord};

use crate::config::{StorageConfig, DEFAULT_SESSION_KEY, DEFAULT_USERS_KEY};
use crate::storage::{read_json, write_json, KeyValueStorage};

/// Current authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Hydration has not run; do not show "logged out" yet.
    Unknown,
    Unauthenticated,
    Authenticated(Session),
}

/// Registered users and the current session, persisted in a
/// [`KeyValueStorage`].
///
/// ## Example
/// ```rust
/// use ateliux_core::validation::{LoginInput, RegistrationInput};
/// use ateliux_store::{AuthStore, MemoryStorage};
///
/// let mut auth = AuthStore::new(MemoryStorage::new());
/// assert_eq!(auth.is_authenticated(), None);
///
/// auth.register(&RegistrationInput {
///     username: "Ana".into(),
///     first_name: "Ana".into(),
///     last_name: "Souza".into(),
///     phone: "11999990000".into(),
///     password: "secret1".into(),
/// })
/// .unwrap();
/// assert_eq!(auth.is_authenticated(), Some(true));
///
/// auth.logout();
/// assert_eq!(auth.is_authenticated(), Some(false));
///
/// let session = auth
///     .login(&LoginInput { username: "ANA".into(), password: "Secret1".into() })
///     .unwrap();
/// assert_eq!(session.username, "ana");
/// ```
#[derive(Debug)]
pub struct AuthStore<S: KeyValueStorage> {
    storage: S,
    users_key: String,
    session_key: String,
    status: AuthStatus,
    users: Vec<UserRecord>,
}

impl<S: KeyValueStorage> AuthStore<S> {
    /// Creates an unhydrated store using the default storage keys.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, DEFAULT_USERS_KEY, DEFAULT_SESSION_KEY)
    }

    pub fn with_keys(
        storage: S,
        users_key: impl Into<String>,
        session_key: impl Into<String>,
    ) -> Self {
        AuthStore {
            storage,
            users_key: users_key.into(),
            session_key: session_key.into(),
            status: AuthStatus::Unknown,
            users: Vec::new(),
        }
    }

    /// Creates a store using the configured users and session keys.
    pub fn from_config(storage: S, config: &StorageConfig) -> Self {
        Self::with_keys(storage, config.users_key.clone(), config.session_key.clone())
    }

    // =========================================================================
    // Hydration & Reads
    // =========================================================================

    /// Loads the stored user table and session once. Later calls are no-ops.
    pub fn hydrate(&mut self) -> &AuthStatus {
        if self.status == AuthStatus::Unknown {
            self.users = self.read_users();
            self.status = match self.read_session() {
                Some(session) => AuthStatus::Authenticated(session),
                None => AuthStatus::Unauthenticated,
            };
            info!(
                users = self.users.len(),
                authenticated = matches!(self.status, AuthStatus::Authenticated(_)),
                "Auth state hydrated"
            );
        }
        &self.status
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.status {
            AuthStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// `None` until hydrated.
    pub fn is_authenticated(&self) -> Option<bool> {
        match self.status {
            AuthStatus::Unknown => None,
            AuthStatus::Unauthenticated => Some(false),
            AuthStatus::Authenticated(_) => Some(true),
        }
    }

    /// Registered users, newest first. Empty until hydrated.
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Creates a user, signs them in and returns the new session.
    ///
    /// ## Errors
    /// - [`AuthError::Validation`] for a blank field or a short password
    /// - [`AuthError::DuplicateUser`] if the username is taken (any case)
    pub fn register(&mut self, input: &RegistrationInput) -> AuthResult<Session> {
        self.hydrate();
        let valid = input.validate()?;

        self.merge_stored_users();
        if self.find_user(&valid.username).is_some() {
            debug!(username = %valid.username, "register rejected: duplicate");
            return Err(AuthError::DuplicateUser {
                username: valid.username,
            });
        }

        let user = UserRecord {
            id: generate_user_id(),
            username: valid.username,
            first_name: valid.first_name,
            last_name: valid.last_name,
            phone: valid.phone,
            credential_token: CredentialToken::derive(&valid.password),
        };
        let session = user.to_session();

        self.users.insert(0, user);
        if let Err(e) = write_json(&self.storage, &self.users_key, &self.users) {
            warn!(key = %self.users_key, error = %e, "User table write failed");
        }

        debug!(username = %session.username, "registered");
        self.start_session(session.clone());
        Ok(session)
    }

    /// Signs in an existing user.
    ///
    /// ## Errors
    /// - [`AuthError::Validation`] for a blank field
    /// - [`AuthError::UserNotFound`] for an unknown username
    /// - [`AuthError::InvalidCredential`] for a wrong password
    pub fn login(&mut self, input: &LoginInput) -> AuthResult<Session> {
        self.hydrate();
        let valid = input.validate()?;

        self.merge_stored_users();
        let user = self
            .find_user(&valid.username)
            .ok_or_else(|| AuthError::UserNotFound {
                username: valid.username.clone(),
            })?;

        if !user.credential_token.matches(&valid.password) {
            debug!(username = %valid.username, "login rejected: bad credential");
            return Err(AuthError::InvalidCredential);
        }

        let session = user.to_session();
        debug!(username = %session.username, "logged in");
        self.start_session(session.clone());
        Ok(session)
    }

    /// Ends the session. Safe to call when nobody is signed in.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove_item(&self.session_key) {
            warn!(key = %self.session_key, error = %e, "Session delete failed");
        }
        self.status = AuthStatus::Unauthenticated;
        debug!("logged out");
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Looks up a user by normalized username. Stored names are normalized
    /// too, since tables written elsewhere may keep the typed casing.
    fn find_user(&self, username: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|u| normalize_username(&u.username) == username)
    }

    /// Prepends stored users this store does not know yet.
    fn merge_stored_users(&mut self) {
        let unseen: Vec<UserRecord> = self
            .read_users()
            .into_iter()
            .filter(|stored| self.find_user(&normalize_username(&stored.username)).is_none())
            .collect();

        if !unseen.is_empty() {
            debug!(count = unseen.len(), "merging users registered elsewhere");
            self.users.splice(0..0, unseen);
        }
    }

    fn start_session(&mut self, session: Session) {
        if let Err(e) = write_json(&self.storage, &self.session_key, &session) {
            warn!(key = %self.session_key, error = %e, "Session write failed");
        }
        self.status = AuthStatus::Authenticated(session);
    }

    fn read_users(&self) -> Vec<UserRecord> {
        match read_json::<Vec<UserRecord>, _>(&self.storage, &self.users_key) {
            Ok(users) => users.unwrap_or_default(),
            Err(e) => {
                warn!(key = %self.users_key, error = %e, "User table unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn read_session(&self) -> Option<Session> {
        match read_json::<Session, _>(&self.storage, &self.session_key) {
            Ok(session) => session,
            Err(e) => {
                warn!(key = %self.session_key, error = %e, "Stored session unreadable, treating as absent");
                None
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStorage;
    use ateliux_core::ValidationError;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("private mode".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("private mode".into()))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("private mode".into()))
        }
    }

    /// Reads work, writes fail.
    #[derive(Default)]
    struct ReadOnlyStorage {
        inner: MemoryStorage,
    }

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }

        fn remove_item(&self, key: &str) -> StorageResult<()> {
            self.inner.remove_item(key)
        }
    }

    fn registration(username: &str, password: &str) -> RegistrationInput {
        RegistrationInput {
            username: username.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            phone: "11999990000".to_string(),
            password: password.to_string(),
        }
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_unknown_before_hydration() {
        let mut auth = AuthStore::new(MemoryStorage::new());
        assert_eq!(auth.is_authenticated(), None);
        assert_eq!(auth.hydrate(), &AuthStatus::Unauthenticated);
        assert_eq!(auth.is_authenticated(), Some(false));
    }

    #[test]
    fn test_register_creates_session() {
        let storage = MemoryStorage::new();
        let mut auth = AuthStore::new(storage.clone());

        let session = auth.register(&registration("  Ana ", "secret1")).unwrap();
        assert_eq!(session.username, "ana");
        assert!(session.id.starts_with("u_"));
        assert_eq!(auth.session(), Some(&session));

        let users = auth.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].credential_token.as_str(), "hashlike_secret1");
        assert!(storage.get_item(DEFAULT_SESSION_KEY).unwrap().is_some());
    }

    #[test]
    fn test_session_survives_reload() {
        let storage = MemoryStorage::new();
        let mut first = AuthStore::new(storage.clone());
        let session = first.register(&registration("ana", "secret1")).unwrap();

        let mut second = AuthStore::new(storage);
        assert_eq!(second.hydrate(), &AuthStatus::Authenticated(session));
    }

    #[test]
    fn test_duplicate_username_any_case() {
        let mut auth = AuthStore::new(MemoryStorage::new());
        auth.register(&registration("Ana", "secret1")).unwrap();

        let err = auth.register(&registration("ANA", "other-pass")).unwrap_err();
        assert_eq!(
            err,
            AuthError::DuplicateUser {
                username: "ana".to_string()
            }
        );
        assert_eq!(err.to_string(), "User 'ana' already exists");

        auth.logout();
        assert!(auth.login(&login("ana", "secret1")).is_ok());
    }

    #[test]
    fn test_new_users_are_prepended() {
        let mut auth = AuthStore::new(MemoryStorage::new());
        auth.register(&registration("first", "secret1")).unwrap();
        auth.register(&registration("second", "secret1")).unwrap();

        let names: Vec<&str> = auth.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["second", "first"]);
    }

    #[test]
    fn test_registration_validation() {
        let mut auth = AuthStore::new(MemoryStorage::new());

        let err = auth.register(&registration("   ", "secret1")).unwrap_err();
        assert_eq!(err, AuthError::Validation(ValidationError::required("username")));

        let err = auth.register(&registration("ana", " abc12 ")).unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 6 characters");
        assert!(auth.users().is_empty());
    }

    #[test]
    fn test_login_errors() {
        let mut auth = AuthStore::new(MemoryStorage::new());
        auth.register(&registration("ana", "secret1")).unwrap();
        auth.logout();

        let err = auth.login(&login("bob", "secret1")).unwrap_err();
        assert_eq!(err.to_string(), "User not found: bob");

        let err = auth.login(&login("ana", "wrong-pass")).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredential);
        assert_eq!(auth.is_authenticated(), Some(false));

        let err = auth.login(&login("ana", "")).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn test_login_is_case_insensitive() {
        let mut auth = AuthStore::new(MemoryStorage::new());
        auth.register(&registration("ana", "Secret1")).unwrap();
        auth.logout();

        auth.login(&login(" ANA ", "SECRET1")).unwrap();
        assert_eq!(auth.is_authenticated(), Some(true));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut auth = AuthStore::new(storage.clone());
        auth.logout();
        auth.register(&registration("ana", "secret1")).unwrap();
        auth.logout();
        auth.logout();

        assert_eq!(auth.is_authenticated(), Some(false));
        assert!(storage.get_item(DEFAULT_SESSION_KEY).unwrap().is_none());

        let mut reloaded = AuthStore::new(storage);
        assert_eq!(reloaded.hydrate(), &AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_user_table_written_elsewhere_is_visible() {
        let storage = MemoryStorage::new();
        let mut first = AuthStore::new(storage.clone());
        let mut second = AuthStore::new(storage);
        second.hydrate();

        first.register(&registration("ana", "secret1")).unwrap();
        assert!(second.login(&login("ana", "secret1")).is_ok());
    }

    #[test]
    fn test_malformed_records_treated_as_absent() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_SESSION_KEY, "{\"id\": 42").unwrap();
        storage.set_item(DEFAULT_USERS_KEY, "not json").unwrap();

        let mut auth = AuthStore::new(storage);
        assert_eq!(auth.hydrate(), &AuthStatus::Unauthenticated);
        assert!(auth.users().is_empty());
        assert!(auth.register(&registration("ana", "secret1")).is_ok());
    }

    #[test]
    fn test_failed_user_table_write_keeps_users_in_memory() {
        let mut auth = AuthStore::new(ReadOnlyStorage::default());
        auth.register(&registration("ana", "secret1")).unwrap();

        let err = auth.register(&registration("ANA", "secret1")).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUser { .. }));

        auth.logout();
        let session = auth.login(&login("ana", "secret1")).unwrap();
        assert_eq!(session.username, "ana");
        assert_eq!(auth.users().len(), 1);
    }

    #[test]
    fn test_stored_usernames_compared_case_insensitively() {
        let storage = MemoryStorage::new();
        let table = serde_json::json!([{
            "id": "u_legacy",
            "username": "Ana",
            "firstName": "Ana",
            "lastName": "Souza",
            "phone": "11999990000",
            "credentialToken": "hashlike_secret1"
        }]);
        storage.set_item(DEFAULT_USERS_KEY, &table.to_string()).unwrap();

        let mut auth = AuthStore::new(storage);
        let err = auth.register(&registration("ana", "other-pass")).unwrap_err();
        assert_eq!(
            err,
            AuthError::DuplicateUser {
                username: "ana".to_string()
            }
        );

        let session = auth.login(&login("ANA", "secret1")).unwrap();
        assert_eq!(session.id, "u_legacy");
    }

    #[test]
    fn test_merge_keeps_in_memory_users() {
        let storage = MemoryStorage::new();
        let mut first = AuthStore::new(storage.clone());
        first.register(&registration("ana", "secret1")).unwrap();

        // Another writer replaces the table without ana.
        let mut second = AuthStore::new(MemoryStorage::new());
        second.register(&registration("bia", "secret1")).unwrap();
        let raw = second.storage.get_item(DEFAULT_USERS_KEY).unwrap().unwrap();
        storage.set_item(DEFAULT_USERS_KEY, &raw).unwrap();

        first.logout();
        assert!(first.login(&login("bia", "secret1")).is_ok());
        assert!(first.login(&login("ana", "secret1")).is_ok());

        let names: Vec<&str> = first.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["bia", "ana"]);
    }

    #[test]
    fn test_broken_storage_is_swallowed() {
        let mut auth = AuthStore::new(BrokenStorage);
        assert_eq!(auth.hydrate(), &AuthStatus::Unauthenticated);

        let session = auth.register(&registration("ana", "secret1")).unwrap();
        assert_eq!(auth.session(), Some(&session));

        auth.logout();
        assert_eq!(auth.is_authenticated(), Some(false));
    }
}
