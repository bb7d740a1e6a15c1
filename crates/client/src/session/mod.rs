//! Session store.
//!
//! Owns the current authenticated identity and its lifecycle. The
//! identity lives in a single-writer observable slot: only the store
//! mutates it, everything else reads consistent snapshots or subscribes
//! to transitions. Sign-up, sign-in, and federated sign-in each mirror
//! the fresh identity into the durable profile record exactly once.

mod error;

pub use error::AuthError;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, warn};

use foodiefinds_core::{Email, Password};

use crate::identity::IdentityProvider;
use crate::models::Identity;
use crate::remote::ProfileStore;

/// Observer callback invoked on every session transition.
type Observer = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

type ObserverRegistry = Arc<Mutex<HashMap<u64, Observer>>>;

/// Owns the current authenticated identity.
///
/// The store is the single source of truth for "who is signed in".
/// Transitions (unauthenticated → authenticated, authenticated →
/// unauthenticated, identity fields changed) notify all subscribers
/// synchronously, after the slot is updated. Operation failures never
/// leave a half-authenticated state: the slot changes only after the
/// provider succeeded.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    identity: RwLock<Option<Identity>>,
    observers: ObserverRegistry,
    next_observer: AtomicU64,
}

/// RAII subscription handle; dropping it unregisters the observer.
#[must_use = "dropping the subscription unregisters the observer"]
pub struct SessionSubscription {
    id: u64,
    observers: ObserverRegistry,
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.remove(&self.id);
        }
    }
}

impl SessionStore {
    /// Create a new session store, initially unauthenticated.
    pub fn new(provider: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            provider,
            profiles,
            identity: RwLock::new(None),
            observers: Arc::new(Mutex::new(HashMap::new())),
            next_observer: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Register a new account and establish a session.
    ///
    /// Validation happens before any provider call: the password policy
    /// first, then the optional confirmation value. On success the
    /// profile snapshot is mirrored to the durable record; a failure
    /// there is logged and does not roll back the sign-up.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakCredential` if the password fails the policy.
    /// Returns `AuthError::PasswordMismatch` if a confirmation is supplied
    /// and differs.
    /// Returns `AuthError::Provider` on provider rejection (e.g., email
    /// already registered).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: Option<&str>,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let email = Email::parse(email)?;
        let password = Password::parse(password)?;

        if let Some(confirm) = confirm_password
            && confirm != password.expose()
        {
            return Err(AuthError::PasswordMismatch);
        }

        let identity = self
            .provider
            .sign_up(&email, &password, display_name, photo_url)
            .await?;

        self.establish(identity.clone()).await;
        Ok(identity)
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = Email::parse(email)?;

        let identity = self.provider.sign_in(&email, password).await?;

        self.establish(identity.clone()).await;
        Ok(identity)
    }

    /// Sign in through the external federated provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the provider fails the flow.
    pub async fn sign_in_federated(&self) -> Result<Identity, AuthError> {
        let identity = self.provider.federated_sign_in().await?;

        self.establish(identity.clone()).await;
        Ok(identity)
    }

    /// Sign out. Idempotent.
    ///
    /// The local identity is always cleared, even if the provider-side
    /// sign-out fails.
    pub async fn sign_out(&self) {
        if let Err(err) = self.provider.sign_out().await {
            warn!(error = %err, "Provider sign-out failed, clearing local session anyway");
        }
        self.set_identity(None);
    }

    /// Change the signed-in member's display attributes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if no session is established.
    /// Returns `AuthError::Provider` on provider rejection.
    pub async fn update_profile(
        &self,
        display_name: &str,
        photo_url: &str,
    ) -> Result<Identity, AuthError> {
        let current = self.current_identity().ok_or(AuthError::NotAuthenticated)?;

        let identity = self
            .provider
            .update_profile(&current.email, display_name, photo_url)
            .await?;

        self.set_identity(Some(identity.clone()));
        Ok(identity)
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Snapshot of the current identity, `None` when unauthenticated.
    ///
    /// The snapshot is taken under the slot lock, so readers never see a
    /// torn identity.
    pub fn current_identity(&self) -> Option<Identity> {
        self.identity
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Whether a session is currently established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_identity().is_some()
    }

    /// Subscribe to session transitions.
    ///
    /// The observer runs synchronously inside the mutating call, after
    /// the slot is updated, and only when the identity actually changed.
    /// It must not call back into subscribe/unsubscribe. Drop the handle
    /// to unsubscribe.
    pub fn subscribe(
        &self,
        observer: impl Fn(Option<&Identity>) + Send + Sync + 'static,
    ) -> SessionSubscription {
        let id = self.next_observer.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut observers) = self.observers.lock() {
            observers.insert(id, Box::new(observer));
        }
        SessionSubscription {
            id,
            observers: Arc::clone(&self.observers),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Establish a fresh session and mirror the profile snapshot.
    async fn establish(&self, identity: Identity) {
        self.set_identity(Some(identity.clone()));

        // Fire-and-forget: a profile upsert failure never rolls back the
        // session.
        if let Err(err) = self.profiles.upsert_profile(&identity).await {
            warn!(email = %identity.email, error = %err, "Profile snapshot upsert failed");
        }
    }

    /// Single writer for the identity slot. Notifies only on change.
    fn set_identity(&self, next: Option<Identity>) {
        {
            let Ok(mut slot) = self.identity.write() else {
                return;
            };
            if *slot == next {
                return;
            }
            *slot = next.clone();
        }

        debug!(authenticated = next.is_some(), "Session transition");

        if let Ok(observers) = self.observers.lock() {
            for observer in observers.values() {
                observer(next.as_ref());
            }
        }
    }
}
