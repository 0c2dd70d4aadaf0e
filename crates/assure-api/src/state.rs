//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! Customers, policies, and claims each live in a [`Store`]. Business
//! numbers (`CUST-`, `POL-`, `CLM-`) come from process-wide counters; the
//! customer counter starts past the highest sequence in the seeded data.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use assure_core::{sample, Claim, ClaimNumber, Customer, CustomerNumber, Policy, PolicyNumber};
use chrono::{Datelike, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not `tokio::sync`)
/// because we never hold the lock across `.await` points. The lock makes each
/// call memory-safe; it gives no transactional guarantee across calls.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        self.data.write().insert(id, value)
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// Snapshot of all records, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Update a record in place. Returns the updated record, or `None` if not found.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.data.write();
        if let Some(entry) = guard.get_mut(id) {
            f(entry);
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

/// Application configuration.
///
/// Custom `Debug` redacts the auth token.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. `None` disables authentication.
    pub auth_token: Option<String>,
    /// Load the demo customers at startup.
    pub seed_sample_data: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("seed_sample_data", &self.seed_sample_data)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            seed_sample_data: true,
        }
    }
}

/// Interpret a boolean environment value. Unrecognized values yield `None`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Read `PORT`, `AUTH_TOKEN`, and `SEED_SAMPLE_DATA` from the environment.
    ///
    /// Unset or unparseable values fall back to the defaults. An empty
    /// `AUTH_TOKEN` is treated as unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let auth_token = std::env::var("AUTH_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let seed_sample_data = std::env::var("SEED_SAMPLE_DATA")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_sample_data);
        Self {
            port,
            auth_token,
            seed_sample_data,
        }
    }
}

// -- AppState -----------------------------------------------------------------

#[derive(Debug)]
struct Sequences {
    customer: AtomicU64,
    policy: AtomicU64,
    claim: AtomicU64,
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub customers: Store<Customer>,
    pub policies: Store<Policy>,
    pub claims: Store<Claim>,
    pub config: AppConfig,
    sequences: Arc<Sequences>,
}

impl AppState {
    /// State with the default configuration (sample data seeded, auth off).
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State for `config`, seeding the demo customers when enabled.
    pub fn with_config(config: AppConfig) -> Self {
        let customers = Store::new();
        let mut next_customer = 1;
        if config.seed_sample_data {
            for customer in sample::customers() {
                if let Some(seq) = customer.customer_number.sequence() {
                    next_customer = next_customer.max(seq + 1);
                }
                customers.insert(customer.id, customer);
            }
            tracing::info!(count = customers.len(), "seeded sample customers");
        }

        Self {
            customers,
            policies: Store::new(),
            claims: Store::new(),
            config,
            sequences: Arc::new(Sequences {
                customer: AtomicU64::new(next_customer),
                policy: AtomicU64::new(1),
                claim: AtomicU64::new(1),
            }),
        }
    }

    /// Allocate the next customer number for the current year.
    pub fn next_customer_number(&self) -> CustomerNumber {
        let seq = self.sequences.customer.fetch_add(1, Ordering::Relaxed);
        CustomerNumber::sequential(Utc::now().year(), seq)
    }

    /// Allocate the next policy number for the current year.
    pub fn next_policy_number(&self) -> PolicyNumber {
        let seq = self.sequences.policy.fetch_add(1, Ordering::Relaxed);
        PolicyNumber::sequential(Utc::now().year(), seq)
    }

    /// Allocate the next claim number for the current year.
    pub fn next_claim_number(&self) -> ClaimNumber {
        let seq = self.sequences.claim.fetch_add(1, Ordering::Relaxed);
        ClaimNumber::sequential(Utc::now().year(), seq)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_insert_get_update() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        assert!(store.is_empty());
        store.insert(id, "a".into());
        assert_eq!(store.get(&id).as_deref(), Some("a"));
        let updated = store.update(&id, |v| v.push('b'));
        assert_eq!(updated.as_deref(), Some("ab"));
        assert!(store.update(&Uuid::new_v4(), |_| {}).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_clones_share_data() {
        let a: Store<u32> = Store::new();
        let b = a.clone();
        a.insert(Uuid::new_v4(), 7);
        assert_eq!(b.list(), vec![7]);
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = AppConfig {
            auth_token: Some("s3cret".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn parse_flag_values() {
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn customer_numbers_continue_past_sample() {
        let state = AppState::new();
        let seeded = sample::customers().len() as u64;
        assert_eq!(state.customers.len() as u64, seeded);
        assert_eq!(state.next_customer_number().sequence(), Some(seeded + 1));
        assert_eq!(state.next_customer_number().sequence(), Some(seeded + 2));
    }

    #[test]
    fn unseeded_state_is_empty() {
        let state = AppState::with_config(AppConfig {
            seed_sample_data: false,
            ..Default::default()
        });
        assert!(state.customers.is_empty());
        assert_eq!(state.next_customer_number().sequence(), Some(1));
        assert_eq!(
            state.next_policy_number().as_str().len(),
            "POL-2026-000001".len()
        );
    }
}
