//! Roster Rust Client Library
//!
//! A Rust client for the roster shift-scheduling API: a preconfigured HTTP
//! client that forwards a stored bearer token, and a reactive store that
//! keeps a local copy of the user's shifts.

pub mod config;
pub mod error;
pub mod fetch;
pub mod shifts;
pub mod storage;

use std::sync::Arc;

use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::shifts::{ShiftStore, ShiftsApi};
use crate::storage::TokenStore;

/// The main entry point for the roster client
#[derive(Debug, Clone)]
pub struct Roster {
    /// HTTP client used for requests
    pub client: ApiClient,
}

impl Roster {
    /// Create a new client with the given options
    ///
    /// # Example
    ///
    /// ```
    /// use roster_client::{config::ClientOptions, Roster};
    ///
    /// let roster = Roster::new(ClientOptions::default()).unwrap();
    /// assert_eq!(roster.client.base_url().as_str(), "http://localhost:8080/api");
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(options)?,
        })
    }

    /// Create a new client whose base address comes from
    /// `ROSTER_API_BASE_URL`, defaulting to `http://localhost:8080/api`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientOptions::from_env())
    }

    /// Forward the token kept in `store` as a bearer token on every request
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use roster_client::{config::ClientOptions, storage::MemoryTokenStore, Roster};
    ///
    /// let tokens = Arc::new(MemoryTokenStore::with_entry("authToken", "secret"));
    /// let roster = Roster::new(ClientOptions::default())
    ///     .unwrap()
    ///     .with_token_store(tokens);
    /// ```
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.client = self.client.with_token_store(store);
        self
    }

    /// Endpoint calls for the shift resource
    pub fn shifts(&self) -> ShiftsApi {
        ShiftsApi::new(self.client.clone())
    }

    /// A fresh, empty shift store. Share it by cloning.
    pub fn shift_store(&self) -> ShiftStore {
        ShiftStore::new(self.client.clone())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::shifts::{NewShift, Shift, ShiftState, ShiftStore, ShiftsApi};
    pub use crate::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
    pub use crate::Roster;
}
