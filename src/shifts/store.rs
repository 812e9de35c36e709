//! Reactive shift store
//!
//! [`ShiftStore`] mirrors the server's shift list locally and publishes every
//! change through a `tokio::sync::watch` channel. Clones share the same
//! state, so one store can be handed to every component that needs it.
//!
//! Operations are not coordinated with each other: when two run at once
//! their results are applied in completion order, and `is_loading` is
//! cleared by whichever finishes first.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::error::Result;
use crate::fetch::ApiClient;

use super::api::ShiftsApi;
use super::types::{NewShift, Shift};

/// Snapshot of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftState {
    /// Shifts in server order, newly created ones appended
    pub shifts: Vec<Shift>,

    /// True while a request is in flight
    pub is_loading: bool,
}

/// Local, observable mirror of the server's shifts
#[derive(Debug, Clone)]
pub struct ShiftStore {
    api: ShiftsApi,
    state: Arc<watch::Sender<ShiftState>>,
}

/// Holds `is_loading` up for as long as it lives.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<ShiftState>,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a watch::Sender<ShiftState>) -> Self {
        state.send_modify(|s| s.is_loading = true);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_loading = false);
    }
}

impl ShiftStore {
    /// Create an empty store on top of an API client
    pub fn new(client: ApiClient) -> Self {
        Self::with_api(ShiftsApi::new(client))
    }

    /// Create an empty store on top of an existing ShiftsApi
    pub fn with_api(api: ShiftsApi) -> Self {
        let (state, _) = watch::channel(ShiftState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// The endpoint client used by this store
    pub fn api(&self) -> &ShiftsApi {
        &self.api
    }

    /// Current snapshot
    pub fn state(&self) -> ShiftState {
        self.state.borrow().clone()
    }

    /// Current shifts
    pub fn shifts(&self) -> Vec<Shift> {
        self.state.borrow().shifts.clone()
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Observe every change to the store
    pub fn subscribe(&self) -> watch::Receiver<ShiftState> {
        self.state.subscribe()
    }

    /// Replace the local list with the server's.
    ///
    /// On failure the list is left as it was.
    pub async fn fetch_shifts(&self) -> Result<()> {
        let _loading = LoadingGuard::start(&self.state);

        match self.api.list().await {
            Ok(shifts) => {
                debug!(count = shifts.len(), "replacing local shift list");
                self.state.send_modify(|s| s.shifts = shifts);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to load shifts");
                Err(err)
            }
        }
    }

    /// Create a shift and append the server's copy to the local list
    pub async fn create_shift(&self, draft: &NewShift) -> Result<Shift> {
        let _loading = LoadingGuard::start(&self.state);

        match self.api.create(draft).await {
            Ok(created) => {
                debug!(id = %created.id, "appending created shift");
                self.state.send_modify(|s| s.shifts.push(created.clone()));
                Ok(created)
            }
            Err(err) => {
                error!(error = %err, "failed to create shift");
                Err(err)
            }
        }
    }

    /// Update a shift and swap the server's copy into the local list.
    ///
    /// Only the first entry with a matching id is replaced. If the local list
    /// has no such entry it is left unchanged.
    pub async fn update_shift(&self, shift: &Shift) -> Result<Shift> {
        let _loading = LoadingGuard::start(&self.state);

        match self.api.update(shift).await {
            Ok(updated) => {
                let replaced = self.state.send_if_modified(|s| {
                    match s.shifts.iter_mut().find(|entry| entry.id == shift.id) {
                        Some(entry) => {
                            *entry = updated.clone();
                            true
                        }
                        None => false,
                    }
                });
                if !replaced {
                    debug!(id = %shift.id, "updated shift is not in the local list");
                }
                Ok(updated)
            }
            Err(err) => {
                error!(id = %shift.id, error = %err, "failed to update shift");
                Err(err)
            }
        }
    }

    /// Delete a shift and drop every local entry with its id
    pub async fn delete_shift(&self, id: &str) -> Result<()> {
        let _loading = LoadingGuard::start(&self.state);

        match self.api.delete(id).await {
            Ok(()) => {
                self.state.send_if_modified(|s| {
                    let before = s.shifts.len();
                    s.shifts.retain(|entry| entry.id != id);
                    s.shifts.len() != before
                });
                Ok(())
            }
            Err(err) => {
                error!(id = %id, error = %err, "failed to delete shift");
                Err(err)
            }
        }
    }
}
