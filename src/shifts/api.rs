//! Typed calls against the `/shifts` endpoints

use crate::error::Result;
use crate::fetch::ApiClient;

use super::types::{NewShift, Shift};

const SHIFTS: &str = "shifts";

/// Client for the shift resource
#[derive(Debug, Clone)]
pub struct ShiftsApi {
    client: ApiClient,
}

impl ShiftsApi {
    /// Create a new ShiftsApi
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying HTTP client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /shifts`
    pub async fn list(&self) -> Result<Vec<Shift>> {
        self.client.get(&[SHIFTS]).execute::<Vec<Shift>>().await
    }

    /// `POST /shifts`, returning the created shift with its id
    pub async fn create(&self, draft: &NewShift) -> Result<Shift> {
        self.client.post(&[SHIFTS]).json(draft)?.execute::<Shift>().await
    }

    /// `PUT /shifts/{id}` with the full shift
    pub async fn update(&self, shift: &Shift) -> Result<Shift> {
        self.client
            .put(&[SHIFTS, shift.id.as_str()])
            .json(shift)?
            .execute::<Shift>()
            .await
    }

    /// `DELETE /shifts/{id}`
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&[SHIFTS, id]).execute_discard().await
    }
}
