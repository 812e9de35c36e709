//! HTTP client for the roster API
//!
//! [`ApiClient`] resolves request URLs against the configured base address,
//! sends `Content-Type: application/json` on every request and runs each
//! registered [`RequestInterceptor`] on the built request before it goes out.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::storage::TokenStore;

/// Hook run on every outgoing request before it is sent.
///
/// Returning an error rejects the request; nothing is sent.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Inspect or modify the request
    async fn intercept(&self, request: &mut Request) -> Result<()>;
}

/// Sets `Authorization: Bearer <token>` from a [`TokenStore`] entry.
///
/// When no token (or an empty one) is stored the request is left untouched.
pub struct BearerTokenInterceptor {
    store: Arc<dyn TokenStore>,
    key: String,
}

impl BearerTokenInterceptor {
    /// Read the token stored under `key`
    pub fn new(store: Arc<dyn TokenStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl RequestInterceptor for BearerTokenInterceptor {
    async fn intercept(&self, request: &mut Request) -> Result<()> {
        let token = match self.store.get(&self.key).await? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(()),
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|err| {
            Error::invalid_header(format!("stored token is not a valid header value: {}", err))
        })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Preconfigured client shared by every API call
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    options: ClientOptions,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("options", &self.options)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl ApiClient {
    /// Create a new client from options
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_client(options, Client::new())
    }

    /// Create a new client reusing an existing `reqwest::Client`
    pub fn with_client(options: ClientOptions, client: Client) -> Result<Self> {
        let base_url = Url::parse(&options.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL {} cannot carry a path",
                options.base_url
            )));
        }

        Ok(Self {
            base_url,
            client,
            options,
            interceptors: Vec::new(),
        })
    }

    /// Register an interceptor. Interceptors run in registration order.
    pub fn with_interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Attach the bearer token stored under the configured token key
    pub fn with_token_store(self, store: Arc<dyn TokenStore>) -> Self {
        let key = self.options.token_key.clone();
        self.with_interceptor(BearerTokenInterceptor::new(store, &key))
    }

    /// The resolved base address
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The options this client was built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Resolve path segments against the base address. Each segment is
    /// percent-encoded on its own.
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot-be-a-base URLs are rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Create a request with an arbitrary method
    pub fn request(&self, method: Method, segments: &[&str]) -> FetchBuilder<'_> {
        FetchBuilder::new(self, method, self.url_for(segments))
    }

    /// Create a GET request
    pub fn get(&self, segments: &[&str]) -> FetchBuilder<'_> {
        self.request(Method::GET, segments)
    }

    /// Create a POST request
    pub fn post(&self, segments: &[&str]) -> FetchBuilder<'_> {
        self.request(Method::POST, segments)
    }

    /// Create a PUT request
    pub fn put(&self, segments: &[&str]) -> FetchBuilder<'_> {
        self.request(Method::PUT, segments)
    }

    /// Create a DELETE request
    pub fn delete(&self, segments: &[&str]) -> FetchBuilder<'_> {
        self.request(Method::DELETE, segments)
    }
}

/// Helper for building and executing a single request
pub struct FetchBuilder<'a> {
    api: &'a ApiClient,
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
}

impl<'a> FetchBuilder<'a> {
    fn new(api: &'a ApiClient, method: Method, url: Url) -> Self {
        Self {
            api,
            method,
            url,
            body: None,
        }
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Build the request and run the interceptors over it
    async fn build(&self) -> Result<Request> {
        let mut req = self
            .api
            .client
            .request(self.method.clone(), self.url.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(timeout) = self.api.options.request_timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        let mut request = req.build()?;
        for interceptor in &self.api.interceptors {
            interceptor.intercept(&mut request).await?;
        }
        Ok(request)
    }

    /// Execute the request and return the raw response, whatever its status
    pub async fn execute_raw(&self) -> Result<Response> {
        let request = self.build().await?;
        debug!(method = %self.method, url = %self.url, "sending request");
        Ok(self.api.client.execute(request).await?)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let response = ensure_success(self.execute_raw().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Execute the request, ignoring any response body
    pub async fn execute_discard(&self) -> Result<()> {
        ensure_success(self.execute_raw().await?).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        status: status.as_u16(),
        body,
    })
}
