//! HTTP client for the cash-flow API.
//!
//! Mirrors the backend's endpoint surface: transactions, daily balance
//! reports, and the OAuth password-grant login. When the configuration
//! enables mocks, every call is answered by a private
//! [`MockTransactionStore`] instead of the network, so the rest of the
//! application cannot tell the difference.

use std::sync::{Mutex, MutexGuard};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use shared::{
    DailyBalance, LoginCredentials, LoginResponse, PaginatedResult, Transaction, TransactionInput,
};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::pagination::normalize;
use crate::store::MockTransactionStore;

pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Mutex<Option<String>>,
    mock: Option<Mutex<MockTransactionStore>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let mock = if config.use_mocks {
            info!("mock mode enabled, API calls will be served from memory");
            Some(Mutex::new(MockTransactionStore::seeded()))
        } else {
            None
        };

        Self {
            base_url: config.api_url,
            http: Client::new(),
            token: Mutex::new(None),
            mock,
        }
    }

    /// Client configured from `API_URL` / `USE_MOCKS` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    /// Mock-mode client answering from the given store instead of the
    /// seeded fixture. Useful for tests that need a controlled dataset.
    pub fn with_mock_store(store: MockTransactionStore) -> Self {
        Self {
            base_url: String::new(),
            http: Client::new(),
            token: Mutex::new(None),
            mock: Some(Mutex::new(store)),
        }
    }

    /// Exchange credentials for a bearer token and remember it for
    /// subsequent requests.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        if self.mock.is_some() {
            let response = LoginResponse {
                access_token: "mock-token".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 3600,
                scope: Some("openid profile email".to_string()),
            };
            self.set_token(response.access_token.clone())?;
            return Ok(response);
        }

        let params = [
            ("grant_type", "password"),
            ("client_id", "kong"),
            ("client_secret", "kong-client-secret"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", "openid profile email"),
        ];

        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .form(&params)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let login: LoginResponse = response.json().await?;

        info!(username = %credentials.username, "login succeeded");
        self.set_token(login.access_token.clone())?;
        Ok(login)
    }

    pub async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.transactions().to_vec());
        }

        let response = Self::check_status(self.get("/transaction").send().await?).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single transaction; an unknown id is a domain error the
    /// caller shows to the user, not a malformed-envelope fallback.
    pub async fn get_transaction(&self, id: u64) -> Result<Transaction> {
        if let Some(mock) = &self.mock {
            return Self::lock(mock)?
                .get(id)
                .cloned()
                .ok_or(ApiError::TransactionNotFound(id));
        }

        let response = self.get(&format!("/transaction/{}", id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::TransactionNotFound(id));
        }
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn create_transaction(&self, input: TransactionInput) -> Result<Transaction> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.create(input));
        }

        let response = self
            .post("/transaction")
            .json(&input)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn get_daily_balance(&self, date: &str) -> Result<DailyBalance> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.daily_balance(date));
        }

        let response = self
            .get(&format!("/daily-balance/{}", date))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn get_daily_balance_period(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<DailyBalance>> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.daily_balance_period(start_date, end_date));
        }

        let response = self
            .get("/daily-balance/period")
            .query(&[("startDate", start_date), ("endDate", end_date)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Paginated transaction listing. The live response body is decoded as
    /// raw JSON and normalized, so envelope drift between backend versions
    /// never reaches the display layer.
    pub async fn get_transactions_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<Transaction>> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.page(page, page_size));
        }

        let response = self
            .get("/transaction")
            .query(&[("pageNumber", page), ("pageSize", page_size)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let raw: Value = response.json().await?;
        Ok(normalize(&raw, page, page_size))
    }

    /// Paginated daily balance reports, normalized the same way as
    /// [`get_transactions_page`].
    pub async fn get_daily_balances_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<DailyBalance>> {
        if let Some(mock) = &self.mock {
            return Ok(Self::lock(mock)?.daily_balances_page(page, page_size));
        }

        let response = self
            .get("/daily-balance")
            .query(&[("pageNumber", page), ("pageSize", page_size)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let raw: Value = response.json().await?;
        Ok(normalize(&raw, page, page_size))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.post(format!("{}{}", self.base_url, path)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.lock() {
            Ok(token) => match token.as_ref() {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            // Poisoned token lock: the request goes out unauthenticated
            // and the server's status is surfaced as usual
            Err(_) => request,
        }
    }

    fn set_token(&self, token: String) -> Result<()> {
        let mut guard = self.token.lock().map_err(|_| ApiError::LockPoisoned)?;
        *guard = Some(token);
        Ok(())
    }

    fn lock(mock: &Mutex<MockTransactionStore>) -> Result<MutexGuard<'_, MockTransactionStore>> {
        mock.lock().map_err(|_| ApiError::LockPoisoned)
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(%status, "request failed");
        Err(ApiError::UnexpectedStatus { status, body })
    }
}
