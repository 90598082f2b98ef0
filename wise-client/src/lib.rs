//! # Wise Client
//!
//! A typed `reqwest` adapter implementing the [`PaymentsApi`] port against
//! the Wise REST API.

mod config;
mod wire;

pub use config::{Environment, PRODUCTION_URL, SANDBOX_URL, WiseConfig};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use wise_types::{
    ApiError, Currency, FundingMethod, FundingOutcome, PaymentsApi, Profile, ProfileId, Quote,
    QuoteRequest, Recipient, Transfer, TransferId, TransferRequest,
};

use wire::{
    FundBody, FundResponseDto, ProfileDto, QuoteBody, QuoteDto, RecipientListDto, TransferBody,
    TransferDto, error_message,
};

/// Header carrying the one-time token of a strong customer authentication challenge.
const STEP_UP_HEADER: &str = "x-2fa-approval";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, message } => ApiError::Remote { status, message },
            ClientError::Json(e) => ApiError::Decode(e.to_string()),
            ClientError::Http(e) if e.is_decode() => ApiError::Decode(e.to_string()),
            ClientError::Http(e) => ApiError::Transport(e.to_string()),
            ClientError::Config(msg) => ApiError::Transport(msg),
        }
    }
}

/// Wise API client.
pub struct WiseClient {
    base_url: String,
    api_token: String,
    http: Client,
}

impl WiseClient {
    /// Creates a new client from an explicit configuration.
    pub fn new(config: WiseConfig) -> Result<Self, ClientError> {
        if config.api_token.trim().is_empty() {
            return Err(ClientError::Config("Wise API token must not be empty".into()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
            http: builder.build()?,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        tracing::debug!(path, "GET");
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.send_post(path, body).await?;
        self.handle_response(resp).await
    }

    async fn send_post<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::debug!(path, "POST");
        Ok(self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await?)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), %message, "Wise API request failed");
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl PaymentsApi for WiseClient {
    async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        let profiles: Vec<ProfileDto> = self.get("/v1/profiles", &[]).await?;
        // Profile kinds the tools cannot act for are left out.
        Ok(profiles
            .into_iter()
            .filter_map(|dto| match Profile::try_from(dto) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping profile");
                    None
                }
            })
            .collect())
    }

    async fn get_profile(&self, profile_id: &ProfileId) -> Result<Profile, ApiError> {
        let profile: ProfileDto = self
            .get(&format!("/v1/profiles/{}", profile_id), &[])
            .await?;
        profile.try_into()
    }

    async fn list_recipients(
        &self,
        profile_id: &ProfileId,
        currency: Option<&Currency>,
    ) -> Result<Vec<Recipient>, ApiError> {
        let mut query = vec![("profile", profile_id.as_str())];
        if let Some(currency) = currency {
            query.push(("currency", currency.code()));
        }
        let list: RecipientListDto = self.get("/v2/accounts", &query).await?;
        Ok(list.into_recipients())
    }

    async fn create_quote(&self, req: QuoteRequest) -> Result<Quote, ApiError> {
        let path = format!("/v3/profiles/{}/quotes", req.profile_id);
        let quote: QuoteDto = self.post(&path, &QuoteBody::from(&req)).await?;
        Ok(quote.into_quote(&req))
    }

    async fn create_transfer(&self, req: TransferRequest) -> Result<Transfer, ApiError> {
        let transfer: TransferDto = self
            .post("/v1/transfers", &TransferBody::from(&req))
            .await?;
        Ok(transfer.into_transfer(req))
    }

    async fn fund_transfer(
        &self,
        profile_id: &ProfileId,
        transfer_id: &TransferId,
        method: FundingMethod,
    ) -> Result<FundingOutcome, ApiError> {
        let path = format!(
            "/v3/profiles/{}/transfers/{}/payments",
            profile_id, transfer_id
        );
        let resp = self
            .send_post(
                &path,
                &FundBody {
                    method: method.as_str(),
                },
            )
            .await?;

        // A step-up challenge comes back as 403 with the one-time token in a header.
        if resp.status() == StatusCode::FORBIDDEN {
            let token = resp
                .headers()
                .get(STEP_UP_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            if token.is_some() {
                tracing::info!(%transfer_id, "Funding requires strong customer authentication");
                return Ok(FundingOutcome::classify(token, None, None));
            }
        }

        let fund: FundResponseDto = self.handle_response(resp).await?;
        Ok(fund.into())
    }
}
