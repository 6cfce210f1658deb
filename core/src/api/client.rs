//! Native REST client for the FlowMint backend.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    error_message, parse_user_lookup, CreatorDashboard, Dashboard, Endpoint, InvestorDashboard,
    Project, RegisterRequest, RegisterResponse, User, UserRole,
};
use crate::error::{ApiError, ApiResult};

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn projects(&self) -> ApiResult<Vec<Project>> {
        self.get(Endpoint::Projects).await
    }

    pub async fn creator_dashboard(&self, id: &str) -> ApiResult<CreatorDashboard> {
        self.get(Endpoint::CreatorDashboard(id.to_string())).await
    }

    pub async fn investor_dashboard(&self, id: &str) -> ApiResult<InvestorDashboard> {
        self.get(Endpoint::InvestorDashboard(id.to_string())).await
    }

    /// Dashboard for `role`.
    pub async fn dashboard(&self, role: UserRole, id: &str) -> ApiResult<Dashboard> {
        Ok(match role {
            UserRole::Creator => Dashboard::Creator(self.creator_dashboard(id).await?),
            UserRole::Investor => Dashboard::Investor(self.investor_dashboard(id).await?),
        })
    }

    /// Look up a user by wallet address.
    pub async fn user(&self, wallet: &str) -> ApiResult<User> {
        let body: Value = self.get(Endpoint::User(wallet.to_string())).await?;
        parse_user_lookup(wallet, body)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        let url = Endpoint::Register.url(&self.base_url);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Self::decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<T> {
        let url = endpoint.url(&self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(error_message(&body)));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_base_url() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
