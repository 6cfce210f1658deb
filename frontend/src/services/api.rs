//! HTTP client for the FlowMint backend.

use flowmint::api::{
    error_message, parse_user_lookup, CreatorDashboard, Dashboard, Endpoint, InvestorDashboard,
    Project, RegisterRequest, RegisterResponse, User, UserRole,
};
use flowmint::ApiError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::app_config;

fn url(endpoint: &Endpoint) -> String {
    endpoint.url(&app_config().api_url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status() == 404 {
        let text = response.text().await.unwrap_or_else(|_| "Not found".to_string());
        return Err(ApiError::NotFound(error_message(&text)));
    }
    if !response.ok() {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Status {
            status: response.status(),
            body: error_message(&text),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get<T: DeserializeOwned>(endpoint: Endpoint) -> Result<T, ApiError> {
    let response = Request::get(&url(&endpoint))
        .send()
        .await
        .map_err(|e| ApiError::Http(e.to_string()))?;
    decode(response).await
}

pub async fn fetch_projects() -> Result<Vec<Project>, ApiError> {
    get(Endpoint::Projects).await
}

/// Dashboard matching the user's role.
pub async fn fetch_dashboard(user: &User) -> Result<Dashboard, ApiError> {
    let endpoint = Endpoint::dashboard_for(user);
    Ok(match user.role {
        UserRole::Creator => Dashboard::Creator(get::<CreatorDashboard>(endpoint).await?),
        UserRole::Investor => Dashboard::Investor(get::<InvestorDashboard>(endpoint).await?),
    })
}

pub async fn fetch_user(wallet: &str) -> Result<User, ApiError> {
    let body: Value = get(Endpoint::User(wallet.to_string())).await?;
    parse_user_lookup(wallet, body)
}

pub async fn register(request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
    let response = Request::post(&url(&Endpoint::Register))
        .json(request)
        .map_err(|e| ApiError::Http(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Http(e.to_string()))?;
    decode(response).await
}
