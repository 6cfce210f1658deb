//! REST API types shared by the CLI and the frontend.
//!
//! The backend is external; these models decode only what the views need and
//! tolerate missing fields with defaults.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Endpoints
// =============================================================================

/// Backend routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Projects,
    CreatorDashboard(String),
    InvestorDashboard(String),
    Register,
    User(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Projects => "/projects".to_string(),
            Endpoint::CreatorDashboard(id) => format!("/creator/{}/dashboard", id),
            Endpoint::InvestorDashboard(id) => format!("/investor/{}/dashboard", id),
            Endpoint::Register => "/register".to_string(),
            Endpoint::User(wallet) => format!("/user/{}", wallet),
        }
    }

    /// Absolute URL under `base`.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }

    /// Dashboard route for a user's role.
    pub fn dashboard_for(user: &User) -> Self {
        match user.role {
            UserRole::Creator => Endpoint::CreatorDashboard(user.dashboard_id()),
            UserRole::Investor => Endpoint::InvestorDashboard(user.dashboard_id()),
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Creator,
    Investor,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Creator => "Creator",
            UserRole::Investor => "Investor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserRole::Creator => "creator",
            UserRole::Investor => "investor",
        })
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creator" => Ok(UserRole::Creator),
            "investor" => Ok(UserRole::Investor),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Numeric or string record id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A registered platform user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(alias = "walletAddress")]
    pub wallet_address: String,
    pub role: UserRole,
}

impl User {
    /// Username, or the first six characters of the wallet followed by `...`.
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}...", self.wallet_address.chars().take(6).collect::<String>()),
        }
    }

    /// Avatar letter.
    pub fn initial(&self) -> char {
        self.username
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.wallet_address)
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Id used in dashboard routes; the wallet when the backend has no id.
    pub fn dashboard_id(&self) -> String {
        self.id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| self.wallet_address.clone())
    }
}

/// `POST /register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub wallet_address: String,
    pub role: UserRole,
}

/// `POST /register` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Decode `GET /user/{wallet}`, which answers `{"error": ...}` with 200 when unknown.
pub fn parse_user_lookup(wallet: &str, body: Value) -> ApiResult<User> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Err(ApiError::NotFound(format!("{} ({})", wallet, error)));
    }
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// FastAPI-style error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Extract a readable message from an error response body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: Value::String(s) }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}

// =============================================================================
// Projects
// =============================================================================

/// A creator project open for investment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub current_revenue: f64,
    #[serde(default)]
    pub target_revenue: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub nft_token_id: Option<RecordId>,
}

impl Project {
    /// Funding progress in percent; 0 without a target.
    pub fn progress_percent(&self) -> f64 {
        match self.target_revenue {
            Some(target) if target > 0.0 => self.current_revenue / target * 100.0,
            _ => 0.0,
        }
    }

    /// Progress clamped for a bar width.
    pub fn progress_width(&self) -> f64 {
        self.progress_percent().clamp(0.0, 100.0)
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("General")
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("No description available")
    }

    pub fn target_label(&self) -> String {
        self.target_revenue.map(format_usd).unwrap_or_else(|| "∞".to_string())
    }
}

/// Sidebar categories: `(id, label)`.
pub const CATEGORIES: [(&str, &str); 5] = [
    ("all", "All Projects"),
    ("art", "Art"),
    ("music", "Music"),
    ("tech", "Technology"),
    ("gaming", "Gaming"),
];

/// Search and category filter for the project listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search: String,
    pub category: String,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: "all".to_string(),
        }
    }
}

impl ProjectFilter {
    /// Case-insensitive match on name or description, plus category.
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = project.name.to_lowercase().contains(&needle)
            || project
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
        let matches_category =
            self.category == "all" || project.category.as_deref() == Some(self.category.as_str());
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }

    /// Heading for the current category.
    pub fn heading(&self) -> &'static str {
        CATEGORIES
            .iter()
            .find(|(id, _)| *id == self.category)
            .map(|(_, label)| *label)
            .unwrap_or("All Projects")
    }
}

/// `"1 project found"` / `"3 projects found"`.
pub fn found_label(count: usize) -> String {
    format!("{} project{} found", count, if count == 1 { "" } else { "s" })
}

// =============================================================================
// Dashboards
// =============================================================================

/// A recorded investment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: RecordId,
    pub amount: f64,
    #[serde(default)]
    pub nft_token_id: Option<RecordId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Investment {
    /// Calendar date of `created_at`, accepting RFC 3339 or naive timestamps.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// `GET /creator/{id}/dashboard`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatorDashboard {
    pub user: User,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_investors: u64,
    #[serde(default)]
    pub recent_investments: Vec<Investment>,
}

/// `GET /investor/{id}/dashboard`, kept as opaque JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorDashboard(pub Value);

impl InvestorDashboard {
    /// Top-level scalar fields as `(label, value)` pairs, in key order.
    pub fn summary(&self) -> Vec<(String, String)> {
        let Some(obj) = self.0.as_object() else {
            return Vec::new();
        };
        obj.iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((humanize_key(key), rendered))
            })
            .collect()
    }

    pub fn user(&self) -> Option<User> {
        self.0.get("user").cloned().and_then(|u| serde_json::from_value(u).ok())
    }
}

/// Either dashboard, depending on role.
#[derive(Clone, Debug, PartialEq)]
pub enum Dashboard {
    Creator(CreatorDashboard),
    Investor(InvestorDashboard),
}

/// `total_revenue` → `Total revenue`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `$1,234` / `$1,234.5`.
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    match frac {
        0 => format!("{}${}", sign, grouped),
        f if f % 10 == 0 => format!("{}${}.{}", sign, grouped, f / 10),
        f => format!("{}${}.{:02}", sign, grouped, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(name: &str, description: Option<&str>, category: Option<&str>) -> Project {
        Project {
            id: RecordId::Number(1),
            name: name.to_string(),
            description: description.map(String::from),
            category: category.map(String::from),
            image_url: None,
            current_revenue: 250.0,
            target_revenue: Some(1000.0),
            is_active: true,
            nft_token_id: None,
        }
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Projects.path(), "/projects");
        assert_eq!(Endpoint::CreatorDashboard("7".into()).path(), "/creator/7/dashboard");
        assert_eq!(
            Endpoint::InvestorDashboard("abc".into()).url("http://api/"),
            "http://api/investor/abc/dashboard"
        );
    }

    #[test]
    fn test_dashboard_route_by_role() {
        let user: User = serde_json::from_value(json!({
            "walletAddress": "0xAbCdEf0123", "role": "investor"
        }))
        .unwrap();
        assert_eq!(
            Endpoint::dashboard_for(&user),
            Endpoint::InvestorDashboard("0xAbCdEf0123".into())
        );
        assert_eq!(user.display_name(), "0xAbCd...");
        assert_eq!(user.initial(), '0');
    }

    #[test]
    fn test_user_lookup_not_found() {
        let err = parse_user_lookup("0x1", json!({"error": "User not found"})).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let user = parse_user_lookup("0x1", json!({"walletAddress": "0x1", "role": "creator"})).unwrap();
        assert_eq!(user.role, UserRole::Creator);
    }

    #[test]
    fn test_register_body_is_camel_case() {
        let body = serde_json::to_value(RegisterRequest {
            wallet_address: "0x1".into(),
            role: UserRole::Creator,
        })
        .unwrap();
        assert_eq!(body, json!({"walletAddress": "0x1", "role": "creator"}));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(error_message(r#"{"detail":"User already exists"}"#), "User already exists");
        assert_eq!(error_message(r#"{"detail":[{"msg":"bad"}]}"#), r#"[{"msg":"bad"}]"#);
        assert_eq!(error_message("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn test_project_filter() {
        let projects = vec![
            project("Synthwave EP", Some("New album"), Some("music")),
            project("Pixel Quest", None, Some("gaming")),
            project("Murals", Some("Street ART tour"), Some("art")),
        ];

        let mut filter = ProjectFilter::default();
        assert_eq!(filter.apply(&projects).len(), 3);

        filter.search = "art".into();
        let names: Vec<_> = filter.apply(&projects).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Murals"]);

        filter.search.clear();
        filter.category = "gaming".into();
        assert_eq!(filter.apply(&projects).len(), 1);
        assert_eq!(filter.heading(), "Gaming");
        assert_eq!(found_label(1), "1 project found");
        assert_eq!(found_label(0), "0 projects found");
    }

    #[test]
    fn test_project_progress() {
        let mut p = project("X", None, None);
        assert_eq!(p.progress_percent(), 25.0);
        p.current_revenue = 5000.0;
        assert_eq!(p.progress_width(), 100.0);
        p.target_revenue = None;
        assert_eq!(p.progress_percent(), 0.0);
        assert_eq!(p.target_label(), "∞");
        assert_eq!(p.category_label(), "General");
    }

    #[test]
    fn test_creator_dashboard_decoding() {
        let dash: CreatorDashboard = serde_json::from_value(json!({
            "user": {"id": 3, "username": "ava", "wallet_address": "0x9", "role": "creator"},
            "projects": [{"id": "p1", "name": "Tour"}],
            "total_revenue": 12500.5,
            "total_investors": 4,
            "recent_investments": [
                {"id": 1, "amount": 500, "nft_token_id": 2, "created_at": "2025-03-01T10:00:00Z"},
                {"id": 2, "amount": 250, "created_at": "2025-03-02T08:30:00.123"}
            ]
        }))
        .unwrap();

        assert_eq!(dash.user.dashboard_id(), "3");
        assert_eq!(dash.projects[0].id, RecordId::Text("p1".into()));
        assert_eq!(dash.recent_investments[0].created_date(), NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(dash.recent_investments[1].created_date(), NaiveDate::from_ymd_opt(2025, 3, 2));
    }

    #[test]
    fn test_investor_summary() {
        let dash = InvestorDashboard(json!({
            "total_invested": 1500,
            "user": {"wallet_address": "0x1", "role": "investor"},
            "nft_count": 3
        }));
        let summary = dash.summary();
        assert!(summary.contains(&("Total invested".to_string(), "1500".to_string())));
        assert!(summary.contains(&("Nft count".to_string(), "3".to_string())));
        assert_eq!(summary.len(), 2);
        assert_eq!(dash.user().map(|u| u.role), Some(UserRole::Investor));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(1234.0), "$1,234");
        assert_eq!(format_usd(1234567.5), "$1,234,567.5");
        assert_eq!(format_usd(12.34), "$12.34");
    }
}
