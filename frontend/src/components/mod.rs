//! UI Components for the FlowMint application.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with wallet connection
//! - [`Hero`] - Main title and links
//! - [`Footer`] - Page footer with contract addresses
//!
//! # Pages
//! - [`HomePage`] - Action panels (`/`)
//! - [`ProjectsPage`] - Project listing with search and categories (`/home`)
//! - [`DashboardPage`] - Login, registration and role dashboards (`/dashboard`)
//!
//! # Feature Components
//! - [`MintPanel`], [`CreatorPanel`], [`InvestorPanel`] - Tracked contract writes
//! - [`ProjectCard`] - Project summary with an invest (mint) button
//! - [`StatusModal`] - Transaction status for one button

mod header;
mod hero;
mod home;
mod panels;
mod projects;
mod dashboard;
mod status_modal;
mod footer;

pub use header::*;
pub use hero::*;
pub use home::*;
pub use panels::*;
pub use projects::*;
pub use dashboard::*;
pub use status_modal::*;
pub use footer::*;
