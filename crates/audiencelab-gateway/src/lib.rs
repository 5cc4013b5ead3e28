//! Research gateway for AudienceLab.
//!
//! Turns audience profiles and user questions into prompts, sends each one as
//! a single grounded `generateContent` call to Gemini, and normalizes the
//! reply into either narrative text with citations or typed chart rows.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod instructions;
pub mod normalize;
pub mod prompts;
pub mod types;

pub use client::{GeminiClient, Generation};
pub use dashboard::{DashboardWidget, WidgetReport, DASHBOARD_WIDGETS};
pub use error::GatewayError;
pub use gateway::{ResearchGateway, ResearchKind};
pub use normalize::{normalize_sources, parse_structured, strip_json_fence};
