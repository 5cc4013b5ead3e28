//! Audience dashboard: a fixed set of questions asked concurrently.

use audiencelab_core::{Audience, ResearchResult};
use futures::future::join_all;

use crate::error::GatewayError;
use crate::gateway::ResearchGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardWidget {
    pub id: &'static str,
    pub title: &'static str,
    pub question: &'static str,
}

pub const DASHBOARD_WIDGETS: [DashboardWidget; 4] = [
    DashboardWidget {
        id: "characteristics",
        title: "Key Characteristics & Concerns",
        question: "What are the key characteristics and primary concerns of this audience?",
    },
    DashboardWidget {
        id: "social",
        title: "Social Media Usage",
        question: "What social media platforms do they use most, and for what purposes?",
    },
    DashboardWidget {
        id: "purchasing",
        title: "Online Purchasing Habits",
        question: "Describe their online purchasing habits, including preferred product categories and payment methods.",
    },
    DashboardWidget {
        id: "news",
        title: "Primary News & Information Sources",
        question: "What are their primary sources for news and information?",
    },
];

/// Outcome of one widget. Failures are per widget and never shared.
#[derive(Debug)]
pub struct WidgetReport {
    pub widget: &'static DashboardWidget,
    pub result: Result<ResearchResult, GatewayError>,
}

impl ResearchGateway {
    /// Runs every dashboard widget concurrently and reports each in widget order.
    pub async fn dashboard(&self, audience: &Audience) -> Vec<WidgetReport> {
        let requests = DASHBOARD_WIDGETS.iter().map(|widget| async move {
            let result = self.audience_research(audience, widget.question).await;
            if let Err(e) = &result {
                tracing::warn!(widget = widget.id, error = %e, "dashboard widget failed");
            }
            WidgetReport { widget, result }
        });
        join_all(requests).await
    }
}
