//! Request variants exposed to callers.
//!
//! Every variant is one prompt/instruction pair and one [`GeminiClient::generate`]
//! call; they differ only in the instruction text and the expected reply shape.

use audiencelab_core::{
    Audience, ChartData, ChartDataItem, ComparisonChartDataItem, DiscoveredAudience,
    ResearchResult,
};
use serde::de::DeserializeOwned;

use crate::client::GeminiClient;
use crate::error::GatewayError;
use crate::normalize::{normalize_sources, parse_structured};
use crate::{instructions, prompts};

/// The fixed request variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchKind {
    MarketResearch,
    AudienceResearch,
    PersonaChat,
    ChartData,
    ComparisonChartData,
    CampaignIdeas,
    AudienceComparison,
    AudienceDiscovery,
}

impl ResearchKind {
    #[must_use]
    pub fn instruction(self) -> &'static str {
        match self {
            ResearchKind::MarketResearch => instructions::MARKET,
            ResearchKind::AudienceResearch => instructions::AUDIENCE,
            ResearchKind::PersonaChat => instructions::CHAT,
            ResearchKind::ChartData => instructions::CHARTS,
            ResearchKind::ComparisonChartData => instructions::COMPARE_CHARTS,
            ResearchKind::CampaignIdeas => instructions::CAMPAIGN,
            ResearchKind::AudienceComparison => instructions::COMPARE,
            ResearchKind::AudienceDiscovery => instructions::DISCOVERY,
        }
    }

    /// Human-readable name used in errors and logs.
    #[must_use]
    pub fn context(self) -> &'static str {
        match self {
            ResearchKind::MarketResearch => "market research",
            ResearchKind::AudienceResearch => "audience research",
            ResearchKind::PersonaChat => "chat response",
            ResearchKind::ChartData => "chart data",
            ResearchKind::ComparisonChartData => "comparison chart data",
            ResearchKind::CampaignIdeas => "campaign ideas",
            ResearchKind::AudienceComparison => "audience comparison",
            ResearchKind::AudienceDiscovery => "audience discovery",
        }
    }
}

/// Builds prompts from audiences and user input and normalizes Gemini replies.
pub struct ResearchGateway {
    client: GeminiClient,
}

impl ResearchGateway {
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Free-form market question.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank query, otherwise any error
    /// from [`GeminiClient::generate`].
    pub async fn market_research(&self, query: &str) -> Result<ResearchResult, GatewayError> {
        require_text("query", query)?;
        self.narrative(ResearchKind::MarketResearch, query).await
    }

    /// Question about a single audience.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank question, otherwise any
    /// error from [`GeminiClient::generate`].
    pub async fn audience_research(
        &self,
        audience: &Audience,
        question: &str,
    ) -> Result<ResearchResult, GatewayError> {
        require_text("question", question)?;
        self.narrative(
            ResearchKind::AudienceResearch,
            &prompts::audience_question(audience, question),
        )
        .await
    }

    /// Detailed analysis behind one chart label.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank topic or label, otherwise
    /// any error from [`GeminiClient::generate`].
    pub async fn chart_detail(
        &self,
        audience: &Audience,
        topic: &str,
        label: &str,
    ) -> Result<ResearchResult, GatewayError> {
        require_text("topic", topic)?;
        require_text("label", label)?;
        self.narrative(
            ResearchKind::AudienceResearch,
            &prompts::chart_detail(audience, topic, label),
        )
        .await
    }

    /// Answer in the voice of the audience. Citations are not returned.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank question, otherwise any
    /// error from [`GeminiClient::generate`].
    pub async fn persona_chat(
        &self,
        audience: &Audience,
        question: &str,
    ) -> Result<String, GatewayError> {
        require_text("question", question)?;
        let kind = ResearchKind::PersonaChat;
        let generation = self
            .client
            .generate(
                kind.context(),
                kind.instruction(),
                &prompts::persona_chat(audience, question),
            )
            .await?;
        Ok(generation.text)
    }

    /// Chart rows for one audience and topic.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank topic,
    /// [`GatewayError::Parse`] if the reply is not a `{label, value}` array,
    /// otherwise any error from [`GeminiClient::generate`].
    pub async fn chart_data(
        &self,
        audience: &Audience,
        topic: &str,
    ) -> Result<ChartData<ChartDataItem>, GatewayError> {
        require_text("topic", topic)?;
        self.structured(ResearchKind::ChartData, &prompts::chart_data(audience, topic))
            .await
    }

    /// Chart rows comparing two audiences on one topic.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank topic or identical audiences,
    /// [`GatewayError::Parse`] if the reply has the wrong shape, otherwise any
    /// error from [`GeminiClient::generate`].
    pub async fn comparison_chart_data(
        &self,
        audience_a: &Audience,
        audience_b: &Audience,
        topic: &str,
    ) -> Result<ChartData<ComparisonChartDataItem>, GatewayError> {
        require_distinct(audience_a, audience_b)?;
        require_text("topic", topic)?;
        self.structured(
            ResearchKind::ComparisonChartData,
            &prompts::comparison_chart_data(audience_a, audience_b, topic),
        )
        .await
    }

    /// Campaign ideas for an audience and a marketing goal.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank goal, otherwise any error
    /// from [`GeminiClient::generate`].
    pub async fn campaign_ideas(
        &self,
        audience: &Audience,
        goal: &str,
    ) -> Result<ResearchResult, GatewayError> {
        require_text("goal", goal)?;
        self.narrative(
            ResearchKind::CampaignIdeas,
            &prompts::campaign_ideas(audience, goal),
        )
        .await
    }

    /// Side-by-side narrative comparison of two audiences.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank question or identical
    /// audiences, otherwise any error from [`GeminiClient::generate`].
    pub async fn compare_audiences(
        &self,
        audience_a: &Audience,
        audience_b: &Audience,
        question: &str,
    ) -> Result<ResearchResult, GatewayError> {
        require_distinct(audience_a, audience_b)?;
        require_text("question", question)?;
        self.narrative(
            ResearchKind::AudienceComparison,
            &prompts::audience_comparison(audience_a, audience_b, question),
        )
        .await
    }

    /// Consumer segments within a market.
    ///
    /// # Errors
    ///
    /// [`GatewayError::InvalidRequest`] for a blank market,
    /// [`GatewayError::Parse`] if the reply is not an `{audienceName, description}`
    /// array, otherwise any error from [`GeminiClient::generate`].
    pub async fn discover_audiences(
        &self,
        market: &str,
    ) -> Result<ChartData<DiscoveredAudience>, GatewayError> {
        require_text("market", market)?;
        self.structured(ResearchKind::AudienceDiscovery, &prompts::discovery(market))
            .await
    }

    async fn narrative(
        &self,
        kind: ResearchKind,
        prompt: &str,
    ) -> Result<ResearchResult, GatewayError> {
        let generation = self
            .client
            .generate(kind.context(), kind.instruction(), prompt)
            .await?;
        Ok(ResearchResult {
            answer: generation.text,
            sources: normalize_sources(&generation.citations),
        })
    }

    async fn structured<T: DeserializeOwned>(
        &self,
        kind: ResearchKind,
        prompt: &str,
    ) -> Result<ChartData<T>, GatewayError> {
        let generation = self
            .client
            .generate(kind.context(), kind.instruction(), prompt)
            .await?;
        let data = parse_structured(kind.context(), &generation.text).inspect_err(|e| {
            tracing::warn!(context = kind.context(), error = %e, "structured reply did not parse");
        })?;
        Ok(ChartData {
            data,
            sources: normalize_sources(&generation.citations),
        })
    }
}

fn require_text(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_distinct(a: &Audience, b: &Audience) -> Result<(), GatewayError> {
    if a.id == b.id {
        return Err(GatewayError::InvalidRequest(
            "select two different audiences to compare".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_distinct_context() {
        let kinds = [
            ResearchKind::MarketResearch,
            ResearchKind::AudienceResearch,
            ResearchKind::PersonaChat,
            ResearchKind::ChartData,
            ResearchKind::ComparisonChartData,
            ResearchKind::CampaignIdeas,
            ResearchKind::AudienceComparison,
            ResearchKind::AudienceDiscovery,
        ];
        let contexts: std::collections::HashSet<_> = kinds.iter().map(|k| k.context()).collect();
        assert_eq!(contexts.len(), kinds.len());
    }

    #[test]
    fn require_text_rejects_whitespace() {
        assert!(matches!(
            require_text("topic", "  \n"),
            Err(GatewayError::InvalidRequest(ref m)) if m == "topic must not be empty"
        ));
        assert!(require_text("topic", "social media").is_ok());
    }
}
