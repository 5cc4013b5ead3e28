//! Prompt templates. Each builder returns the user turn for one request variant.

use audiencelab_core::{Audience, ProfileStyle};

#[must_use]
pub fn audience_question(audience: &Audience, question: &str) -> String {
    format!(
        "Based on the following audience profile, please answer the question.\n\nProfile: {}\n\nQuestion: {question}",
        audience.profile(ProfileStyle::Described)
    )
}

/// Drill-down on one chart label.
#[must_use]
pub fn chart_detail(audience: &Audience, topic: &str, label: &str) -> String {
    format!(
        "For the audience \"{}\" defined by the profile: \"{}\", provide a detailed analysis of their engagement with \"{label}\" regarding the topic \"{topic}\".",
        audience.name,
        audience.profile(ProfileStyle::Described)
    )
}

#[must_use]
pub fn persona_chat(audience: &Audience, question: &str) -> String {
    format!(
        "My Persona Profile is: {}\n\nBased on that, answer this question from my perspective: {question}",
        audience.profile(ProfileStyle::Plain)
    )
}

#[must_use]
pub fn chart_data(audience: &Audience, topic: &str) -> String {
    format!(
        "For the audience \"{}\" defined by the profile: \"{}\", generate data for the following topic: \"{topic}\"",
        audience.name,
        audience.profile(ProfileStyle::Described)
    )
}

#[must_use]
pub fn comparison_chart_data(a: &Audience, b: &Audience, topic: &str) -> String {
    format!(
        "Please generate comparison data for the topic: '{topic}' for the following two audiences. Audience A: '{}'. Audience B: '{}'.",
        a.profile(ProfileStyle::Plain),
        b.profile(ProfileStyle::Plain)
    )
}

#[must_use]
pub fn campaign_ideas(audience: &Audience, goal: &str) -> String {
    format!(
        "Please generate marketing campaign ideas for the following. Audience Profile: {}. Marketing Goal: {goal}.",
        audience.profile(ProfileStyle::Plain)
    )
}

#[must_use]
pub fn audience_comparison(a: &Audience, b: &Audience, question: &str) -> String {
    format!(
        "Please compare the following two audiences on this topic. Audience A Profile: {}. Audience B Profile: {}. Comparison Question: {question}.",
        a.profile(ProfileStyle::Plain),
        b.profile(ProfileStyle::Plain)
    )
}

#[must_use]
pub fn discovery(market: &str) -> String {
    format!(
        "Based on real-world data, identify the key audience segments for the following market: {market}"
    )
}
