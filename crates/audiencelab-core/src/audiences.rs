use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::research::DiscoveredAudience;
use crate::CoreError;

/// Owner recorded on every audience until multi-user support exists.
pub const OWNER_PLACEHOLDER: &str = "Me";

/// A persisted audience profile.
///
/// Serialized with the camel-cased field names of the established storage
/// format (`createdAt`, `updatedAt`) so existing collections stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    pub id: String,
    pub name: String,
    pub demographics: String,
    pub interests: String,
    pub behaviors: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: String,
}

/// The user-editable part of an [`Audience`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceFields {
    pub name: String,
    #[serde(default)]
    pub demographics: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub behaviors: String,
}

impl AudienceFields {
    /// Check that the name is present and at least one descriptive field is filled in.
    ///
    /// Whitespace-only values count as empty.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyName`] or [`CoreError::NoDescriptiveFields`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        let described = [&self.demographics, &self.interests, &self.behaviors]
            .iter()
            .any(|field| !field.trim().is_empty());
        if !described {
            return Err(CoreError::NoDescriptiveFields);
        }
        Ok(())
    }
}

impl From<&DiscoveredAudience> for AudienceFields {
    /// A discovered segment becomes an audience whose demographics carry the
    /// segment description.
    fn from(discovered: &DiscoveredAudience) -> Self {
        Self {
            name: discovered.audience_name.clone(),
            demographics: discovered.description.clone(),
            interests: String::new(),
            behaviors: String::new(),
        }
    }
}

/// How an audience profile is phrased inside a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStyle {
    /// `Demographics: .. Interests & Hobbies: .. Behaviors: ..`
    Plain,
    /// The plain profile prefixed with `The target audience is defined by:`.
    Described,
}

impl Audience {
    /// Render the descriptive fields as prompt text.
    #[must_use]
    pub fn profile(&self, style: ProfileStyle) -> String {
        let plain = format!(
            "Demographics: {}. Interests & Hobbies: {}. Behaviors: {}.",
            self.demographics, self.interests, self.behaviors
        );
        match style {
            ProfileStyle::Plain => plain,
            ProfileStyle::Described => format!("The target audience is defined by: {plain}"),
        }
    }

    #[must_use]
    pub fn fields(&self) -> AudienceFields {
        AudienceFields {
            name: self.name.clone(),
            demographics: self.demographics.clone(),
            interests: self.interests.clone(),
            behaviors: self.behaviors.clone(),
        }
    }
}
