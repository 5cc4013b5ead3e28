//! Result types produced by the research gateway. None of these are persisted.

use serde::{Deserialize, Deserializer, Serialize};

/// A grounding citation attached to a generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// Narrative answer plus the web sources it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Simple HTML as returned by the model.
    pub answer: String,
    /// Deduplicated by `uri`, first occurrence wins.
    pub sources: Vec<Source>,
}

/// Values are kept as text; a number or boolean in the reply is stringified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataItem {
    pub label: String,
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonChartDataItem {
    pub label: String,
    #[serde(rename = "audienceA_value", deserialize_with = "scalar_as_string")]
    pub audience_a_value: String,
    #[serde(rename = "audienceB_value", deserialize_with = "scalar_as_string")]
    pub audience_b_value: String,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, number or boolean, found {other}"
        ))),
    }
}

/// A consumer segment suggested by audience discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAudience {
    pub audience_name: String,
    pub description: String,
}

/// Rows decoded from a structured response, with their citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData<T> {
    pub data: Vec<T>,
    pub sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_item_uses_wire_field_names() {
        let item: ComparisonChartDataItem = serde_json::from_str(
            r#"{"label":"Instagram","audienceA_value":"75%","audienceB_value":"68%"}"#,
        )
        .unwrap();
        assert_eq!(item.audience_a_value, "75%");
        assert_eq!(item.audience_b_value, "68%");
    }

    #[test]
    fn chart_values_accept_numbers_and_booleans() {
        let item: ChartDataItem =
            serde_json::from_str(r#"{"label":"Instagram","value":85}"#).unwrap();
        assert_eq!(item.value, "85");

        let item: ComparisonChartDataItem = serde_json::from_str(
            r#"{"label":"Owns a car","audienceA_value":12.5,"audienceB_value":true}"#,
        )
        .unwrap();
        assert_eq!(item.audience_a_value, "12.5");
        assert_eq!(item.audience_b_value, "true");
    }

    #[test]
    fn chart_values_reject_null_and_nested() {
        assert!(serde_json::from_str::<ChartDataItem>(r#"{"label":"A","value":null}"#).is_err());
        assert!(serde_json::from_str::<ChartDataItem>(r#"{"label":"A","value":[1]}"#).is_err());
    }

    #[test]
    fn discovered_audience_uses_camel_case() {
        let item: DiscoveredAudience = serde_json::from_str(
            r#"{"audienceName":"Weekend Riders","description":"Leisure cyclists."}"#,
        )
        .unwrap();
        assert_eq!(item.audience_name, "Weekend Riders");
    }
}
