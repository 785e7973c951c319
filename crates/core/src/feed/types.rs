use crate::domain::asteroid::{AsteroidSummary, DateGrouped, FeedResult};
use serde::Deserialize;

/// The parts of a NeoWs `feed` response the proxy reads. Everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub element_count: Option<u64>,
    #[serde(default)]
    pub near_earth_objects: Option<DateGrouped<NeoRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NeoRecord {
    pub name: String,
    pub is_potentially_hazardous_asteroid: bool,
}

impl From<NeoRecord> for AsteroidSummary {
    fn from(record: NeoRecord) -> Self {
        AsteroidSummary {
            name: record.name,
            hazardous: record.is_potentially_hazardous_asteroid,
        }
    }
}

impl FeedResponse {
    /// A missing or null `near_earth_objects` yields an empty result.
    pub fn into_feed_result(self) -> FeedResult {
        self.near_earth_objects
            .unwrap_or_default()
            .map(AsteroidSummary::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_name_and_hazard_flag_only() {
        // Raw text so the parser sees the document's key order, not a sorted json! map.
        let text = r#"{
            "links": {"next": "http://example/next"},
            "element_count": 3,
            "near_earth_objects": {
                "2025-01-02": [
                    {
                        "id": "2465633",
                        "name": "465633 (2009 JR5)",
                        "estimated_diameter": {"kilometers": {"estimated_diameter_min": 0.2}},
                        "is_potentially_hazardous_asteroid": true,
                        "close_approach_data": []
                    },
                    {
                        "id": "3426410",
                        "name": "(2008 QV11)",
                        "is_potentially_hazardous_asteroid": false
                    }
                ],
                "2025-01-01": [
                    {"name": "(2010 PK9)", "is_potentially_hazardous_asteroid": false}
                ]
            }
        }"#;

        let parsed = serde_json::from_str::<FeedResponse>(text).unwrap();
        assert_eq!(parsed.element_count, Some(3));
        let result = parsed.into_feed_result();

        assert_eq!(result.dates().collect::<Vec<_>>(), vec!["2025-01-02", "2025-01-01"]);
        assert_eq!(
            result.get("2025-01-02").unwrap(),
            &[
                AsteroidSummary {
                    name: "465633 (2009 JR5)".to_string(),
                    hazardous: true
                },
                AsteroidSummary {
                    name: "(2008 QV11)".to_string(),
                    hazardous: false
                },
            ][..]
        );
        assert_eq!(result.get("2025-01-01").unwrap().len(), 1);
    }

    #[test]
    fn absent_or_null_objects_field_is_empty() {
        let parsed: FeedResponse = serde_json::from_value(json!({"element_count": 0})).unwrap();
        assert!(parsed.into_feed_result().is_empty());

        let parsed: FeedResponse =
            serde_json::from_value(json!({"near_earth_objects": null})).unwrap();
        assert!(parsed.into_feed_result().is_empty());
    }

    #[test]
    fn record_without_hazard_flag_is_rejected() {
        let v = json!({
            "near_earth_objects": {"2025-01-01": [{"name": "(2010 PK9)"}]}
        });
        assert!(serde_json::from_value::<FeedResponse>(v).is_err());
    }
}
