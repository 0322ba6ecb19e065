use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::time::bson_to_chrono;

pub const DEFAULT_ICON: &str = "📚";
pub const DEFAULT_COLOR: &str = "#3498db";

/// Stored topic document (`topics` collection, unique on `name`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl TopicRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: Option<String>,
        color: Option<String>,
    ) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: ObjectId::new(),
            name: name.into(),
            description: description.into(),
            icon: icon
                .filter(|i| !i.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            color: color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// API view of a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TopicRecord> for Topic {
    fn from(record: TopicRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            name: record.name,
            description: record.description,
            icon: record.icon,
            color: record.color,
            is_active: record.is_active,
            created_at: bson_to_chrono(record.created_at),
            updated_at: bson_to_chrono(record.updated_at),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(required, length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 500))]
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let record = TopicRecord::new("Geography", "Maps and places", None, Some(String::new()));
        assert_eq!(record.icon, DEFAULT_ICON);
        assert_eq!(record.color, DEFAULT_COLOR);
        assert!(record.is_active);
    }

    #[test]
    fn test_create_request_requires_fields() {
        let missing = CreateTopicRequest {
            name: Some("Geography".to_string()),
            ..Default::default()
        };
        assert!(missing.validate().is_err());

        let empty_name = CreateTopicRequest {
            name: Some(String::new()),
            description: Some("Maps".to_string()),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());

        let ok = CreateTopicRequest {
            name: Some("Geography".to_string()),
            description: Some("Maps".to_string()),
            icon: Some("globe-icon-with-long-name".to_string()),
            color: Some("rgba(52, 152, 219, 0.85) with a long suffix".to_string()),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_topic_view_is_camel_case() {
        let view = Topic::from(TopicRecord::new("Science", "Facts", None, None));
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["isActive"], true);
        assert!(json["createdAt"].is_string());
    }
}
