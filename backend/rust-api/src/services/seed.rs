use crate::models::TopicRecord;
use crate::services::store::{StoreError, TopicStore};

/// (name, description, icon, color)
const INITIAL_TOPICS: [(&str, &str, &str, &str); 4] = [
    (
        "Wellness",
        "Test your knowledge about health, fitness, nutrition, and mental well-being",
        "🧘‍♀️",
        "#27ae60",
    ),
    (
        "Tech Trends",
        "Stay updated with the latest technology trends, AI, and digital innovations",
        "💻",
        "#3498db",
    ),
    (
        "Science",
        "Explore fascinating facts about physics, chemistry, biology, and space",
        "🔬",
        "#9b59b6",
    ),
    (
        "History",
        "Journey through historical events, civilizations, and important figures",
        "📜",
        "#e67e22",
    ),
];

pub fn initial_topics() -> Vec<TopicRecord> {
    INITIAL_TOPICS
        .iter()
        .map(|(name, description, icon, color)| {
            TopicRecord::new(
                *name,
                *description,
                Some(icon.to_string()),
                Some(color.to_string()),
            )
        })
        .collect()
}

/// Upserts the initial topics by name. Other stored topics are left alone.
pub async fn seed_topics(store: &dyn TopicStore) -> Result<usize, StoreError> {
    let topics = initial_topics();
    let inserted = store.upsert_topics(&topics).await?;
    for topic in &topics {
        tracing::info!("Seeded topic {}: {}", topic.name, topic.description);
    }
    Ok(inserted)
}
