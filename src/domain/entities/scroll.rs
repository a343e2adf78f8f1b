use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single piece of reference lore. Scrolls are written out-of-band and
/// read-only from the lookup path's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scroll {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Scroll {
    pub fn new(content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            created_at: Utc::now(),
        }
    }
}
