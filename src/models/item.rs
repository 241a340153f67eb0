use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One media entry in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Numeric ids in the dataset are kept as their decimal text
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub streams: Option<Vec<Stream>>,
}

impl Item {
    /// Streams of the item, empty when the dataset omits them
    pub fn streams(&self) -> &[Stream] {
        self.streams.as_deref().unwrap_or_default()
    }
}

/// A playable source belonging to an [`Item`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stream {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// The full ordered dataset from one successful load
#[derive(Debug, Clone)]
pub struct Collection {
    pub items: Vec<Item>,
    pub loaded_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            loaded_at: Utc::now(),
        }
    }

    /// Parses a JSON array of items
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice::<Vec<Item>>(bytes).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
