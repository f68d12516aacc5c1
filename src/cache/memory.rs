use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Artwork(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Artwork(title) => write!(f, "artwork:{}", title),
        }
    }
}

/// Process-lifetime in-memory cache
///
/// Entries never expire; the catalog is fixed for the life of the process.
#[derive(Clone)]
pub struct Cache<V> {
    entries: Arc<RwLock<HashMap<String, V>>>,
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let entries = self.entries.read().await;
        let value = entries.get(&key.to_string()).cloned();
        if value.is_some() {
            tracing::debug!(key = %key, "Cache hit");
        }
        value
    }

    pub async fn insert(&self, key: &CacheKey, value: V) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
