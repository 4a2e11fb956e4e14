use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical collections held by the cache store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKey {
    /// 投稿一覧（コメントを含む）
    Posts,
}

impl CacheKey {
    pub const ALL: [CacheKey; 1] = [CacheKey::Posts];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Posts => "posts",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CacheKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value.trim())
            .ok_or_else(|| format!("Unknown cache key: {value}"))
    }
}
