use serde::{Deserialize, Serialize};

/// How an optimistic dislike moves the like counter.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DislikeCounterPolicy {
    /// いいね数を1減らす（0未満にはならない）
    #[default]
    Decrement,
    /// 旧クライアントと同じく、取り消し時にもいいね数を増やす
    LegacyIncrement,
}

impl DislikeCounterPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DislikeCounterPolicy::Decrement => "decrement",
            DislikeCounterPolicy::LegacyIncrement => "legacy_increment",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "decrement" => Some(DislikeCounterPolicy::Decrement),
            "legacy_increment" | "legacy" | "increment" => {
                Some(DislikeCounterPolicy::LegacyIncrement)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    pub cache: CacheConfig,
    pub mutations: MutationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Buffer size of the mutation notification channel.
    pub notify_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationConfig {
    pub reconcile_after_settle: bool,
    #[serde(default)]
    pub dislike_counter: DislikeCounterPolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig {
                notify_capacity: 64,
            },
            mutations: MutationConfig {
                reconcile_after_settle: true,
                dislike_counter: DislikeCounterPolicy::Decrement,
            },
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `from_env` の本体。テストから環境変数を汚さずに呼べるよう分離している
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = lookup("FEED_SYNC_NOTIFY_CAPACITY").and_then(|v| parse_usize(&v)) {
            cfg.cache.notify_capacity = value;
        }
        if let Some(v) = lookup("FEED_SYNC_RECONCILE") {
            cfg.mutations.reconcile_after_settle =
                parse_bool(&v, cfg.mutations.reconcile_after_settle);
        }
        if let Some(policy) =
            lookup("FEED_SYNC_DISLIKE_COUNTER").and_then(|v| DislikeCounterPolicy::parse(&v))
        {
            cfg.mutations.dislike_counter = policy;
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cache.notify_capacity == 0 {
            return Err("Cache notify_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}
