use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use aigate_storage::{KvError, KvStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request class with its own model table and rate bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Chat,
    Images,
    Search,
    Auth,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Chat => "chat",
            Category::Images => "images",
            Category::Search => "search",
            Category::Auth => "auth",
        }
    }

    /// Maps a request path onto its rate bucket; paths outside the table are
    /// not rate limited.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/api/chat" => Some(Category::Chat),
            "/api/images" => Some(Category::Images),
            "/api/search" => Some(Category::Search),
            _ if path.starts_with("/api/auth/") => Some(Category::Auth),
            _ => None,
        }
    }

    pub fn policy(self) -> RateLimitPolicy {
        let hour = Duration::from_secs(3600);
        match self {
            Category::Chat => RateLimitPolicy { limit: 20, window: hour },
            Category::Images => RateLimitPolicy { limit: 10, window: hour },
            Category::Search => RateLimitPolicy { limit: 30, window: hour },
            Category::Auth => RateLimitPolicy { limit: 20, window: hour },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitPolicy {
    pub limit: u32,
    pub window: Duration,
}

/// Stored per `(clientAddr, category)` with TTL equal to the window, so
/// abandoned windows expire on their own.
#[derive(Debug, Serialize, Deserialize)]
struct RateLimitRecord {
    count: u32,
    #[serde(rename = "resetTime")]
    reset_time: u64,
}

/// Fixed-window counter over the KV port. Best effort by design: the
/// read-modify-write is unlocked (two concurrent hits may observe the same
/// count), and any store failure allows the request.
pub struct RateLimiter {
    store: Option<Arc<dyn KvStore>>,
}

impl RateLimiter {
    pub fn new(store: Option<Arc<dyn KvStore>>) -> Self {
        Self { store }
    }

    /// A limiter with no backing store; every check allows.
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub async fn check(&self, client_addr: &str, category: Category) -> bool {
        self.check_policy(client_addr, category.as_str(), category.policy())
            .await
    }

    pub async fn check_policy(
        &self,
        client_addr: &str,
        bucket: &str,
        policy: RateLimitPolicy,
    ) -> bool {
        let Some(store) = &self.store else {
            return true;
        };
        match Self::count_hit(store.as_ref(), client_addr, bucket, policy).await {
            Ok(allowed) => allowed,
            Err(err) => {
                debug!(bucket, error = %err, "rate limit store failed, allowing");
                true
            }
        }
    }

    async fn count_hit(
        store: &dyn KvStore,
        client_addr: &str,
        bucket: &str,
        policy: RateLimitPolicy,
    ) -> Result<bool, KvError> {
        let key = format!("rate_limit:{client_addr}:{bucket}");
        let now = now_millis();
        let window_ms = policy.window.as_millis() as u64;

        let mut record = match store.get(&key).await? {
            Some(bytes) => serde_json::from_slice(&bytes).unwrap_or(RateLimitRecord {
                count: 0,
                reset_time: now + window_ms,
            }),
            None => RateLimitRecord {
                count: 0,
                reset_time: now + window_ms,
            },
        };

        if now > record.reset_time {
            record.count = 1;
            record.reset_time = now + window_ms;
        } else {
            record.count += 1;
        }

        let bytes =
            serde_json::to_vec(&record).map_err(|err| KvError::Backend(err.to_string()))?;
        store.put(&key, bytes, policy.window).await?;

        Ok(record.count <= policy.limit)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aigate_storage::MemoryKv;
    use async_trait::async_trait;

    struct FailingKv;

    #[async_trait]
    impl KvStore for FailingKv {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, KvError> {
            Err(KvError::Backend("down".to_string()))
        }

        async fn put(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl: Duration,
        ) -> Result<(), KvError> {
            Err(KvError::Backend("down".to_string()))
        }
    }

    #[tokio::test]
    async fn denies_above_limit_within_window() {
        let limiter = RateLimiter::new(Some(Arc::new(MemoryKv::new())));
        let policy = RateLimitPolicy {
            limit: 3,
            window: Duration::from_secs(60),
        };
        for _ in 0..3 {
            assert!(limiter.check_policy("1.2.3.4", "chat", policy).await);
        }
        assert!(!limiter.check_policy("1.2.3.4", "chat", policy).await);
    }

    #[tokio::test]
    async fn window_elapse_resets_the_counter() {
        let limiter = RateLimiter::new(Some(Arc::new(MemoryKv::new())));
        let policy = RateLimitPolicy {
            limit: 1,
            window: Duration::from_millis(30),
        };
        assert!(limiter.check_policy("1.2.3.4", "chat", policy).await);
        assert!(!limiter.check_policy("1.2.3.4", "chat", policy).await);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(limiter.check_policy("1.2.3.4", "chat", policy).await);
    }

    #[tokio::test]
    async fn buckets_are_independent_per_key() {
        let limiter = RateLimiter::new(Some(Arc::new(MemoryKv::new())));
        let policy = RateLimitPolicy {
            limit: 1,
            window: Duration::from_secs(60),
        };
        assert!(limiter.check_policy("1.2.3.4", "chat", policy).await);
        assert!(!limiter.check_policy("1.2.3.4", "chat", policy).await);
        assert!(limiter.check_policy("1.2.3.4", "images", policy).await);
        assert!(limiter.check_policy("5.6.7.8", "chat", policy).await);
    }

    #[tokio::test]
    async fn fails_open_when_store_errors() {
        let limiter = RateLimiter::new(Some(Arc::new(FailingKv)));
        let policy = RateLimitPolicy {
            limit: 1,
            window: Duration::from_secs(60),
        };
        for _ in 0..10 {
            assert!(limiter.check_policy("1.2.3.4", "chat", policy).await);
        }
    }

    #[tokio::test]
    async fn disabled_limiter_always_allows() {
        let limiter = RateLimiter::disabled();
        for _ in 0..10 {
            assert!(limiter.check("1.2.3.4", Category::Images).await);
        }
    }

    #[test]
    fn paths_map_to_buckets() {
        assert_eq!(Category::from_path("/api/chat"), Some(Category::Chat));
        assert_eq!(Category::from_path("/api/auth/login"), Some(Category::Auth));
        assert_eq!(Category::from_path("/api/health"), None);
        assert_eq!(Category::from_path("/api/conversations"), None);
    }
}
