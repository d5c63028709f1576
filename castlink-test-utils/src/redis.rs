//! Redis test setup with unique per-test queue names.

use fred::prelude::*;

use crate::error::TestError;

/// Redis connection pool plus a queue name unique to this test instance.
///
/// The unique name keeps parallel tests from seeing each other's jobs and
/// throttle keys; call [`RedisTest::cleanup`] at the end of a test to drop
/// the queue key.
pub struct RedisTest {
    pub redis_pool: Pool,
    queue_name: String,
}

impl RedisTest {
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url("redis://127.0.0.1:6379")?;
        let redis_pool = Pool::new(redis_config, None, None, None, 5)?;
        redis_pool.init().await?;

        let queue_name = Self::generate_unique_queue_name();

        Ok(RedisTest {
            redis_pool,
            queue_name,
        })
    }

    /// The unique Redis queue name for this test instance.
    pub fn queue_name(&self) -> String {
        self.queue_name.clone()
    }

    /// Remove this test's queue key. Throttle keys carry their own expiry
    /// and live under the unique queue namespace, so they are left to lapse.
    pub async fn cleanup(&self) -> Result<(), TestError> {
        let _: i64 = self.redis_pool.del(&self.queue_name).await?;
        Ok(())
    }

    /// Generate a unique queue name using timestamp and thread ID.
    fn generate_unique_queue_name() -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let thread_id = std::thread::current().id();

        let mut hasher = DefaultHasher::new();
        timestamp.hash(&mut hasher);
        format!("{:?}", thread_id).hash(&mut hasher);

        format!("castlink:test:queue:{:x}", hasher.finish())
    }
}
