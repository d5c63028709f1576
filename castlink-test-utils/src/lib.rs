pub mod db;
pub mod error;
pub mod fixtures;
pub mod redis;

pub use error::TestError;
pub use redis::RedisTest;

pub mod prelude {
    pub use crate::{db, fixtures, RedisTest, TestError};
}
