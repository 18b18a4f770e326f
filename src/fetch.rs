//! The JSON-fetching capability the badge services depend on.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::shape::Shape;

/// Fetches a JSON document from an API path.
///
/// A 404 or 422 must come back as `BadgeError::NotFound` carrying
/// `not_found`. Retries, auth and pagination are the implementor's business.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, path: &str, not_found: &str) -> Result<Value>;
}

/// Fetch `path`, check it against `shape` and deserialize its elements.
pub async fn fetch_list<T, F>(
    fetcher: &F,
    path: &str,
    shape: Shape,
    not_found: &str,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: JsonFetcher + ?Sized,
{
    tracing::debug!(path, shape = shape.name(), "fetching");
    let value = fetcher.fetch_json(path, not_found).await?;
    shape.parse(value)
}

#[cfg(test)]
pub mod fake {
    //! In-memory fetcher for service tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::JsonFetcher;
    use crate::error::{BadgeError, Result};

    enum Reply {
        Json(Value),
        Status(u16),
    }

    #[derive(Default)]
    pub struct FakeFetcher {
        replies: HashMap<String, Reply>,
        yields: HashMap<String, usize>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl FakeFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_json(mut self, path: &str, value: Value) -> Self {
            self.replies.insert(path.to_string(), Reply::Json(value));
            self
        }

        pub fn with_status(mut self, path: &str, status: u16) -> Self {
            self.replies.insert(path.to_string(), Reply::Status(status));
            self
        }

        /// Yield to the scheduler `times` times before answering `path`.
        pub fn with_yields(mut self, path: &str, times: usize) -> Self {
            self.yields.insert(path.to_string(), times);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Most fetches that were running at the same time.
        pub fn peak_in_flight(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JsonFetcher for FakeFetcher {
        async fn fetch_json(&self, path: &str, not_found: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(path.to_string());
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

            for _ in 0..self.yields.get(path).copied().unwrap_or(0) {
                tokio::task::yield_now().await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match self.replies.get(path) {
                Some(Reply::Json(value)) => Ok(value.clone()),
                Some(Reply::Status(404 | 422)) | None => Err(BadgeError::NotFound {
                    hint: not_found.to_string(),
                }),
                Some(Reply::Status(status)) => Err(BadgeError::Api {
                    status: *status,
                    message: "fake upstream failure".to_string(),
                }),
            }
        }
    }
}
