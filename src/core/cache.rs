//! Rendered-view cache keyed by route path
//!
//! A view is rendered once and served from the cache until something calls
//! [`Revalidate::revalidate_path`] for its path; the next read then renders it
//! again from persistence.

use crate::core::service::Revalidate;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Whether a read was served from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone)]
struct CachedPage {
    body: Value,
    stale: bool,
}

/// In-process page cache
///
/// Cheap to clone; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<HashMap<String, CachedPage>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `path` from the cache, or render and store it
    ///
    /// A render error leaves the cache untouched and is returned as is.
    pub async fn get_or_render<F, Fut, E>(&self, path: &str, render: F) -> Result<(Value, CacheStatus), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        {
            let pages = self.pages.read().await;
            if let Some(page) = pages.get(path).filter(|p| !p.stale) {
                return Ok((page.body.clone(), CacheStatus::Hit));
            }
        }

        let body = render().await?;
        self.pages.write().await.insert(
            path.to_string(),
            CachedPage {
                body: body.clone(),
                stale: false,
            },
        );
        tracing::debug!(path, "rendered view into cache");
        Ok((body, CacheStatus::Miss))
    }

    /// Whether `path` has a fresh cached rendering
    pub async fn is_fresh(&self, path: &str) -> bool {
        self.pages
            .read()
            .await
            .get(path)
            .is_some_and(|p| !p.stale)
    }
}

#[async_trait]
impl Revalidate for PageCache {
    async fn revalidate_path(&self, path: &str) {
        if let Some(page) = self.pages.write().await.get_mut(path) {
            page.stale = true;
        }
        tracing::debug!(path, "revalidated path");
    }
}
