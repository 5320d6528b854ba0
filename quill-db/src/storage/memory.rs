use crate::{storage::PostStorage, store::Result};
use async_trait::async_trait;
use quill_common::model::post::Post;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Storage that only lives as long as the process. Mostly useful for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    posts: RwLock<Vec<Post>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    #[must_use]
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
            saves: AtomicUsize::new(0),
        }
    }

    /// How often the collection was written so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PostStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn save(&self, posts: &[Post]) -> Result<()> {
        *self.posts.write().await = posts.to_vec();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
