//! Where the posts document lives.
//!
//! The store only ever reads the whole collection and writes the whole collection back, so a
//! backend just has to provide those two operations.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::store::Result;
use async_trait::async_trait;
use quill_common::model::post::Post;
use std::{fmt::Debug, sync::Arc};

#[async_trait]
pub trait PostStorage: Debug + Send + Sync {
    /// Reads the full collection in document order. A missing document is an empty collection.
    async fn load(&self) -> Result<Vec<Post>>;

    /// Replaces the stored document with `posts`.
    async fn save(&self, posts: &[Post]) -> Result<()>;
}

#[async_trait]
impl<T: PostStorage + ?Sized> PostStorage for Arc<T> {
    async fn load(&self) -> Result<Vec<Post>> {
        (**self).load().await
    }

    async fn save(&self, posts: &[Post]) -> Result<()> {
        (**self).save(posts).await
    }
}
