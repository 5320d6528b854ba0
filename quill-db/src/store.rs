//! The post collection and its mutations.
//!
//! Every mutation is one load-mutate-save cycle over the whole collection. Ids always form the
//! gapless range `1..=N`: new posts are appended with id `N + 1`, and deleting a post moves every
//! later post one id down.

use crate::storage::PostStorage;
use quill_common::model::{
    Id, ModelValidationError,
    post::{Post, PostContent, PostMarker},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("An object in the posts document was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("The posts document is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("The posts document could not be accessed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct PostStore {
    storage: Box<dyn PostStorage>,
    // Held across each load-mutate-save cycle so concurrent writers can't drop each other's changes.
    write_lock: Mutex<()>,
}

impl PostStore {
    #[must_use]
    pub fn new(storage: impl PostStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let posts = self.storage.load().await?;
        debug!(count = posts.len(), "Loaded posts");

        Ok(posts)
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let posts = self.storage.load().await?;

        Ok(posts.into_iter().find(|post| post.id == post_id))
    }

    pub async fn create_post(&self, content: &PostContent) -> Result<Id<PostMarker>> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.storage.load().await?;

        let post_id = Id::after_count(posts.len());
        posts.push(Post::new(post_id, content.clone()));

        self.storage.save(&posts).await?;
        info!(%post_id, "Created post");

        Ok(post_id)
    }

    /// Removes the post and closes the gap it leaves in the id range.
    pub async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.storage.load().await?;

        let position = position_of(&posts, post_id)?;
        posts.remove(position);

        for post in &mut posts {
            if post.id > post_id
                && let Some(predecessor) = post.id.predecessor()
            {
                post.id = predecessor;
            }
        }

        self.storage.save(&posts).await?;
        info!(%post_id, "Deleted post");

        Ok(())
    }

    pub async fn update_post(
        &self,
        post_id: Id<PostMarker>,
        content: &PostContent,
    ) -> Result<Post> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.storage.load().await?;

        let position = position_of(&posts, post_id)?;
        let post = posts[position].clone().with_content(content.clone());
        posts[position] = post.clone();

        self.storage.save(&posts).await?;
        info!(%post_id, "Updated post");

        Ok(post)
    }

    pub async fn like_post(&self, post_id: Id<PostMarker>) -> Result<Post> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.storage.load().await?;

        let position = position_of(&posts, post_id)?;
        posts[position].likes = posts[position].likes.saturating_add(1);
        let post = posts[position].clone();

        self.storage.save(&posts).await?;
        info!(%post_id, likes = post.likes, "Liked post");

        Ok(post)
    }
}

fn position_of(posts: &[Post], post_id: Id<PostMarker>) -> Result<usize> {
    posts
        .iter()
        .position(|post| post.id == post_id)
        .ok_or(DbError::PostNotFound(post_id))
}
