use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    #[serde(flatten)]
    pub content: PostContent,
    pub likes: u64,
}

/// The user-supplied part of a post.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostContent {
    pub author: String,
    pub title: String,
    pub content: String,
}

impl Post {
    #[must_use]
    pub fn new(id: Id<PostMarker>, content: PostContent) -> Self {
        Self {
            id,
            content,
            likes: 0,
        }
    }

    /// Replaces author, title and content. Id and likes carry over.
    #[must_use]
    pub fn with_content(self, content: PostContent) -> Self {
        Self { content, ..self }
    }
}
