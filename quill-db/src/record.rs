use quill_common::model::{
    ModelValidationError,
    post::{Post, PostContent},
};
use serde::{Deserialize, Serialize};

/// One entry of the persisted posts document.
///
/// Documents written before likes existed have no `likes` field; those load with zero likes.
/// Text fields may be `null` or absent when a form field was never submitted; those load empty.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub(crate) struct PostRecord {
    pub id: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub likes: u64,
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.try_into()?,
            content: PostContent {
                author: value.author.unwrap_or_default(),
                title: value.title.unwrap_or_default(),
                content: value.content.unwrap_or_default(),
            },
            likes: value.likes,
        })
    }
}

impl From<&Post> for PostRecord {
    fn from(value: &Post) -> Self {
        Self {
            id: value.id.into(),
            author: Some(value.content.author.clone()),
            title: Some(value.content.title.clone()),
            content: Some(value.content.content.clone()),
            likes: value.likes,
        }
    }
}
