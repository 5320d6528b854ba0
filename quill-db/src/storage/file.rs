use crate::{
    record::PostRecord,
    storage::PostStorage,
    store::{DbError, Result},
};
use async_trait::async_trait;
use quill_common::model::post::Post;
use serde::Serialize;
use serde_json::{Serializer, ser::PrettyFormatter};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{debug, warn};

const INDENT: &[u8] = b"    ";

/// Keeps the collection as one pretty-printed JSON array in a single file.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the document, so a failed write
/// leaves the previous document in place.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self.path.file_name().unwrap_or_default().to_owned();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

fn encode(posts: &[Post]) -> Result<Vec<u8>> {
    let records: Vec<PostRecord> = posts.iter().map(PostRecord::from).collect();

    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut serializer)?;

    Ok(buffer)
}

fn decode(bytes: &[u8]) -> Result<Vec<Post>> {
    let records: Vec<PostRecord> = serde_json::from_slice(bytes)?;

    records
        .into_iter()
        .map(Post::try_from)
        .collect::<Result<_, _>>()
        .map_err(DbError::from)
}

#[async_trait]
impl PostStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Post>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No posts document yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        decode(&bytes)
    }

    async fn save(&self, posts: &[Post]) -> Result<()> {
        let bytes = encode(posts)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes).await?;
        if let Err(err) = fs::rename(&temp_path, &self.path).await {
            if let Err(remove_err) = fs::remove_file(&temp_path).await {
                warn!(path = %temp_path.display(), %remove_err, "Could not remove temporary document");
            }
            return Err(err.into());
        }

        debug!(path = %self.path.display(), count = posts.len(), "Wrote posts document");
        Ok(())
    }
}
