pub mod post;

use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData, num::NonZeroU64};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error("Ids must be positive, found {0}")]
    NonPositiveId(i64),
}

/// Positive integer id, typed by what it identifies.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<Marker>(NonZeroU64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    pub const FIRST: Self = Self::new(NonZeroU64::MIN);

    #[must_use]
    pub const fn new(value: NonZeroU64) -> Self {
        Self(value, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The id given to an entry appended behind `count` others.
    #[must_use]
    pub fn after_count(count: usize) -> Self {
        Self::new(NonZeroU64::MIN.saturating_add(count as u64))
    }

    /// The next lower id, or `None` for [`Id::FIRST`].
    #[must_use]
    pub fn predecessor(self) -> Option<Self> {
        NonZeroU64::new(self.get() - 1).map(Self::new)
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> TryFrom<i64> for Id<Marker> {
    type Error = ModelValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self::new)
            .ok_or(ModelValidationError::NonPositiveId(value))
    }
}

impl<Marker> From<Id<Marker>> for i64 {
    fn from(value: Id<Marker>) -> Self {
        value.get().cast_signed()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, ModelValidationError, post::PostMarker};

    type PostId = Id<PostMarker>;

    #[test]
    fn rejects_non_positive_ids() {
        for legal in [1, 2, 0x7FFF_FFFF, i64::MAX] {
            assert_eq!(PostId::try_from(legal).map(i64::from), Ok(legal));
        }
        for illegal in [0, -1, i64::MIN] {
            assert_eq!(
                PostId::try_from(illegal),
                Err(ModelValidationError::NonPositiveId(illegal))
            );
        }
    }

    #[test]
    fn ids_follow_counts() {
        assert_eq!(PostId::after_count(0), PostId::FIRST);
        assert_eq!(PostId::after_count(4).get(), 5);
        assert_eq!(PostId::after_count(4).predecessor(), Some(PostId::after_count(3)));
        assert_eq!(PostId::FIRST.predecessor(), None);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let id = PostId::after_count(41);

        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::from_str::<PostId>("42").unwrap(), id);
        assert!(serde_json::from_str::<PostId>("0").is_err());
    }
}
