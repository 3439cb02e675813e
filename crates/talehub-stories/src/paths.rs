//! Store paths for the story collections.
//!
//! The namespace mirrors the document hierarchy: `stories/{id}`,
//! `users/{uid}/myStories/{id}`, `users/{uid}/myClonedStories/{id}`,
//! `users/{creatorUid}/pr/{storyId}`.

use talehub_core::document::{CollectionPath, DocPath};
use uuid::Uuid;

use crate::model::StoryScope;

/// The global published-story catalog.
#[must_use]
pub fn catalog() -> CollectionPath {
    CollectionPath::new("stories")
}

/// A user's authoritative drafts.
#[must_use]
pub fn owned(uid: Uuid) -> CollectionPath {
    CollectionPath::new(format!("users/{uid}/myStories"))
}

/// A user's clones of published stories.
#[must_use]
pub fn cloned(uid: Uuid) -> CollectionPath {
    CollectionPath::new(format!("users/{uid}/myClonedStories"))
}

/// Proposed changes awaiting a creator, keyed by original story id.
#[must_use]
pub fn proposals(creator_uid: Uuid) -> CollectionPath {
    CollectionPath::new(format!("users/{creator_uid}/pr"))
}

/// The collection a scope addresses.
#[must_use]
pub fn scope_collection(scope: StoryScope) -> CollectionPath {
    match scope {
        StoryScope::Catalog => catalog(),
        StoryScope::Owned(uid) => owned(uid),
        StoryScope::Cloned(uid) => cloned(uid),
    }
}

/// The document path of story `id` within a scope.
#[must_use]
pub fn story_doc(scope: StoryScope, id: Uuid) -> DocPath {
    scope_collection(scope).doc(&id.to_string())
}
