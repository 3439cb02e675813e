//! Story document shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use talehub_core::blob::BlobUpload;
use uuid::Uuid;

/// One named block of rich text within a story.
///
/// Content is an opaque rich-text string produced by the editor widget;
/// nothing in the backend interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable chapter key, `chapter_{n}`.
    pub key: String,
    /// Rich-text content.
    pub content: String,
}

/// A story document, in any of its collections.
///
/// Chapters are an explicit ordered sequence. `chapter_seq` is the highest
/// chapter number ever minted for this story and only grows, so chapter
/// keys are never reused. `revision` counts writes to the document and
/// backs the optimistic concurrency check on updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Story identifier, shared across the catalog copy and every per-user
    /// derived copy.
    pub id: Uuid,
    /// Story title.
    pub title: String,
    /// Plot summary shown in listings.
    pub plot: String,
    /// Retrieval URL of the cover image.
    pub image_url: String,
    /// Uid of the user whose `myStories` holds the authoritative draft.
    pub creator_id: Uuid,
    /// Ordered chapter sequence.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Highest chapter number ever minted.
    #[serde(default)]
    pub chapter_seq: u32,
    /// Write counter for optimistic concurrency.
    #[serde(default)]
    pub revision: i64,
    /// Creation time of this copy.
    pub created_at: DateTime<Utc>,
    /// Time of the last write to this copy.
    pub updated_at: DateTime<Utc>,
}

impl Story {
    /// Returns the chapter with `key`, if present.
    #[must_use]
    pub fn chapter(&self, key: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.key == key)
    }
}

/// A published story copied into a non-creator's workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClonedStory {
    /// The copied story document.
    #[serde(flatten)]
    pub story: Story,
    /// Uid of the user who made this clone.
    pub clone_creator_id: Uuid,
    /// When the clone was made.
    pub cloned_at: DateTime<Utc>,
}

/// A submitted edit bundle awaiting the original creator's attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedChange {
    /// Snapshot of the submitter's clone at submission time.
    #[serde(flatten)]
    pub story: Story,
    /// Submitter-provided title for the proposal.
    pub pr_title: String,
    /// Submitter-provided comment.
    pub pr_comment: String,
    /// Uid of the submitter.
    pub submitted_by: Uuid,
    /// When the proposal was submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Which copy of a story an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryScope {
    /// The globally visible published copy.
    Catalog,
    /// A creator's authoritative draft.
    Owned(Uuid),
    /// A non-creator's clone of a published story.
    Cloned(Uuid),
}

/// How a creator resolves a proposed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Copy the proposal's chapters into the owned draft, then discard it.
    Accepted,
    /// Discard the proposal.
    Rejected,
}

/// Input for creating a new owned story.
#[derive(Debug)]
pub struct NewStory {
    /// Story title. Required.
    pub title: String,
    /// Plot summary. Required.
    pub plot: String,
    /// Cover image file. Required.
    pub image: BlobUpload,
}

/// Submitter-provided metadata for a proposed change.
#[derive(Debug, Clone)]
pub struct ProposalDetails {
    /// Proposal title. Required.
    pub pr_title: String,
    /// Free-form comment for the creator.
    pub pr_comment: String,
}

/// Builds the chapter key for chapter number `n`.
#[must_use]
pub fn chapter_key(n: u32) -> String {
    format!("chapter_{n}")
}

/// Parses the chapter number out of a `chapter_{n}` key.
#[must_use]
pub fn chapter_number(key: &str) -> Option<u32> {
    key.strip_prefix("chapter_")?.parse().ok()
}
