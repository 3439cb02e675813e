//! The Story Repository.
//!
//! Mediates all reads and writes of story documents across the catalog,
//! per-user drafts, per-user clones, and proposed changes, enforcing the
//! path and ownership rules of the data model. All state lives in the
//! injected document store; cover images go through the injected blob
//! store.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use talehub_core::blob::BlobStore;
use talehub_core::clock::Clock;
use talehub_core::document::{DocumentStore, WriteOp};
use talehub_core::error::DomainError;

use crate::model::{
    Chapter, ClonedStory, Disposition, NewStory, ProposalDetails, ProposedChange, Story,
    StoryScope, chapter_number,
};
use crate::paths;

fn encode<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::Infrastructure(format!("document encode failed: {e}")))
}

/// Repository over the four story collections.
#[derive(Clone)]
pub struct StoryRepository {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
}

impl StoryRepository {
    /// Creates a repository over the given seams.
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            documents,
            blobs,
            clock,
        }
    }

    /// Lists all published stories.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store is unreachable;
    /// callers render an empty state.
    pub async fn list_catalog(&self) -> Result<Vec<Story>, DomainError> {
        let docs = self.documents.list(&paths::catalog()).await?;
        docs.iter().map(|doc| doc.decode()).collect()
    }

    /// Lists a user's authoritative drafts. Empty if the user has none.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store is unreachable.
    pub async fn list_owned(&self, uid: Uuid) -> Result<Vec<Story>, DomainError> {
        let docs = self.documents.list(&paths::owned(uid)).await?;
        docs.iter().map(|doc| doc.decode()).collect()
    }

    /// Lists a user's clones of published stories.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store is unreachable.
    pub async fn list_cloned(&self, uid: Uuid) -> Result<Vec<ClonedStory>, DomainError> {
        let docs = self.documents.list(&paths::cloned(uid)).await?;
        docs.iter().map(|doc| doc.decode()).collect()
    }

    /// Lists the proposed changes awaiting a creator.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store is unreachable.
    pub async fn list_proposed(&self, creator_uid: Uuid) -> Result<Vec<ProposedChange>, DomainError> {
        let docs = self.documents.list(&paths::proposals(creator_uid)).await?;
        docs.iter().map(|doc| doc.decode()).collect()
    }

    /// Fetches one story from the addressed scope.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no document exists at the path.
    pub async fn get_story(&self, scope: StoryScope, id: Uuid) -> Result<Story, DomainError> {
        let path = paths::story_doc(scope, id);
        let doc = self
            .documents
            .get(&path)
            .await?
            .ok_or_else(|| DomainError::NotFound(path.to_string()))?;
        doc.decode()
    }

    /// Fetches one proposed change from a creator's inbox.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no proposal exists for the story.
    pub async fn get_proposed(
        &self,
        creator_uid: Uuid,
        story_id: Uuid,
    ) -> Result<ProposedChange, DomainError> {
        let path = paths::proposals(creator_uid).doc(&story_id.to_string());
        let doc = self
            .documents
            .get(&path)
            .await?
            .ok_or_else(|| DomainError::NotFound(path.to_string()))?;
        doc.decode()
    }

    /// Creates a new owned story: uploads the cover image first, then
    /// writes the draft document with an empty chapter sequence.
    ///
    /// If the document write fails after the upload succeeded, one
    /// compensating blob delete is attempted so the cover is not orphaned;
    /// the compensation is best effort and a crash between the two calls
    /// still leaks the blob.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a required field is missing,
    /// `DomainError::Upload` if the blob store rejects the cover, or the
    /// document store's error if the write fails.
    pub async fn create_owned(&self, uid: Uuid, new_story: NewStory) -> Result<Story, DomainError> {
        if new_story.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if new_story.plot.trim().is_empty() {
            return Err(DomainError::Validation("plot is required".into()));
        }
        if new_story.image.bytes.is_empty() {
            return Err(DomainError::Validation("cover image is required".into()));
        }

        let cover = self.blobs.upload(new_story.image).await?;

        let now = self.clock.now();
        let story = Story {
            id: Uuid::new_v4(),
            title: new_story.title,
            plot: new_story.plot,
            image_url: cover.url,
            creator_id: uid,
            chapters: Vec::new(),
            chapter_seq: 0,
            revision: 0,
            created_at: now,
            updated_at: now,
        };

        let path = paths::owned(uid).doc(&story.id.to_string());
        if let Err(err) = self.documents.put(&path, encode(&story)?).await {
            if let Err(cleanup) = self.blobs.delete(&cover.id).await {
                warn!(blob_id = %cover.id, error = %cleanup, "cover not reclaimed after failed story write");
            }
            return Err(err);
        }
        Ok(story)
    }

    /// Publishes an owned story: upserts the catalog copy at the same id,
    /// stamping `creator_id` and `updated_at`. Full overwrite,
    /// last-writer-wins, re-entrant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the user has no draft with this
    /// id.
    pub async fn publish(&self, uid: Uuid, story_id: Uuid) -> Result<Story, DomainError> {
        let mut story = self.get_story(StoryScope::Owned(uid), story_id).await?;
        story.creator_id = uid;
        story.updated_at = self.clock.now();

        let path = paths::catalog().doc(&story_id.to_string());
        self.documents.put(&path, encode(&story)?).await?;
        Ok(story)
    }

    /// Clones a published story into a user's workspace, preserving the
    /// story id. Cloning an already-cloned story returns the existing
    /// clone unchanged, so a second click cannot destroy in-progress
    /// edits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the catalog has no story with
    /// this id.
    pub async fn clone_story(&self, uid: Uuid, catalog_id: Uuid) -> Result<ClonedStory, DomainError> {
        let path = paths::cloned(uid).doc(&catalog_id.to_string());
        if let Some(existing) = self.documents.get(&path).await? {
            return existing.decode();
        }

        let story = self.get_story(StoryScope::Catalog, catalog_id).await?;
        let cloned = ClonedStory {
            story,
            clone_creator_id: uid,
            cloned_at: self.clock.now(),
        };
        self.documents.put(&path, encode(&cloned)?).await?;
        Ok(cloned)
    }

    /// Saves one chapter: replaces the chapter with `key` or appends a new
    /// one, advances `chapter_seq` to cover the key, and bumps `revision`
    /// and `updated_at`. Only those fields are merged into the document;
    /// concurrent edits to other fields are not clobbered.
    ///
    /// When `expected_revision` is given and does not match the stored
    /// revision the write is rejected; when omitted, the last writer wins.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the story is missing from the
    /// scope, `DomainError::RevisionConflict` on a stale
    /// `expected_revision`, or `DomainError::Validation` for an empty
    /// chapter key.
    pub async fn save_chapter(
        &self,
        scope: StoryScope,
        story_id: Uuid,
        key: &str,
        content: String,
        expected_revision: Option<i64>,
    ) -> Result<Story, DomainError> {
        if key.trim().is_empty() {
            return Err(DomainError::Validation("chapter key is required".into()));
        }

        let path = paths::story_doc(scope, story_id);
        let doc = self
            .documents
            .get(&path)
            .await?
            .ok_or_else(|| DomainError::NotFound(path.to_string()))?;
        let mut story: Story = doc.decode()?;

        if let Some(expected) = expected_revision {
            if story.revision != expected {
                return Err(DomainError::RevisionConflict {
                    path: path.to_string(),
                    expected,
                    actual: story.revision,
                });
            }
        }

        match story.chapters.iter_mut().find(|c| c.key == key) {
            Some(chapter) => chapter.content = content,
            None => story.chapters.push(Chapter {
                key: key.to_owned(),
                content,
            }),
        }
        if let Some(n) = chapter_number(key) {
            story.chapter_seq = story.chapter_seq.max(n);
        }
        story.revision += 1;
        story.updated_at = self.clock.now();

        let mut fields = Map::new();
        fields.insert("chapters".into(), encode(&story.chapters)?);
        fields.insert("chapter_seq".into(), encode(&story.chapter_seq)?);
        fields.insert("revision".into(), encode(&story.revision)?);
        fields.insert("updated_at".into(), encode(&story.updated_at)?);
        self.documents.merge(&path, fields).await?;

        Ok(story)
    }

    /// Submits a proposed change: snapshots the submitter's clone under
    /// the creator's inbox, keyed by the original story id, and deletes
    /// the clone. The two writes land in one atomic batch, so a failure
    /// cannot leave both the clone and the proposal behind.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the submitter has no clone with
    /// this id, or `DomainError::Validation` for a missing proposal title.
    pub async fn submit_proposed_change(
        &self,
        submitter_uid: Uuid,
        story_id: Uuid,
        details: ProposalDetails,
    ) -> Result<ProposedChange, DomainError> {
        if details.pr_title.trim().is_empty() {
            return Err(DomainError::Validation("proposal title is required".into()));
        }

        let cloned_path = paths::cloned(submitter_uid).doc(&story_id.to_string());
        let doc = self
            .documents
            .get(&cloned_path)
            .await?
            .ok_or_else(|| DomainError::NotFound(cloned_path.to_string()))?;
        let cloned: ClonedStory = doc.decode()?;

        let creator_uid = cloned.story.creator_id;
        let proposal = ProposedChange {
            story: cloned.story,
            pr_title: details.pr_title,
            pr_comment: details.pr_comment,
            submitted_by: submitter_uid,
            submitted_at: self.clock.now(),
        };

        let pr_path = paths::proposals(creator_uid).doc(&story_id.to_string());
        self.documents
            .commit(vec![
                WriteOp::Put {
                    path: pr_path,
                    value: encode(&proposal)?,
                },
                WriteOp::Delete { path: cloned_path },
            ])
            .await?;

        Ok(proposal)
    }

    /// Resolves a proposed change. `Accepted` copies the proposal's
    /// chapter sequence into the creator's draft (bumping its revision)
    /// and deletes the proposal, atomically; `Rejected` deletes the
    /// proposal only. The catalog copy is never touched — the creator
    /// re-publishes explicitly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no proposal exists for the
    /// story, or — for `Accepted` — if the creator no longer has the
    /// draft.
    pub async fn resolve_proposed_change(
        &self,
        creator_uid: Uuid,
        story_id: Uuid,
        disposition: Disposition,
    ) -> Result<(), DomainError> {
        let pr_path = paths::proposals(creator_uid).doc(&story_id.to_string());
        let doc = self
            .documents
            .get(&pr_path)
            .await?
            .ok_or_else(|| DomainError::NotFound(pr_path.to_string()))?;

        match disposition {
            Disposition::Rejected => self.documents.delete(&pr_path).await,
            Disposition::Accepted => {
                let proposal: ProposedChange = doc.decode()?;

                let owned_path = paths::owned(creator_uid).doc(&story_id.to_string());
                let owned_doc = self
                    .documents
                    .get(&owned_path)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(owned_path.to_string()))?;
                let mut owned: Story = owned_doc.decode()?;

                owned.chapters = proposal.story.chapters;
                owned.chapter_seq = owned.chapter_seq.max(proposal.story.chapter_seq);
                owned.revision += 1;
                owned.updated_at = self.clock.now();

                let mut fields = Map::new();
                fields.insert("chapters".into(), encode(&owned.chapters)?);
                fields.insert("chapter_seq".into(), encode(&owned.chapter_seq)?);
                fields.insert("revision".into(), encode(&owned.revision)?);
                fields.insert("updated_at".into(), encode(&owned.updated_at)?);

                self.documents
                    .commit(vec![
                        WriteOp::Merge {
                            path: owned_path,
                            fields,
                        },
                        WriteOp::Delete { path: pr_path },
                    ])
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use talehub_core::blob::BlobUpload;
    use talehub_test_support::{
        FailingBlobStore, FailingDocumentStore, FixedClock, MemoryBlobStore, MemoryDocumentStore,
    };

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn repo() -> (StoryRepository, Arc<MemoryDocumentStore>, Arc<MemoryBlobStore>) {
        let documents = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::new("http://localhost:3000"));
        let repository = StoryRepository::new(
            documents.clone(),
            blobs.clone(),
            Arc::new(FixedClock(fixed_now())),
        );
        (repository, documents, blobs)
    }

    fn new_story(title: &str) -> NewStory {
        NewStory {
            title: title.to_owned(),
            plot: "A tale of cunning.".to_owned(),
            image: BlobUpload {
                file_name: "cover.png".to_owned(),
                content_type: "image/png".to_owned(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            },
        }
    }

    #[tokio::test]
    async fn test_create_owned_appears_in_list_owned() {
        // Arrange
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();

        // Act
        let created = repo.create_owned(uid, new_story("Fox")).await.unwrap();
        let owned = repo.list_owned(uid).await.unwrap();

        // Assert
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].title, "Fox");
        assert_eq!(owned[0].id, created.id);
        assert_eq!(owned[0].creator_id, uid);
        assert!(owned[0].chapters.is_empty());
        assert_eq!(owned[0].created_at, fixed_now());
    }

    #[tokio::test]
    async fn test_create_owned_rejects_missing_fields() {
        let (repo, docs, blobs) = repo();
        let uid = Uuid::new_v4();

        let mut no_title = new_story("Fox");
        no_title.title = "  ".into();
        let err = repo.create_owned(uid, no_title).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let mut no_image = new_story("Fox");
        no_image.image.bytes.clear();
        let err = repo.create_owned(uid, no_image).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Nothing was written on either rejection.
        assert!(docs.is_empty());
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_create_owned_reclaims_cover_when_write_fails() {
        // Arrange — uploads succeed, the document write does not.
        let blobs = Arc::new(MemoryBlobStore::new("http://localhost:3000"));
        let repo = StoryRepository::new(
            Arc::new(FailingDocumentStore),
            blobs.clone(),
            Arc::new(FixedClock(fixed_now())),
        );

        // Act
        let err = repo
            .create_owned(Uuid::new_v4(), new_story("Fox"))
            .await
            .unwrap_err();

        // Assert — the write failure surfaces and the cover was reclaimed.
        assert!(matches!(err, DomainError::Infrastructure(_)));
        assert!(blobs.is_empty());
    }

    #[tokio::test]
    async fn test_create_owned_surfaces_upload_failure() {
        let (_, documents, _) = repo();
        let repo = StoryRepository::new(
            documents.clone(),
            Arc::new(FailingBlobStore),
            Arc::new(FixedClock(fixed_now())),
        );

        let err = repo
            .create_owned(Uuid::new_v4(), new_story("Fox"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Upload(_)));
        assert!(documents.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_lacks_story_until_publish() {
        // Arrange
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();

        // Act + Assert — absent before publish.
        assert!(repo.list_catalog().await.unwrap().is_empty());
        let err = repo
            .get_story(StoryScope::Catalog, story.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        // Act + Assert — present after, stamped with the creator.
        repo.publish(uid, story.id).await.unwrap();
        let published = repo.get_story(StoryScope::Catalog, story.id).await.unwrap();
        assert_eq!(published.id, story.id);
        assert_eq!(published.creator_id, uid);
    }

    #[tokio::test]
    async fn test_publish_twice_keeps_only_latest_plot() {
        // Arrange
        let (repo, documents, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();
        repo.publish(uid, story.id).await.unwrap();

        // Act — the draft's plot changes, then it is re-published.
        let owned_path = paths::owned(uid).doc(&story.id.to_string());
        let mut fields = Map::new();
        fields.insert("plot".into(), serde_json::json!("A darker tale."));
        documents.merge(&owned_path, fields).await.unwrap();
        repo.publish(uid, story.id).await.unwrap();

        // Assert — last write wins, no merge.
        let catalog = repo.get_story(StoryScope::Catalog, story.id).await.unwrap();
        assert_eq!(catalog.plot, "A darker tale.");
    }

    #[tokio::test]
    async fn test_clone_preserves_id_and_title() {
        // Arrange
        let (repo, _, _) = repo();
        let creator = Uuid::new_v4();
        let reader = Uuid::new_v4();
        let story = repo.create_owned(creator, new_story("Fox")).await.unwrap();
        repo.publish(creator, story.id).await.unwrap();

        // Act
        let cloned = repo.clone_story(reader, story.id).await.unwrap();

        // Assert
        assert_eq!(cloned.story.id, story.id);
        assert_eq!(cloned.clone_creator_id, reader);
        assert_eq!(cloned.cloned_at, fixed_now());
        let from_scope = repo
            .get_story(StoryScope::Cloned(reader), story.id)
            .await
            .unwrap();
        let from_catalog = repo.get_story(StoryScope::Catalog, story.id).await.unwrap();
        assert_eq!(from_scope.title, from_catalog.title);
    }

    #[tokio::test]
    async fn test_clone_twice_keeps_existing_edits() {
        // Arrange
        let (repo, _, _) = repo();
        let creator = Uuid::new_v4();
        let reader = Uuid::new_v4();
        let story = repo.create_owned(creator, new_story("Fox")).await.unwrap();
        repo.publish(creator, story.id).await.unwrap();
        repo.clone_story(reader, story.id).await.unwrap();
        repo.save_chapter(
            StoryScope::Cloned(reader),
            story.id,
            "chapter_1",
            "<p>my edit</p>".into(),
            None,
        )
        .await
        .unwrap();

        // Act — a second clone of the same story.
        let again = repo.clone_story(reader, story.id).await.unwrap();

        // Assert — the in-progress edit survived.
        assert_eq!(again.story.chapters.len(), 1);
        assert_eq!(again.story.chapters[0].content, "<p>my edit</p>");
        assert_eq!(repo.list_cloned(reader).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clone_of_unpublished_story_is_not_found() {
        let (repo, _, _) = repo();
        let err = repo
            .clone_story(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_chapter_is_idempotent() {
        // Arrange
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();

        // Act — the same (key, content) saved twice.
        let first = repo
            .save_chapter(
                StoryScope::Owned(uid),
                story.id,
                "chapter_1",
                "<p>Once upon a time.</p>".into(),
                None,
            )
            .await
            .unwrap();
        let second = repo
            .save_chapter(
                StoryScope::Owned(uid),
                story.id,
                "chapter_1",
                "<p>Once upon a time.</p>".into(),
                None,
            )
            .await
            .unwrap();

        // Assert — the chapter sequence is unchanged.
        assert_eq!(first.chapters, second.chapters);
        assert_eq!(second.chapters.len(), 1);
        assert_eq!(second.chapter_seq, 1);
    }

    #[tokio::test]
    async fn test_save_chapter_merges_without_clobbering_other_fields() {
        // Arrange
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();

        // Act
        repo.save_chapter(
            StoryScope::Owned(uid),
            story.id,
            "chapter_1",
            "<p>One.</p>".into(),
            None,
        )
        .await
        .unwrap();
        let saved = repo
            .save_chapter(
                StoryScope::Owned(uid),
                story.id,
                "chapter_2",
                "<p>Two.</p>".into(),
                None,
            )
            .await
            .unwrap();

        // Assert — chapters appended in order, story fields untouched.
        assert_eq!(saved.chapters.len(), 2);
        assert_eq!(saved.chapters[1].key, "chapter_2");
        assert_eq!(saved.chapter_seq, 2);
        assert_eq!(saved.revision, 2);
        let reread = repo.get_story(StoryScope::Owned(uid), story.id).await.unwrap();
        assert_eq!(reread.title, "Fox");
        assert_eq!(reread.plot, "A tale of cunning.");
        assert_eq!(reread.created_at, fixed_now());
    }

    #[tokio::test]
    async fn test_chapter_seq_never_decreases() {
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();

        repo.save_chapter(StoryScope::Owned(uid), story.id, "chapter_5", "v".into(), None)
            .await
            .unwrap();
        let saved = repo
            .save_chapter(StoryScope::Owned(uid), story.id, "chapter_2", "w".into(), None)
            .await
            .unwrap();

        assert_eq!(saved.chapter_seq, 5);
    }

    #[tokio::test]
    async fn test_save_chapter_rejects_stale_revision() {
        // Arrange
        let (repo, _, _) = repo();
        let uid = Uuid::new_v4();
        let story = repo.create_owned(uid, new_story("Fox")).await.unwrap();
        repo.save_chapter(
            StoryScope::Owned(uid),
            story.id,
            "chapter_1",
            "<p>One.</p>".into(),
            Some(0),
        )
        .await
        .unwrap();

        // Act — a second writer still holding revision 0.
        let err = repo
            .save_chapter(
                StoryScope::Owned(uid),
                story.id,
                "chapter_1",
                "<p>Stale.</p>".into(),
                Some(0),
            )
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(
            err,
            DomainError::RevisionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));
        let current = repo.get_story(StoryScope::Owned(uid), story.id).await.unwrap();
        assert_eq!(current.chapters[0].content, "<p>One.</p>");
    }

    #[tokio::test]
    async fn test_save_chapter_on_missing_story_is_not_found() {
        let (repo, _, _) = repo();
        let err = repo
            .save_chapter(
                StoryScope::Owned(Uuid::new_v4()),
                Uuid::new_v4(),
                "chapter_1",
                "x".into(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_moves_clone_into_creator_inbox() {
        // Arrange — A publishes, B clones and edits.
        let (repo, _, _) = repo();
        let creator = Uuid::new_v4();
        let submitter = Uuid::new_v4();
        let story = repo.create_owned(creator, new_story("Fox")).await.unwrap();
        repo.publish(creator, story.id).await.unwrap();
        repo.clone_story(submitter, story.id).await.unwrap();
        repo.save_chapter(
            StoryScope::Cloned(submitter),
            story.id,
            "chapter_1",
            "<p>B's take.</p>".into(),
            None,
        )
        .await
        .unwrap();

        // Act
        let proposal = repo
            .submit_proposed_change(
                submitter,
                story.id,
                ProposalDetails {
                    pr_title: "Tighter opening".into(),
                    pr_comment: "Reworked chapter one.".into(),
                },
            )
            .await
            .unwrap();

        // Assert — clone gone, proposal in the creator's inbox under the
        // same story id.
        assert!(repo.list_cloned(submitter).await.unwrap().is_empty());
        let inbox = repo.list_proposed(creator).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].story.id, story.id);
        assert_eq!(inbox[0].submitted_by, submitter);
        assert_eq!(inbox[0].pr_title, "Tighter opening");
        assert_eq!(proposal.story.chapters[0].content, "<p>B's take.</p>");
    }

    #[tokio::test]
    async fn test_submit_requires_title_and_clone() {
        let (repo, _, _) = repo();
        let submitter = Uuid::new_v4();

        let err = repo
            .submit_proposed_change(
                submitter,
                Uuid::new_v4(),
                ProposalDetails {
                    pr_title: " ".into(),
                    pr_comment: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = repo
            .submit_proposed_change(
                submitter,
                Uuid::new_v4(),
                ProposalDetails {
                    pr_title: "Title".into(),
                    pr_comment: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_accepted_copies_chapters_into_draft() {
        // Arrange — a submitted proposal with an edited chapter.
        let (repo, _, _) = repo();
        let creator = Uuid::new_v4();
        let submitter = Uuid::new_v4();
        let story = repo.create_owned(creator, new_story("Fox")).await.unwrap();
        repo.publish(creator, story.id).await.unwrap();
        repo.clone_story(submitter, story.id).await.unwrap();
        repo.save_chapter(
            StoryScope::Cloned(submitter),
            story.id,
            "chapter_1",
            "<p>Accepted text.</p>".into(),
            None,
        )
        .await
        .unwrap();
        repo.submit_proposed_change(
            submitter,
            story.id,
            ProposalDetails {
                pr_title: "Edit".into(),
                pr_comment: String::new(),
            },
        )
        .await
        .unwrap();

        // Act
        repo.resolve_proposed_change(creator, story.id, Disposition::Accepted)
            .await
            .unwrap();

        // Assert — draft carries the proposal's chapters, inbox is empty,
        // catalog copy untouched until re-publish.
        let draft = repo.get_story(StoryScope::Owned(creator), story.id).await.unwrap();
        assert_eq!(draft.chapters.len(), 1);
        assert_eq!(draft.chapters[0].content, "<p>Accepted text.</p>");
        assert_eq!(draft.revision, 1);
        assert!(repo.list_proposed(creator).await.unwrap().is_empty());
        let catalog = repo.get_story(StoryScope::Catalog, story.id).await.unwrap();
        assert!(catalog.chapters.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_rejected_discards_proposal_only() {
        // Arrange
        let (repo, _, _) = repo();
        let creator = Uuid::new_v4();
        let submitter = Uuid::new_v4();
        let story = repo.create_owned(creator, new_story("Fox")).await.unwrap();
        repo.publish(creator, story.id).await.unwrap();
        repo.clone_story(submitter, story.id).await.unwrap();
        repo.submit_proposed_change(
            submitter,
            story.id,
            ProposalDetails {
                pr_title: "Edit".into(),
                pr_comment: String::new(),
            },
        )
        .await
        .unwrap();

        // Act
        repo.resolve_proposed_change(creator, story.id, Disposition::Rejected)
            .await
            .unwrap();

        // Assert
        assert!(repo.list_proposed(creator).await.unwrap().is_empty());
        let draft = repo.get_story(StoryScope::Owned(creator), story.id).await.unwrap();
        assert!(draft.chapters.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_missing_proposal_is_not_found() {
        let (repo, _, _) = repo();
        let err = repo
            .resolve_proposed_change(Uuid::new_v4(), Uuid::new_v4(), Disposition::Accepted)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_catalog_surfaces_store_failure() {
        let repo = StoryRepository::new(
            Arc::new(FailingDocumentStore),
            Arc::new(MemoryBlobStore::default()),
            Arc::new(FixedClock(fixed_now())),
        );
        let err = repo.list_catalog().await.unwrap_err();
        assert!(matches!(err, DomainError::Infrastructure(_)));
    }
}
