//! The editor session.
//!
//! In-memory bridge between a rich-text editor widget and the Story
//! Repository: holds the chapter currently being edited plus the full
//! chapter sequence, and persists the active buffer on explicit save.
//! Nothing here touches the store except [`EditorSession::load`] and
//! [`EditorSession::save`].

use uuid::Uuid;

use talehub_core::error::DomainError;

use crate::model::{Chapter, StoryScope, chapter_key};
use crate::repository::StoryRepository;

/// A per-story editing session.
///
/// Selecting another chapter or minting a new one replaces the active
/// buffer without warning — an unsaved buffer is simply dropped, matching
/// the editor this backs.
pub struct EditorSession {
    repository: StoryRepository,
    scope: StoryScope,
    story_id: Uuid,
    chapters: Vec<Chapter>,
    chapter_seq: u32,
    revision: i64,
    active_key: Option<String>,
    buffer: String,
    minted: u32,
}

impl EditorSession {
    /// Opens a session on a story, selecting its first chapter if it has
    /// any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the story is missing from the
    /// scope.
    pub async fn load(
        repository: StoryRepository,
        scope: StoryScope,
        story_id: Uuid,
    ) -> Result<Self, DomainError> {
        let story = repository.get_story(scope, story_id).await?;
        let active_key = story.chapters.first().map(|c| c.key.clone());
        let buffer = story
            .chapters
            .first()
            .map(|c| c.content.clone())
            .unwrap_or_default();

        Ok(Self {
            repository,
            scope,
            story_id,
            chapters: story.chapters,
            chapter_seq: story.chapter_seq,
            revision: story.revision,
            active_key,
            buffer,
            minted: 0,
        })
    }

    /// The key of the chapter currently in the buffer.
    #[must_use]
    pub fn active_chapter(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    /// The active buffer content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.buffer
    }

    /// The chapter sequence as of the last load or save.
    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Switches the buffer to an existing chapter, dropping any unsaved
    /// content.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if the story has no chapter with
    /// `key`.
    pub fn select_chapter(&mut self, key: &str) -> Result<(), DomainError> {
        let chapter = self
            .chapters
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| DomainError::NotFound(format!("chapter {key}")))?;
        self.buffer = chapter.content.clone();
        self.active_key = Some(key.to_owned());
        Ok(())
    }

    /// Mints the next chapter key and selects it with an empty buffer.
    /// Nothing is persisted until [`EditorSession::save`].
    ///
    /// Keys derive from the story's stored counter plus the chapters
    /// minted in this session, so an abandoned mint leaves a gap rather
    /// than a reused key.
    pub fn create_chapter(&mut self) -> String {
        self.minted += 1;
        let key = chapter_key(self.chapter_seq + self.minted);
        self.buffer.clear();
        self.active_key = Some(key.clone());
        key
    }

    /// Replaces the active buffer content. The editor widget's change
    /// callback lands here.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
    }

    /// Persists the active buffer as its chapter and refreshes local state
    /// from the saved story.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no chapter is selected or the
    /// buffer is empty, `DomainError::RevisionConflict` if the story was
    /// written by someone else since this session last loaded or saved it.
    pub async fn save(&mut self) -> Result<(), DomainError> {
        let Some(key) = self.active_key.clone() else {
            return Err(DomainError::Validation("no chapter selected".into()));
        };
        if self.buffer.trim().is_empty() {
            return Err(DomainError::Validation(
                "write something before saving".into(),
            ));
        }

        let story = self
            .repository
            .save_chapter(
                self.scope,
                self.story_id,
                &key,
                self.buffer.clone(),
                Some(self.revision),
            )
            .await?;

        self.chapters = story.chapters;
        self.chapter_seq = story.chapter_seq;
        self.revision = story.revision;
        self.minted = 0;
        Ok(())
    }
}
