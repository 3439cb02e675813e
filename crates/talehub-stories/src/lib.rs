//! TaleHub Stories — the story lifecycle bounded context.
//!
//! A story exists in up to four places: the creator's authoritative draft
//! (`users/{uid}/myStories`), the published catalog copy (`stories`),
//! per-user clones of the published copy (`users/{uid}/myClonedStories`),
//! and proposed-change bundles submitted back to the creator
//! (`users/{creatorUid}/pr`). [`repository::StoryRepository`] mediates every
//! read and write across those collections; [`editor::EditorSession`] is the
//! in-memory chapter buffer a writing UI drives.

pub mod editor;
pub mod model;
pub mod paths;
pub mod repository;
