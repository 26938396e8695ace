//! Document aggregate and history-snapshot rules.
//!
//! A [`Document`] exclusively owns its [`DocumentHistory`] entries. Each entry
//! carries a back-reference to its owner which is only ever set by
//! [`Document::add_history`]; entries cannot be built anywhere else.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Entity name used in [`CoreError::NotFound`].
pub const ENTITY_DOCUMENT: &str = "Document";

/// Change description recorded on every history entry produced by an update.
pub const CHANGE_DESCRIPTION_UPDATED: &str = "Document updated";

/// Maximum length for a document title.
pub const MAX_TITLE_LENGTH: usize = 255;

/* --------------------------------------------------------------------------
Content format
-------------------------------------------------------------------------- */

/// Markup type of a document's content.
///
/// Serialized (and stored) as its symbolic name, e.g. `"MARKDOWN"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentFormat {
    #[default]
    Markdown,
    Html,
    PlainText,
}

impl ContentFormat {
    /// Return the format name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "MARKDOWN",
            Self::Html => "HTML",
            Self::PlainText => "PLAIN_TEXT",
        }
    }

    /// Parse a stored format name. Returns `None` for unknown values.
    pub fn from_str_db(s: &str) -> Option<Self> {
        match s {
            "MARKDOWN" => Some(Self::Markdown),
            "HTML" => Some(Self::Html),
            "PLAIN_TEXT" => Some(Self::PlainText),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Inputs
-------------------------------------------------------------------------- */

/// Incoming document representation for both create and update.
///
/// Update has full-replace semantics: every field is taken from the payload,
/// so callers resend the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub content_format: Option<ContentFormat>,
    #[serde(default)]
    pub author_id: Option<DbId>,
}

/// Document fields before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
    pub content_format: ContentFormat,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DocumentDraft {
    /// Build the record for a brand-new document.
    ///
    /// Both timestamps are set to `now` and a missing format falls back to
    /// [`ContentFormat::Markdown`].
    pub fn for_create(input: DocumentInput, now: Timestamp) -> Self {
        Self {
            title: input.title,
            content: input.content,
            content_format: input.content_format.unwrap_or_default(),
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// History entry fields without the owner back-reference.
///
/// Only turns into a [`DocumentHistory`] by being attached to a [`Document`],
/// either through [`Document::add_history`] or [`Document::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot {
    /// `None` until the store has persisted the entry.
    id: Option<DbId>,
    pub editor_id: Option<DbId>,
    pub content: String,
    pub edited_at: Timestamp,
    pub change_description: String,
}

impl HistorySnapshot {
    /// Snapshot of content as it stood immediately before an update.
    pub fn before_update(previous_content: String, editor_id: Option<DbId>, now: Timestamp) -> Self {
        Self {
            id: None,
            editor_id,
            content: previous_content,
            edited_at: now,
            change_description: CHANGE_DESCRIPTION_UPDATED.to_string(),
        }
    }

    /// Rehydrate an entry a store has already persisted under `id`.
    ///
    /// Only [`Document::assemble`] honours the id; [`Document::add_history`]
    /// always appends a new, unsaved entry.
    pub fn stored(
        id: DbId,
        editor_id: Option<DbId>,
        content: String,
        edited_at: Timestamp,
        change_description: String,
    ) -> Self {
        Self {
            id: Some(id),
            editor_id,
            content,
            edited_at,
            change_description,
        }
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }
}

/* --------------------------------------------------------------------------
Aggregate
-------------------------------------------------------------------------- */

/// Immutable snapshot of a document's content before one update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHistory {
    id: Option<DbId>,
    document_id: DbId,
    editor_id: Option<DbId>,
    content: String,
    edited_at: Timestamp,
    change_description: String,
}

impl DocumentHistory {
    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    /// Identifier of the owning document.
    pub fn document_id(&self) -> DbId {
        self.document_id
    }

    pub fn editor_id(&self) -> Option<DbId> {
        self.editor_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn edited_at(&self) -> Timestamp {
        self.edited_at
    }

    pub fn change_description(&self) -> &str {
        &self.change_description
    }

    /// Whether the store has not yet written this entry.
    pub fn is_unsaved(&self) -> bool {
        self.id.is_none()
    }

    pub(crate) fn assign_id(&mut self, id: DbId) {
        self.id = Some(id);
    }
}

/// A titled content record with its append-only edit history.
///
/// The identifier is fixed once the store assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    id: DbId,
    pub title: String,
    pub content: String,
    pub content_format: ContentFormat,
    pub author_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    history: Vec<DocumentHistory>,
}

impl Document {
    /// Assemble a persisted document from its stored fields and history rows.
    ///
    /// History is attached in the order given, which must be chronological.
    pub fn assemble(
        id: DbId,
        draft: DocumentDraft,
        history: impl IntoIterator<Item = HistorySnapshot>,
    ) -> Self {
        let mut document = Self {
            id,
            title: draft.title,
            content: draft.content,
            content_format: draft.content_format,
            author_id: draft.author_id,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
            history: Vec::new(),
        };
        for snapshot in history {
            let id = snapshot.id;
            document.push_history(id, snapshot);
        }
        document
    }

    pub fn id(&self) -> DbId {
        self.id
    }

    /// Append a new, unsaved history entry, setting its back-reference to this
    /// document. Any id carried by `snapshot` is discarded so the store always
    /// writes the entry.
    pub fn add_history(&mut self, snapshot: HistorySnapshot) -> &DocumentHistory {
        self.push_history(None, snapshot)
    }

    fn push_history(&mut self, id: Option<DbId>, snapshot: HistorySnapshot) -> &DocumentHistory {
        self.history.push(DocumentHistory {
            id,
            document_id: self.id,
            editor_id: snapshot.editor_id,
            content: snapshot.content,
            edited_at: snapshot.edited_at,
            change_description: snapshot.change_description,
        });
        let last = self.history.len() - 1;
        &self.history[last]
    }

    /// Full history, oldest first.
    pub fn history(&self) -> &[DocumentHistory] {
        &self.history
    }

    /// Most recently appended history entry, if any.
    pub fn latest_history(&self) -> Option<&DocumentHistory> {
        self.history.last()
    }

    /// History entries the store has not written yet.
    pub fn unsaved_history(&self) -> impl Iterator<Item = &DocumentHistory> {
        self.history.iter().filter(|h| h.is_unsaved())
    }

    pub(crate) fn unsaved_history_mut(&mut self) -> impl Iterator<Item = &mut DocumentHistory> {
        self.history.iter_mut().filter(|h| h.is_unsaved())
    }

    /// Take the mutable fields of `changed` and append its unsaved history
    /// entries after this document's own history. Entries `changed` loaded
    /// from storage are skipped.
    pub(crate) fn merge_changes(&mut self, changed: Document) {
        self.title = changed.title;
        self.content = changed.content;
        self.content_format = changed.content_format;
        self.author_id = changed.author_id;
        self.updated_at = changed.updated_at.max(self.created_at);

        let document_id = self.id;
        self.history.extend(
            changed
                .history
                .into_iter()
                .filter(DocumentHistory::is_unsaved)
                .map(|mut entry| {
                    entry.document_id = document_id;
                    entry
                }),
        );
    }

    /// Snapshot the current content, then overwrite every field from `input`.
    ///
    /// The snapshot's editor is the incoming author. `updated_at` never moves
    /// before `created_at`, even if the clock has gone backwards.
    pub fn apply_update(&mut self, input: DocumentInput, now: Timestamp) {
        let previous = std::mem::replace(&mut self.content, input.content);
        self.add_history(HistorySnapshot::before_update(previous, input.author_id, now));

        self.title = input.title;
        self.content_format = input.content_format.unwrap_or_default();
        self.author_id = input.author_id;
        self.updated_at = now.max(self.created_at);
    }
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// Validate a document title (non-empty, at most [`MAX_TITLE_LENGTH`] chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an incoming document payload.
pub fn validate_input(input: &DocumentInput) -> Result<(), CoreError> {
    validate_title(&input.title)
}
