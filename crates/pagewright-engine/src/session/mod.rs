//! # Editing Session
//!
//! The view-mode state machine of the page editor. A session owns the
//! working `content`, the `original_content` snapshot used for component
//! reinsertion, and the current [`ViewMode`].
//!
//! ## Transitions
//!
//! - **load**: preamble stripped, snapshot taken, forward transform applied;
//!   the session starts in [`ViewMode::Visual`].
//! - **code → visual**: forward transform applied to the current content.
//! - **visual → code**: no transform. The content string is handed to the
//!   code view as is; reversal only happens at save time.
//! - **save**: reverse transform applied against the snapshot. Only a
//!   successful save ([`EditorSession::commit_saved`]) replaces the snapshot.

use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::transform::{ReverseOutcome, strip_preamble, to_source, to_visual};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Visual,
    Code,
}

impl ViewMode {
    pub fn other(self) -> Self {
        match self {
            ViewMode::Visual => ViewMode::Code,
            ViewMode::Code => ViewMode::Visual,
        }
    }
}

/// Body of a content save: which page, its title, the dialect markup and a
/// commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveRequest {
    pub path: RelativePathBuf,
    pub title: String,
    pub content: String,
    pub message: String,
    /// Components that could not be reinserted. Not part of the payload.
    #[serde(skip)]
    pub dropped: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    dialect: Dialect,
    content: String,
    original_content: String,
    view_mode: ViewMode,
}

impl EditorSession {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            content: String::new(),
            original_content: String::new(),
            view_mode: ViewMode::Visual,
        }
    }

    /// Starts a session on freshly fetched content.
    pub fn open(dialect: Dialect, fetched: &str) -> Self {
        let mut session = Self::new(dialect);
        session.load(fetched);
        session
    }

    pub fn load(&mut self, fetched: &str) {
        let stripped = strip_preamble(fetched, &self.dialect);
        self.content = to_visual(&stripped, &self.dialect);
        self.original_content = stripped;
        self.view_mode = ViewMode::Visual;
        log::debug!(
            "session loaded: {} bytes of source, {} bytes visual",
            self.original_content.len(),
            self.content.len()
        );
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Switches to the other view mode and returns it.
    pub fn toggle(&mut self) -> ViewMode {
        self.set_view_mode(self.view_mode.other());
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        if mode == ViewMode::Visual {
            self.content = to_visual(&self.content, &self.dialect);
        }
        log::debug!("view mode {:?} -> {:?}", self.view_mode, mode);
        self.view_mode = mode;
    }

    /// Replaces the working content with an edit from either view.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// The dialect markup a save would submit.
    pub fn prepare_save(&self) -> ReverseOutcome {
        to_source(&self.content, &self.original_content, &self.dialect)
    }

    pub fn save_request(
        &self,
        path: &RelativePath,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> SaveRequest {
        let outcome = self.prepare_save();
        SaveRequest {
            path: path.to_relative_path_buf(),
            title: title.into(),
            content: outcome.source,
            message: message.into(),
            dropped: outcome.dropped,
        }
    }

    /// Records a successful save of `source`.
    pub fn commit_saved(&mut self, source: impl Into<String>) {
        self.original_content = source.into();
        if self.view_mode == ViewMode::Visual {
            self.content = to_visual(&self.original_content, &self.dialect);
        } else {
            self.content = self.original_content.clone();
        }
        log::debug!("save committed; snapshot replaced");
    }
}
