//! Comment drafting and validation.

use crate::model::Comment;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Longest comment body accepted, in characters.
pub const MAX_COMMENT_CHARS: usize = 500;

/// Why a comment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommentError {
    /// Nothing but whitespace.
    #[error("Comment is empty")]
    Empty,
    /// Body longer than the limit.
    #[error("Comment is too long ({len} characters, max {max})")]
    TooLong {
        /// Characters submitted.
        len: usize,
        /// Limit.
        max: usize,
    },
    /// No listing is open to comment on.
    #[error("No listing selected")]
    NoListing,
}

/// Text being typed into the comment box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    body: String,
}

impl CommentDraft {
    /// Empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.body.push(ch);
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.body.pop();
    }

    /// Validate and turn the draft into a [`Comment`].
    ///
    /// # Errors
    ///
    /// `Empty` for blank text, `TooLong` past [`MAX_COMMENT_CHARS`].
    pub fn finish(&self, author: &str, now: DateTime<Utc>) -> Result<Comment, CommentError> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(CommentError::Empty);
        }
        let len = body.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(CommentError::TooLong {
                len,
                max: MAX_COMMENT_CHARS,
            });
        }
        Ok(Comment {
            author: author.to_string(),
            body: body.to_string(),
            created_at: now,
        })
    }
}
