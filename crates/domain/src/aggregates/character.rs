//! Character aggregate - a homebrew document bundling monsters with metadata
//!
//! A `Character` is what gets flushed to disk: a `_meta` block with
//! bookkeeping timestamps and sources, followed by the authored monsters.
//!
//! # Draft state
//!
//! On the wire a draft is a document whose `dateLastModified` is still zero.
//! Code should ask [`Character::state`] instead of comparing timestamps.

use serde::{Deserialize, Serialize};

use crate::entities::Monster;

/// Homebrew document: metadata plus an ordered monster list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    #[serde(rename = "_meta")]
    pub meta: Meta,
    #[serde(rename = "monster")]
    pub monsters: Vec<Monster>,
}

/// Lifecycle of a [`Character`], derived from its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    /// `dateLastModified` has never been set.
    Draft,
    /// Stamped with a modification time (Unix seconds).
    Finalized { last_modified: i64 },
}

impl Character {
    /// Build an empty document stamped at `timestamp` (Unix seconds).
    ///
    /// Both dates are set to `timestamp` and the hash is its lower-case hex form.
    pub fn stamped(timestamp: i64, sources: Vec<Source>) -> Self {
        Self {
            meta: Meta {
                date_last_modified_hash: signed_hex(timestamp),
                sources,
                date_added: timestamp,
                date_last_modified: timestamp,
            },
            monsters: Vec::new(),
        }
    }

    pub fn state(&self) -> CharacterState {
        match self.meta.date_last_modified {
            0 => CharacterState::Draft,
            last_modified => CharacterState::Finalized { last_modified },
        }
    }

    pub fn is_draft(&self) -> bool {
        self.state() == CharacterState::Draft
    }
}

/// Lower-case hex with a leading minus for negative values (`-5` is `"-5"`).
///
/// `{:x}` on a signed integer prints its two's complement, which is not what
/// readers of the hash expect.
fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    }
}

/// Bookkeeping block serialized as `_meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    #[serde(rename = "_dateLastModifiedHash")]
    pub date_last_modified_hash: String,
    pub sources: Vec<Source>,
    pub date_added: i64,
    pub date_last_modified: i64,
}

/// Bibliographic entry for a homebrew source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    pub json: String,
    pub abbreviation: String,
    pub version: String,
    pub authors: Vec<String>,
    pub converted_by: Vec<String>,
}
