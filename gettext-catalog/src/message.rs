// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The per-message record kept by the catalog.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::reference::{insert_sorted, Reference};

/// One logical message, identified within a domain by its id and
/// optional context.
///
/// References are kept sorted and free of duplicates. Extracted
/// comments are kept in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    #[serde(rename = "msgid")]
    pub id: String,
    #[serde(
        rename = "msgid_plural",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plural_id: Option<String>,
    #[serde(rename = "msgctxt", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(rename = "extractedComments", default)]
    pub extracted_comments: Vec<String>,
}

impl MessageEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_plural_id(mut self, plural_id: impl Into<String>) -> Self {
        self.plural_id = Some(plural_id.into());
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.add_reference(reference);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.add_comment(comment.into());
        self
    }

    /// Add a reference at its sorted position, unless an equal one is
    /// already present.
    pub fn add_reference(&mut self, reference: Reference) -> bool {
        insert_sorted(&mut self.references, reference)
    }

    /// Append an extracted comment, unless it is already present.
    pub fn add_comment(&mut self, comment: String) -> bool {
        if self.extracted_comments.contains(&comment) {
            return false;
        }
        self.extracted_comments.push(comment);
        true
    }

    /// Sort and deduplicate references and comments which were filled
    /// in directly, e.g. by deserializing a batch.
    pub(crate) fn normalize(&mut self) {
        self.references.sort();
        self.references.dedup();
        let comments = std::mem::take(&mut self.extracted_comments);
        for comment in comments {
            self.add_comment(comment);
        }
    }

    fn current_plural_id(&self) -> Option<&str> {
        self.plural_id.as_deref().filter(|plural| !plural.is_empty())
    }

    /// Fold a later sighting of the same message into this entry.
    ///
    /// References and comments are merged first. A plural id is
    /// adopted if this entry has none yet, a different non-empty
    /// plural id is a [`CatalogError::PluralMismatch`]. A sighting
    /// without a plural id never clears the existing one.
    pub fn merge(&mut self, other: MessageEntry) -> Result<()> {
        for reference in other.references {
            self.add_reference(reference);
        }
        for comment in other.extracted_comments {
            self.add_comment(comment);
        }

        let Some(plural_id) = other.plural_id.filter(|plural| !plural.is_empty()) else {
            return Ok(());
        };
        if let Some(existing) = self.current_plural_id() {
            if existing != plural_id {
                warn!(
                    "Plural {plural_id:?} conflicts with {existing:?} for msgid {:?}",
                    self.id
                );
                return Err(CatalogError::PluralMismatch {
                    msgid: self.id.clone(),
                });
            }
        }
        self.plural_id = Some(plural_id);
        Ok(())
    }
}
