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

//! Source locations attached to messages.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A source location where a message was found.
///
/// Every field is optional: a missing line is not the same as line
/// `0`. Ordering treats a missing filename as `""` and missing
/// numbers as `0`, but [`Reference::to_po_string`] only renders the
/// fields that were actually recorded.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_column: Option<usize>,
    /// Carried along for extraction drivers, ignored by ordering and
    /// rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_column: Option<usize>,
}

impl Reference {
    pub fn new(filename: impl Into<String>, first_line: usize) -> Self {
        Self {
            filename: Some(filename.into()),
            first_line: Some(first_line),
            ..Self::default()
        }
    }

    /// Set the first column.
    pub fn with_column(mut self, first_column: usize) -> Self {
        self.first_column = Some(first_column);
        self
    }

    fn sort_key(&self) -> (&str, usize, usize) {
        (
            self.filename.as_deref().unwrap_or_default(),
            self.first_line.unwrap_or_default(),
            self.first_column.unwrap_or_default(),
        )
    }

    /// Render the reference as `filename[:line]`.
    ///
    /// Returns `None` when there is neither a filename nor a line,
    /// such a reference has no usable location.
    pub fn to_po_string(&self) -> Option<String> {
        let filename = self.filename.as_deref().unwrap_or_default();
        match self.first_line {
            Some(line) => Some(format!("{filename}:{line}")),
            None if filename.is_empty() => None,
            None => Some(String::from(filename)),
        }
    }

    /// Parse a `filename[:line]` reference from a PO file.
    ///
    /// The text is split on the first `:`. When the remainder is not a
    /// line number written the way [`Reference::to_po_string`] writes
    /// it (no sign, no leading zeros), the whole text is kept as the
    /// filename so that rendering it again gives back the same string.
    pub fn from_po_str(source: &str) -> Self {
        let (filename, first_line) = match source.split_once(':') {
            Some((path, lineno)) => match lineno.parse::<usize>() {
                Ok(number) if number.to_string() == lineno => (path, Some(number)),
                _ => (source, None),
            },
            None => (source, None),
        };
        Self {
            filename: Some(String::from(filename)),
            first_line,
            ..Self::default()
        }
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Two references are duplicates exactly when they sort equal.
impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Reference {}

/// Insert `item` into the sorted `items`, unless an equal element is
/// already present.
///
/// Returns `true` if the item was inserted.
pub fn insert_sorted<T: Ord>(items: &mut Vec<T>, item: T) -> bool {
    match items.binary_search(&item) {
        Ok(_) => false,
        Err(pos) => {
            items.insert(pos, item);
            true
        }
    }
}
