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

//! The catalog store and the merge engine.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::identifiers::{default_identifiers, Identifiers};
use crate::message::MessageEntry;

/// Separator between context and msgid in a message key.
///
/// This is the same separator Jed uses, it never appears in message
/// text.
pub const CONTEXT_DELIMITER: char = '\u{4}';

/// The domain used when none is given.
pub const DEFAULT_DOMAIN: &str = "messages";

/// Messages of one domain, by key.
pub type DomainMessages = BTreeMap<String, MessageEntry>;

/// Messages by domain and key, the unit of work for [`Catalog::merge`].
pub type Batch = BTreeMap<String, DomainMessages>;

/// Compute the key of a message within its domain.
///
/// An empty context is the same as no context.
pub fn message_key(msgid: &str, msgctxt: Option<&str>) -> String {
    match msgctxt {
        Some(msgctxt) if !msgctxt.is_empty() => format!("{msgctxt}{CONTEXT_DELIMITER}{msgid}"),
        _ => String::from(msgid),
    }
}

/// Load a batch from a JSON file.
pub fn read_batch(path: &Path) -> Result<Batch> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// The comment marker extraction drivers look for by default.
pub const DEFAULT_COMMENT_IDENTIFIER: &str = "gettext-comment";

// Accepts either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(name) => vec![name],
        OneOrMany::Many(names) => names,
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogOptions {
    pub identifiers: Identifiers,
    /// An empty string is a valid domain.
    pub default_domain: String,
    /// Names of the subexpressions from which extraction drivers take
    /// extracted comments.
    #[serde(deserialize_with = "one_or_many")]
    pub comment_identifiers: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            identifiers: default_identifiers().clone(),
            default_domain: String::from(DEFAULT_DOMAIN),
            comment_identifiers: vec![String::from(DEFAULT_COMMENT_IDENTIFIER)],
        }
    }
}

/// Messages collected from one extraction session.
///
/// The catalog only grows: messages are added with [`Catalog::merge`]
/// and never removed. Merging is not synchronized, callers which feed
/// it from several threads must serialize the calls.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    options: CatalogOptions,
    messages: Batch,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog after checking that every identifier has a
    /// msgid parameter.
    pub fn with_options(options: CatalogOptions) -> Result<Self> {
        options.identifiers.validate()?;
        Ok(Self {
            options,
            messages: Batch::new(),
        })
    }

    pub fn identifiers(&self) -> &Identifiers {
        &self.options.identifiers
    }

    pub fn default_domain(&self) -> &str {
        &self.options.default_domain
    }

    pub fn comment_identifiers(&self) -> &[String] {
        &self.options.comment_identifiers
    }

    /// Check whether a comment marker introduces an extracted comment.
    pub fn is_comment_identifier(&self, name: &str) -> bool {
        self.options
            .comment_identifiers
            .iter()
            .any(|identifier| identifier == name)
    }

    pub fn messages(&self) -> &Batch {
        &self.messages
    }

    pub fn domain(&self, domain: &str) -> Option<&DomainMessages> {
        self.messages.get(domain)
    }

    pub fn get(&self, domain: &str, key: &str) -> Option<&MessageEntry> {
        self.domain(domain)?.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Merge a batch of messages into the catalog.
    ///
    /// New domains and new keys are taken over as they are (with their
    /// references sorted and their comments deduplicated). Messages
    /// with a known key are merged with [`MessageEntry::merge`].
    ///
    /// A plural mismatch stops the merge. Messages merged before the
    /// conflicting one stay in the catalog.
    pub fn merge(&mut self, batch: Batch) -> Result<()> {
        for (domain, messages) in batch {
            let existing = match self.messages.entry(domain) {
                Entry::Vacant(entry) => {
                    debug!(
                        "Adding domain {:?} with {} messages",
                        entry.key(),
                        messages.len()
                    );
                    let messages = entry.insert(messages);
                    messages.values_mut().for_each(MessageEntry::normalize);
                    continue;
                }
                Entry::Occupied(entry) => entry.into_mut(),
            };

            for (key, message) in messages {
                match existing.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(message).normalize();
                    }
                    Entry::Occupied(mut entry) => {
                        debug!("Merging message {:?}", entry.key());
                        entry.get_mut().merge(message)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Merge a single message, keyed by its msgid and context.
    ///
    /// Uses the default domain when `domain` is `None`.
    pub fn add_message(&mut self, domain: Option<&str>, message: MessageEntry) -> Result<()> {
        let domain = domain.unwrap_or(&self.options.default_domain);
        let key = message_key(&message.id, message.context.as_deref());
        let batch = Batch::from([(String::from(domain), DomainMessages::from([(key, message)]))]);
        self.merge(batch)
    }
}
