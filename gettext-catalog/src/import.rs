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

//! Read PO documents back into batches for [`Catalog::merge`].

use std::path::Path;

use log::debug;
use polib::catalog::Catalog as PoCatalog;
use polib::message::MessageView;
use polib::po_file;

use crate::catalog::{message_key, Batch, Catalog, DomainMessages};
use crate::error::{CatalogError, Result};
use crate::export::{Document, Item};
use crate::message::MessageEntry;
use crate::reference::Reference;

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| String::from(text))
}

impl Item {
    fn from_message(message: &dyn MessageView) -> Self {
        Self {
            id: String::from(message.msgid()),
            context: non_empty(message.msgctxt()),
            plural_id: message.msgid_plural().ok().and_then(non_empty),
            extracted_comments: message.comments().lines().map(String::from).collect(),
            references: message
                .source()
                .split_whitespace()
                .map(String::from)
                .collect(),
        }
    }

    fn into_entry(self) -> MessageEntry {
        MessageEntry {
            id: self.id,
            plural_id: self.plural_id,
            context: self.context,
            references: self
                .references
                .iter()
                .map(|source| Reference::from_po_str(source))
                .collect(),
            extracted_comments: self.extracted_comments,
        }
    }
}

impl Document {
    /// Read the items of a parsed PO file.
    ///
    /// The PO format has no notion of domain, so the caller supplies
    /// it.
    pub fn from_po_catalog(catalog: &PoCatalog, domain: &str) -> Self {
        let mut document = Document::new(domain);
        document.items = catalog
            .messages()
            .map(|message| Item::from_message(message))
            .collect();
        document
    }

    /// Turn the document into a batch with a single domain.
    ///
    /// References are split on the first `:` into filename and line,
    /// so exporting the batch again gives the same reference strings.
    pub fn into_batch(self) -> Batch {
        let mut messages = DomainMessages::new();
        for item in self.items {
            let key = message_key(&item.id, item.context.as_deref());
            messages.insert(key, item.into_entry());
        }
        debug!(
            "Imported {} messages into domain {:?}",
            messages.len(),
            self.domain
        );
        Batch::from([(self.domain, messages)])
    }
}

/// Parse the PO file at `path` and put all its messages in `domain`.
pub fn read_po(path: &Path, domain: &str) -> Result<Batch> {
    let catalog = po_file::parse(path).map_err(|err| CatalogError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(Document::from_po_catalog(&catalog, domain).into_batch())
}

impl Catalog {
    /// Convert a parsed PO file into a batch.
    ///
    /// Uses the default domain when `domain` is `None`.
    pub fn import(&self, catalog: &PoCatalog, domain: Option<&str>) -> Batch {
        let domain = domain.unwrap_or(self.default_domain());
        Document::from_po_catalog(catalog, domain).into_batch()
    }

    /// Read the PO file at `path` and merge its messages.
    ///
    /// Uses the default domain when `domain` is `None`.
    pub fn merge_po_file(&mut self, path: &Path, domain: Option<&str>) -> Result<()> {
        let domain = String::from(domain.unwrap_or(self.default_domain()));
        self.merge(read_po(path, &domain)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::write_documents;
    use pretty_assertions::assert_eq;

    fn item(id: &str, references: &[&str]) -> Item {
        Item {
            id: String::from(id),
            references: references.iter().map(|s| String::from(*s)).collect(),
            ..Item::default()
        }
    }

    #[test]
    fn test_into_batch() {
        let mut document = Document::new("errors");
        document.items = vec![
            Item {
                context: Some(String::from("menu")),
                plural_id: Some(String::from("files")),
                extracted_comments: vec![String::from("Shown in the menu")],
                ..item("file", &["README", "src/menu.js:12"])
            },
            item("file", &[]),
        ];

        let batch = document.into_batch();
        assert_eq!(batch.keys().collect::<Vec<_>>(), vec!["errors"]);
        let messages = &batch["errors"];
        assert_eq!(
            messages["menu\u{4}file"],
            MessageEntry::new("file")
                .with_context("menu")
                .with_plural_id("files")
                .with_comment("Shown in the menu")
                .with_reference(Reference::new("src/menu.js", 12))
                .with_reference(Reference {
                    filename: Some(String::from("README")),
                    ..Reference::default()
                })
        );
        assert_eq!(messages["file"], MessageEntry::new("file"));
    }

    #[test]
    fn test_import_then_export() {
        let references = [
            "a.js:1",
            "b.js",
            "c.js:10",
            "dir:with:colons",
            "foo.js:+5",
            "foo.js:07",
        ];
        let mut document = Document::new("messages");
        document.items = vec![item("foo", &references)];

        let mut catalog = Catalog::new();
        catalog.merge(document.clone().into_batch()).unwrap();
        assert_eq!(catalog.export(), vec![document]);
    }

    #[test]
    fn test_po_file_round_trip() -> anyhow::Result<()> {
        let mut catalog = Catalog::new();
        catalog.add_message(
            None,
            MessageEntry::new("Open file")
                .with_context("menu")
                .with_comment("Shown in the menu")
                .with_comment("Keep it short")
                .with_reference(Reference::new("src/menu.js", 12))
                .with_reference(Reference::new("src/app.js", 3)),
        )?;
        catalog.add_message(
            Some("errors"),
            MessageEntry::new("{n} file missing")
                .with_plural_id("{n} files missing")
                .with_reference(Reference::new("src/io.js", 40)),
        )?;
        let documents = catalog.export();

        let tmpdir = tempfile::tempdir()?;
        let paths = write_documents(tmpdir.path(), &documents)?;
        assert_eq!(
            paths,
            vec![
                tmpdir.path().join("errors.pot"),
                tmpdir.path().join("messages.pot")
            ]
        );

        let mut reread = Catalog::new();
        reread.merge_po_file(&paths[0], Some("errors"))?;
        reread.merge_po_file(&paths[1], None)?;
        assert_eq!(reread.export(), documents);
        Ok(())
    }

    #[test]
    fn test_multiline_comment_is_split() -> anyhow::Result<()> {
        // PO files have one extracted comment per `#.` line, a comment
        // spanning two lines comes back as two comments.
        let mut document = Document::new("messages");
        document.items = vec![Item {
            extracted_comments: vec![String::from("first line\nsecond line")],
            ..item("foo", &["a.js:1"])
        }];

        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("messages.pot");
        document.write(&path)?;

        let batch = read_po(&path, "messages")?;
        assert_eq!(
            batch["messages"]["foo"].extracted_comments,
            vec!["first line", "second line"]
        );
        Ok(())
    }

    #[test]
    fn test_read_po_missing_file() {
        let err = read_po(Path::new("does-not-exist.po"), "messages").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }
}
