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

//! Render the catalog as one PO document per domain.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use polib::catalog::Catalog as PoCatalog;
use polib::message::Message;
use polib::metadata::CatalogMetadata;

use crate::catalog::{Catalog, DEFAULT_DOMAIN};
use crate::error::Result;
use crate::message::MessageEntry;

/// A single message as it appears in a PO file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub context: Option<String>,
    pub plural_id: Option<String>,
    pub extracted_comments: Vec<String>,
    /// References of the form `filename[:line]`.
    pub references: Vec<String>,
}

impl Item {
    fn from_entry(entry: &MessageEntry) -> Self {
        let references = entry
            .references
            .iter()
            .filter_map(|reference| {
                let source = reference.to_po_string();
                if source.is_none() {
                    debug!("Dropping empty reference for msgid {:?}", entry.id);
                }
                source
            })
            .collect();
        Self {
            id: entry.id.clone(),
            context: entry.context.clone(),
            plural_id: entry.plural_id.clone(),
            extracted_comments: entry.extracted_comments.clone(),
            references,
        }
    }

    fn to_message(&self) -> Message {
        let mut builder = match &self.plural_id {
            Some(plural_id) => {
                let mut builder = Message::build_plural();
                builder.with_msgid_plural(plural_id.clone());
                builder.with_msgstr_plural(vec![String::new(), String::new()]);
                builder
            }
            None => Message::build_singular(),
        };
        builder.with_msgid(self.id.clone());
        if let Some(context) = &self.context {
            builder.with_msgctxt(context.clone());
        }
        builder
            .with_comments(self.extracted_comments.join("\n"))
            .with_source(self.references.join("\n"));
        builder.done()
    }
}

/// The messages of one domain, ready to be written as a PO file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// The domain is not part of the PO format, it tells the caller
    /// which domain the document was rendered from.
    pub domain: String,
    pub headers: Vec<(String, String)>,
    pub items: Vec<Item>,
}

impl Document {
    /// Create an empty document with the standard headers.
    pub fn new(domain: impl Into<String>) -> Self {
        let headers = [
            ("Content-Type", "text/plain; charset=UTF-8"),
            ("Content-Transfer-Encoding", "8bit"),
            ("Project-Id-Version", ""),
        ];
        Self {
            domain: domain.into(),
            headers: headers
                .into_iter()
                .map(|(name, value)| (String::from(name), String::from(value)))
                .collect(),
            items: Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }

    /// Build the polib catalog for this document.
    pub fn to_po_catalog(&self) -> PoCatalog {
        let mut metadata = CatalogMetadata::new();
        for (name, value) in &self.headers {
            let field = match name.as_str() {
                "Content-Type" => &mut metadata.content_type,
                "Content-Transfer-Encoding" => &mut metadata.content_transfer_encoding,
                "Project-Id-Version" => &mut metadata.project_id_version,
                "Language" => &mut metadata.language,
                "MIME-Version" => &mut metadata.mime_version,
                _ => {
                    debug!("Skipping unsupported header {name:?}");
                    continue;
                }
            };
            *field = value.clone();
        }

        let mut catalog = PoCatalog::new(metadata);
        for item in &self.items {
            catalog.append_or_update(item.to_message());
        }
        catalog
    }

    /// Write the document as a PO file.
    pub fn write(&self, path: &Path) -> Result<()> {
        polib::po_file::write(&self.to_po_catalog(), path)?;
        info!("Wrote {} messages to {}", self.items.len(), path.display());
        Ok(())
    }

    /// The file name for this document: `<domain>.pot`.
    ///
    /// The empty domain is written to `messages.pot`.
    pub fn file_name(&self) -> String {
        let domain = match self.domain.as_str() {
            "" => DEFAULT_DOMAIN,
            domain => domain,
        };
        format!("{domain}.pot")
    }
}

/// Write each document to `<domain>.pot` in `directory`.
///
/// Returns the paths written, in document order.
pub fn write_documents(directory: &Path, documents: &[Document]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    documents
        .iter()
        .map(|document| {
            let path = directory.join(document.file_name());
            document.write(&path)?;
            Ok(path)
        })
        .collect()
}

impl Catalog {
    /// Render one document per domain.
    ///
    /// Documents are sorted by domain, items by msgid and then
    /// context. The result only depends on the catalog contents, not
    /// on the order in which messages were merged.
    pub fn export(&self) -> Vec<Document> {
        let mut documents = self
            .messages()
            .iter()
            .map(|(domain, messages)| {
                let mut document = Document::new(domain.as_str());
                document.items = messages.values().map(Item::from_entry).collect();
                document.items.sort_by(|a, b| {
                    let a_key = (&a.id, a.context.as_deref().unwrap_or_default());
                    let b_key = (&b.id, b.context.as_deref().unwrap_or_default());
                    a_key.cmp(&b_key)
                });
                document
            })
            .collect::<Vec<_>>();
        documents.sort_by(|a, b| a.domain.cmp(&b.domain));
        documents
    }
}
