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

//! Collect gettext messages from many extraction passes into one
//! catalog and write it out as PO templates.
//!
//! Extraction drivers scan source files and hand the catalog
//! [`Batch`]es of messages, keyed by domain and by
//! [`message_key`]. The catalog merges repeated sightings of a message
//! into one entry: references are deduplicated and kept sorted,
//! extracted comments are deduplicated in first-seen order, and
//! conflicting plural forms are reported as an error.
//!
//! [`Catalog::export`] renders one [`Document`] per domain with a
//! stable order, so regenerating a template only changes what really
//! changed. Existing PO files can be read back with [`read_po`] and
//! merged like any other batch.

pub mod catalog;
pub mod error;
pub mod export;
pub mod identifiers;
pub mod import;
pub mod message;
pub mod reference;

pub use catalog::{
    message_key, read_batch, Batch, Catalog, CatalogOptions, DomainMessages, CONTEXT_DELIMITER,
    DEFAULT_COMMENT_IDENTIFIER, DEFAULT_DOMAIN,
};
pub use error::{CatalogError, Result};
pub use export::{write_documents, Document, Item};
pub use identifiers::{default_identifiers, Identifiers, Param};
pub use import::read_po;
pub use message::MessageEntry;
pub use reference::{insert_sorted, Reference};
