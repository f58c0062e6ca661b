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

//! Merge gettext messages into PO templates.
//!
//! Inputs are either JSON batches written by extraction drivers or
//! existing PO/POT files. All of them are merged into one catalog,
//! which is then written as one `<domain>.pot` file per domain.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use gettext_catalog::{read_batch, read_po, Catalog, CatalogOptions, Identifiers, DEFAULT_DOMAIN};
use log::info;

#[derive(Clone, Debug, Parser)]
#[command(version, about)]
enum Args {
    /// Merge the inputs and write one template per domain.
    Merge {
        /// Directory to which the `<domain>.pot` files are written.
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Merge the inputs and print the domain and msgid of each message.
    List {
        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(Clone, Debug, clap::Args)]
struct Inputs {
    /// Domain for messages read from PO files. Defaults to the
    /// default domain.
    #[arg(long)]
    domain: Option<String>,
    /// Domain used when none is given.
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    default_domain: String,
    /// JSON file mapping helper function names to their parameters.
    #[arg(long, value_name = "identifiers.json")]
    identifiers: Option<PathBuf>,
    /// JSON batches (`.json`) or PO files (`.po`, `.pot`).
    #[arg(required = true, id = "input")]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    match Args::parse() {
        Args::Merge { output, inputs } => {
            let catalog = build_catalog(&inputs)?;
            merge(&catalog, &output)?;
        }
        Args::List { inputs } => {
            let catalog = build_catalog(&inputs)?;
            list(&catalog);
        }
    }
    Ok(())
}

fn load_options(inputs: &Inputs) -> anyhow::Result<CatalogOptions> {
    let mut options = CatalogOptions {
        default_domain: inputs.default_domain.clone(),
        ..CatalogOptions::default()
    };
    if let Some(path) = &inputs.identifiers {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        options.identifiers = serde_json::from_str::<Identifiers>(&json)
            .with_context(|| format!("Could not parse {}", path.display()))?;
    }
    Ok(options)
}

fn is_po_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("po" | "pot")
    )
}

/// Merge all inputs into a new catalog.
fn build_catalog(inputs: &Inputs) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::with_options(load_options(inputs)?)?;
    let domain = inputs
        .domain
        .clone()
        .unwrap_or_else(|| String::from(catalog.default_domain()));
    for path in &inputs.files {
        info!("Merging {}", path.display());
        let batch = if is_po_file(path) {
            read_po(path, &domain).with_context(|| format!("Could not read {}", path.display()))?
        } else {
            read_batch(path).with_context(|| format!("Could not read {}", path.display()))?
        };
        catalog
            .merge(batch)
            .with_context(|| format!("Could not merge {}", path.display()))?;
    }
    Ok(catalog)
}

fn merge(catalog: &Catalog, output: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let documents = catalog.export();
    gettext_catalog::write_documents(output, &documents)
        .with_context(|| format!("Could not write templates to {}", output.display()))
}

fn listing(catalog: &Catalog) -> Vec<String> {
    catalog
        .export()
        .into_iter()
        .flat_map(|document| {
            let domain = document.domain;
            document
                .items
                .into_iter()
                .map(move |item| format!("{domain}\t{}", item.id))
        })
        .collect()
}

#[allow(clippy::print_stdout)]
fn list(catalog: &Catalog) {
    for line in listing(catalog) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gettext_catalog::CatalogError;
    use pretty_assertions::assert_eq;

    fn inputs(files: Vec<PathBuf>) -> Inputs {
        Inputs {
            domain: None,
            default_domain: String::from(DEFAULT_DOMAIN),
            identifiers: None,
            files,
        }
    }

    #[test]
    fn test_is_po_file() {
        assert!(is_po_file(Path::new("de.po")));
        assert!(is_po_file(Path::new("po/messages.pot")));
        assert!(!is_po_file(Path::new("batch.json")));
        assert!(!is_po_file(Path::new("README")));
    }

    #[test]
    fn test_merge_batches_and_po_files() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let first = tmpdir.path().join("first.json");
        fs::write(
            &first,
            r#"{
                "messages": {
                    "Save": {
                        "msgid": "Save",
                        "references": [{"filename": "b.js", "firstLine": 2}],
                        "extractedComments": ["Button label"]
                    }
                },
                "errors": {
                    "Oops": {"msgid": "Oops"}
                }
            }"#,
        )?;
        let second = tmpdir.path().join("second.pot");
        fs::write(
            &second,
            "msgid \"\"\n\
             msgstr \"\"\n\
             \"Content-Type: text/plain; charset=UTF-8\\n\"\n\
             \n\
             #. Button label\n\
             #: a.js:7\n\
             msgid \"Save\"\n\
             msgstr \"\"\n",
        )?;

        let catalog = build_catalog(&inputs(vec![first, second]))?;
        let save = catalog.get("messages", "Save").unwrap();
        assert_eq!(save.extracted_comments, vec!["Button label"]);
        assert_eq!(
            save.references
                .iter()
                .filter_map(|reference| reference.to_po_string())
                .collect::<Vec<_>>(),
            vec!["a.js:7", "b.js:2"]
        );
        assert_eq!(listing(&catalog), vec!["errors\tOops", "messages\tSave"]);

        let output = tmpdir.path().join("po");
        let paths = merge(&catalog, &output)?;
        assert_eq!(
            paths,
            vec![output.join("errors.pot"), output.join("messages.pot")]
        );
        Ok(())
    }

    #[test]
    fn test_unreadable_po_file() {
        let path = PathBuf::from("does-not-exist.po");
        let err = build_catalog(&inputs(vec![path.clone()])).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Could not read {}", path.display())
        );
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_plural_conflict() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let first = tmpdir.path().join("first.json");
        let second = tmpdir.path().join("second.json");
        fs::write(
            &first,
            r#"{"messages": {"file": {"msgid": "file", "msgid_plural": "files"}}}"#,
        )?;
        fs::write(
            &second,
            r#"{"messages": {"file": {"msgid": "file", "msgid_plural": "many files"}}}"#,
        )?;

        let err = build_catalog(&inputs(vec![first, second.clone()])).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Could not merge {}", second.display())
        );
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::PluralMismatch { msgid }) if msgid == "file"
        ));
        Ok(())
    }

    #[test]
    fn test_identifiers_without_msgid() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let identifiers = tmpdir.path().join("identifiers.json");
        fs::write(&identifiers, r#"{"t": ["msgctxt"]}"#)?;

        let mut inputs = inputs(vec![tmpdir.path().join("unused.json")]);
        inputs.identifiers = Some(identifiers);
        let err = build_catalog(&inputs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::MissingMsgid { identifier }) if identifier == "t"
        ));
        Ok(())
    }
}
