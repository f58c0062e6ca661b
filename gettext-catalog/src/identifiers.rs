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

//! Gettext-style helper functions and the order of their parameters.
//!
//! Extraction drivers look up the name of a called helper (`gettext`,
//! `npgettext`, `_`, ...) and use its parameter list to tell which
//! argument is the msgid, the plural, the context or the domain.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::message::MessageEntry;
use crate::reference::Reference;

/// A positional parameter of a helper function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Domain,
    Msgid,
    MsgidPlural,
    Msgctxt,
    N,
    Category,
}

/// Map from helper function name to its parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifiers(BTreeMap<String, Vec<Param>>);

impl Identifiers {
    pub fn new(specs: BTreeMap<String, Vec<Param>>) -> Self {
        Self(specs)
    }

    /// Check that every helper has a msgid parameter.
    pub fn validate(&self) -> Result<()> {
        match self
            .0
            .iter()
            .find(|(_, params)| !params.contains(&Param::Msgid))
        {
            Some((name, _)) => Err(CatalogError::MissingMsgid {
                identifier: name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Param]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Turn the arguments of a call to `name` into a message.
    ///
    /// Returns the domain argument (if the helper has one) and the
    /// message. Returns `None` for unknown helpers and for calls
    /// with too few arguments to contain the msgid. Arguments which
    /// do not carry message text (`n`, `category`) are ignored.
    pub fn resolve(
        &self,
        name: &str,
        args: &[&str],
        reference: Reference,
    ) -> Option<(Option<String>, MessageEntry)> {
        let params = self.get(name)?;
        let mut domain = None;
        let mut message = MessageEntry::default();
        let mut has_msgid = false;
        for (param, arg) in std::iter::zip(params, args) {
            let arg = String::from(*arg);
            match param {
                Param::Domain => domain = Some(arg),
                Param::Msgid => {
                    message.id = arg;
                    has_msgid = true;
                }
                Param::MsgidPlural => message.plural_id = Some(arg),
                Param::Msgctxt => message.context = Some(arg),
                Param::N | Param::Category => {}
            }
        }
        if !has_msgid {
            return None;
        }
        message.add_reference(reference);
        Some((domain, message))
    }
}

/// The standard gettext helpers, plus a shorthand for each where
/// `gettext` is replaced by `_`: `_`, `d_`, `np_` and so on.
pub fn default_identifiers() -> &'static Identifiers {
    static DEFAULT_IDENTIFIERS: OnceLock<Identifiers> = OnceLock::new();
    DEFAULT_IDENTIFIERS.get_or_init(|| {
        use Param::*;
        let specs: [(&str, &[Param]); 11] = [
            ("gettext", &[Msgid]),
            ("dgettext", &[Domain, Msgid]),
            ("dcgettext", &[Domain, Msgid, Category]),
            ("ngettext", &[Msgid, MsgidPlural, N]),
            ("dngettext", &[Domain, Msgid, MsgidPlural, N]),
            ("dcngettext", &[Domain, Msgid, MsgidPlural, N, Category]),
            ("pgettext", &[Msgctxt, Msgid]),
            ("dpgettext", &[Domain, Msgctxt, Msgid]),
            ("npgettext", &[Msgctxt, Msgid, MsgidPlural, N]),
            ("dnpgettext", &[Domain, Msgctxt, Msgid, MsgidPlural, N]),
            (
                "dcnpgettext",
                &[Domain, Msgctxt, Msgid, MsgidPlural, N, Category],
            ),
        ];
        let mut map = BTreeMap::new();
        for (name, params) in specs {
            map.insert(name.replace("gettext", "_"), params.to_vec());
            map.insert(String::from(name), params.to_vec());
        }
        Identifiers(map)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_identifiers() {
        let identifiers = default_identifiers();
        assert_eq!(identifiers.names().count(), 22);
        assert_eq!(identifiers.get("_"), Some(&[Param::Msgid][..]));
        assert_eq!(
            identifiers.get("dnp_"),
            identifiers.get("dnpgettext"),
        );
        assert!(identifiers.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_msgid() {
        let identifiers = Identifiers::new(BTreeMap::from([
            (String::from("gettext"), vec![Param::Msgid]),
            (String::from("broken"), vec![Param::Domain, Param::N]),
        ]));
        let err = identifiers.validate().unwrap_err();
        assert!(matches!(err, CatalogError::MissingMsgid { identifier } if identifier == "broken"));
    }

    #[test]
    fn test_deserialize() {
        let identifiers: Identifiers =
            serde_json::from_str(r#"{"t": ["msgctxt", "msgid", "msgid_plural", "n"]}"#).unwrap();
        assert_eq!(
            identifiers.get("t"),
            Some(&[Param::Msgctxt, Param::Msgid, Param::MsgidPlural, Param::N][..])
        );
    }

    #[test]
    fn test_resolve() {
        let reference = Reference::new("app.js", 3);
        let (domain, message) = default_identifiers()
            .resolve("dnpgettext", &["errors", "menu", "file", "files", "n"], reference.clone())
            .unwrap();
        assert_eq!(domain.as_deref(), Some("errors"));
        assert_eq!(
            message,
            MessageEntry::new("file")
                .with_context("menu")
                .with_plural_id("files")
                .with_reference(reference)
        );
    }

    #[test]
    fn test_resolve_missing_msgid() {
        let identifiers = default_identifiers();
        assert_eq!(identifiers.resolve("pgettext", &["menu"], Reference::default()), None);
        assert_eq!(identifiers.resolve("unknown", &["foo"], Reference::default()), None);
    }
}
