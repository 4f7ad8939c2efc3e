//! YAML decoding of table of contents entries.
//!
//! Each entry is read into a key/value table first, then dispatched on which
//! keys are present. Nested structures other than `children` and
//! `detection_rules` are skipped without being materialized, and entries that
//! match no known key combination decode to nothing.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use url::Url;

use crate::item::{
    CrossLinkRef, FileKind, FileRef, FolderRef, RuleOverviewRef, TocItem, TocRef,
};

/// Visitor methods for scalar input that map every scalar to one value.
macro_rules! scalars_as {
    ($value:expr) => {
        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($value)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok($value)
        }
    };
}

/// Deserialize a `toc:` / `children:` sequence, dropping unrecognized entries.
///
/// Anything other than a sequence yields an empty list.
pub(crate) fn toc_items<'de, D>(deserializer: D) -> Result<Vec<TocItem>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TocItemsVisitor)
}

/// Decode one entry from a YAML mapping, if it matches a known shape.
///
/// # Errors
///
/// Returns an error when the YAML is malformed or a `crosslink` is not a URI.
pub fn decode_entry(yaml: &str) -> Result<Option<TocItem>, serde_yaml::Error> {
    serde_yaml::from_str::<Entry>(yaml).map(|entry| entry.0)
}

struct TocItemsVisitor;

impl<'de> Visitor<'de> for TocItemsVisitor {
    type Value = Vec<TocItem>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of table of contents entries")
    }

    scalars_as!(Vec::new());

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Entry(entry)) = seq.next_element::<Entry>()? {
            items.extend(entry);
        }
        Ok(items)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Vec::new())
    }
}

/// One sequence element; `None` when it isn't a recognized mapping.
struct Entry(Option<TocItem>);

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor).map(Entry)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Option<TocItem>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a table of contents entry")
    }

    scalars_as!(None);

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields = HashMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = match key.as_str() {
                "children" => Field::Children(map.next_value_seed(ChildrenSeed)?),
                "detection_rules" => map.next_value::<RuleFolders>()?.0,
                _ => map.next_value::<Field>()?,
            };
            fields.insert(key, value);
        }
        Fields(fields).into_item().map_err(de::Error::custom)
    }
}

/// Value of one key in an entry mapping.
#[derive(Debug)]
enum Field {
    /// Scalar rendered as text (`true`, `3`, `guides/index.md`).
    Scalar(String),
    /// Decoded `children:` list.
    Children(Vec<TocItem>),
    /// `detection_rules:` folder list.
    Strings(Vec<String>),
    /// Null, nested mapping or unsupported list.
    Skipped,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Field::Scalar(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Field::Skipped)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Field::Skipped)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Field::Skipped)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Field::Skipped)
    }
}

struct ChildrenSeed;

impl<'de> de::DeserializeSeed<'de> for ChildrenSeed {
    type Value = Vec<TocItem>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        toc_items(deserializer)
    }
}

/// `detection_rules:` value: a list of folder names, or a plain scalar.
struct RuleFolders(Field);

impl<'de> Deserialize<'de> for RuleFolders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RuleFoldersVisitor).map(RuleFolders)
    }
}

struct RuleFoldersVisitor;

impl<'de> Visitor<'de> for RuleFoldersVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a list of detection rule folders")
    }

    scalars_as!(Field::Skipped);

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut folders = Vec::new();
        while let Some(field) = seq.next_element::<Field>()? {
            if let Field::Scalar(folder) = field {
                folders.push(folder);
            }
        }
        Ok(Field::Strings(folders))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Field::Skipped)
    }
}

/// Key/value table of one entry. Later duplicate keys replace earlier ones.
struct Fields(HashMap<String, Field>);

impl Fields {
    fn scalar(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Field::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    fn into_item(mut self) -> Result<Option<TocItem>, String> {
        let children = match self.0.remove("children") {
            Some(Field::Children(children)) => children,
            _ => Vec::new(),
        };
        let rule_folders = match self.0.remove("detection_rules") {
            Some(Field::Strings(folders)) => Some(folders),
            _ => None,
        };

        let file = self.scalar("file");
        let folder = self.scalar("folder");
        let crosslink = self.scalar("crosslink");

        if let (Some(folder), Some(file)) = (folder, file) {
            let index = FileRef::declared(file, FileKind::FolderIndex, false, Vec::new());
            let mut folder_children = Vec::with_capacity(children.len() + 1);
            folder_children.push(TocItem::File(index));
            folder_children.extend(children);
            return Ok(Some(TocItem::Folder(FolderRef::declared(
                folder,
                folder_children,
            ))));
        }

        if let (Some(rule_folders), Some(file)) = (rule_folders, file) {
            return Ok(Some(TocItem::RuleOverview(RuleOverviewRef::declared(
                file,
                rule_folders,
                children,
            ))));
        }

        if let Some(file) = file {
            return Ok(Some(TocItem::File(FileRef::declared(
                file,
                FileRef::kind_for(file),
                false,
                children,
            ))));
        }

        // `hidden` names a file unless it is the flag of a cross-link.
        if crosslink.is_none()
            && let Some(hidden) = self.scalar("hidden")
        {
            return Ok(Some(TocItem::File(FileRef::declared(
                hidden,
                FileRef::kind_for(hidden),
                true,
                children,
            ))));
        }

        if let Some(crosslink) = crosslink {
            let uri = Url::parse(crosslink)
                .map_err(|e| format!("invalid crosslink '{crosslink}': {e}"))?;
            return Ok(Some(TocItem::CrossLink(CrossLinkRef {
                uri,
                title: self.scalar("title").map(ToOwned::to_owned),
                hidden: self
                    .scalar("hidden")
                    .is_some_and(|h| h.eq_ignore_ascii_case("true")),
                children,
                context: String::new(),
            })));
        }

        if let Some(folder) = folder {
            return Ok(Some(TocItem::Folder(FolderRef::declared(folder, children))));
        }

        if let Some(toc) = self.scalar("toc") {
            return Ok(Some(TocItem::IsolatedToc(TocRef::declared(toc, children))));
        }

        Ok(None)
    }
}
