//! Site-level `navigation.yml`.
//!
//! ```yaml
//! phantoms:
//!   - toc: elasticsearch://reference/internal
//! toc:
//!   - toc: get-started
//!   - toc: elasticsearch://reference
//!     path_prefix: reference/elasticsearch
//!     children:
//!       - toc: elasticsearch://reference/query-languages
//!         path_prefix: reference/query-languages
//! ```
//!
//! A `toc` value without `://` refers to the narrative repository and gets
//! its scheme prepended.

use std::collections::BTreeSet;
use std::path::Path;

use docset_storage::FileSystem;
use serde::Deserialize;
use url::Url;

use crate::error::NavigationError;

/// File name of the site navigation.
pub const NAVIGATION_FILE_NAME: &str = "navigation.yml";

/// A parsed `navigation.yml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteNavigationFile {
    /// Sources allowed to stay out of the declared tree.
    pub phantoms: Vec<Url>,
    /// Declared tree of TOC references.
    pub toc: Vec<SiteTocRef>,
}

/// One declared reference to a documentation set or nested TOC.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteTocRef {
    /// Identifier of the referenced navigation root.
    pub source: Url,
    /// URL segment for everything below this reference; may be empty.
    pub path_prefix: String,
    /// Nested references.
    pub children: Vec<SiteTocRef>,
}

#[derive(Deserialize)]
struct RawFile {
    #[serde(default)]
    phantoms: Vec<RawPhantom>,
    #[serde(default)]
    toc: Vec<RawRef>,
}

#[derive(Deserialize)]
struct RawPhantom {
    toc: String,
}

#[derive(Deserialize)]
struct RawRef {
    toc: Option<String>,
    #[serde(alias = "path_prefix")]
    path: Option<String>,
    #[serde(default)]
    children: Vec<RawRef>,
}

impl SiteNavigationFile {
    /// Parse a `navigation.yml` document.
    ///
    /// Entries without a `toc` key are skipped along with their children.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Parse`] for malformed YAML and
    /// [`NavigationError::InvalidSource`] for a `toc` value that is not a URI.
    pub fn from_yaml(yaml: &str, narrative_scheme: &str) -> Result<Self, NavigationError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawFile =
            serde_yaml::from_str(yaml).map_err(|source| NavigationError::Parse {
                path: NAVIGATION_FILE_NAME.into(),
                source,
            })?;

        let phantoms = raw
            .phantoms
            .iter()
            .map(|phantom| parse_source(&phantom.toc, narrative_scheme))
            .collect::<Result<_, _>>()?;
        let toc = convert_refs(raw.toc, narrative_scheme)?;
        Ok(Self { phantoms, toc })
    }

    /// Read and parse `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::Read`] if the file can't be read, otherwise
    /// the errors of [`from_yaml`](Self::from_yaml).
    pub fn load(
        fs: &dyn FileSystem,
        path: &Path,
        narrative_scheme: &str,
    ) -> Result<Self, NavigationError> {
        let yaml = fs.read_to_string(path).map_err(|source| NavigationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml, narrative_scheme).map_err(|e| match e {
            NavigationError::Parse { source, .. } => NavigationError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Every declared `toc` source at any depth.
    pub fn declared_sources(&self) -> BTreeSet<Url> {
        fn collect(refs: &[SiteTocRef], out: &mut BTreeSet<Url>) {
            for r in refs {
                out.insert(r.source.clone());
                collect(&r.children, out);
            }
        }

        let mut sources = BTreeSet::new();
        collect(&self.toc, &mut sources);
        sources
    }
}

fn convert_refs(
    raw: Vec<RawRef>,
    narrative_scheme: &str,
) -> Result<Vec<SiteTocRef>, NavigationError> {
    let mut refs = Vec::with_capacity(raw.len());
    for r in raw {
        let Some(toc) = r.toc else {
            tracing::debug!("Skipping navigation entry without 'toc'");
            continue;
        };
        refs.push(SiteTocRef {
            source: parse_source(&toc, narrative_scheme)?,
            path_prefix: r.path.unwrap_or_default(),
            children: convert_refs(r.children, narrative_scheme)?,
        });
    }
    Ok(refs)
}

fn parse_source(value: &str, narrative_scheme: &str) -> Result<Url, NavigationError> {
    let uri = if value.contains("://") {
        value.to_owned()
    } else {
        format!("{narrative_scheme}://{value}")
    };
    Url::parse(&uri).map_err(|source| NavigationError::InvalidSource {
        value: value.to_owned(),
        source,
    })
}
