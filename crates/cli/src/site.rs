//! Site bundle loading.
//!
//! A bundle is one YAML or JSON document holding the menu and the page
//! content. The format is picked from the file extension; anything that is not
//! `.json` is read as YAML.

use std::fs;
use std::path::{Path, PathBuf};

use folio_nav::{MenuTree, MenuTreeError};
use folio_types::SiteContent;
use folio_util::env_path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the bundle to load when `--site` is absent.
pub const SITE_PATH_ENV: &str = "FOLIO_SITE_PATH";

const EMBEDDED_SITE: &str = include_str!("../assets/site.yaml");

#[derive(Debug, Error)]
pub enum SiteLoadError {
    #[error("failed to read site bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse site bundle {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to parse site bundle {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid menu in {origin}: {source}")]
    Menu {
        origin: String,
        #[source]
        source: MenuTreeError,
    },
}

/// A parsed bundle together with its validated menu tree.
#[derive(Debug)]
pub struct LoadedSite {
    /// Path the bundle came from, or `embedded`.
    pub origin: String,
    pub content: SiteContent,
    pub tree: MenuTree,
}

/// Loads the bundle at `path`, else at `FOLIO_SITE_PATH`, else the sample
/// bundle compiled into the binary.
pub fn load(path: Option<&Path>) -> Result<LoadedSite, SiteLoadError> {
    let explicit = path.map(Path::to_path_buf).or_else(|| env_path(SITE_PATH_ENV));
    let Some(path) = explicit else {
        debug!("using embedded site bundle");
        return build("embedded".to_string(), parse_yaml("embedded", EMBEDDED_SITE)?);
    };

    let raw = fs::read_to_string(&path).map_err(|source| SiteLoadError::Io {
        path: path.clone(),
        source,
    })?;
    let origin = path.display().to_string();
    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let content = if is_json {
        serde_json::from_str(&raw).map_err(|source| SiteLoadError::Json {
            origin: origin.clone(),
            source,
        })?
    } else {
        parse_yaml(&origin, &raw)?
    };
    build(origin, content)
}

fn parse_yaml(origin: &str, raw: &str) -> Result<SiteContent, SiteLoadError> {
    serde_yaml::from_str(raw).map_err(|source| SiteLoadError::Yaml {
        origin: origin.to_string(),
        source,
    })
}

fn build(origin: String, content: SiteContent) -> Result<LoadedSite, SiteLoadError> {
    let tree = MenuTree::from_entries(content.menu.clone()).map_err(|source| SiteLoadError::Menu {
        origin: origin.clone(),
        source,
    })?;
    info!(%origin, entries = tree.len(), pages = content.pages.len(), "site bundle loaded");
    Ok(LoadedSite { origin, content, tree })
}
