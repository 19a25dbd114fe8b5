//! Song libraries.
//!
//! The dict folder holds one directory per library. A directory is a
//! library when it contains a `dict.toml` manifest:
//!
//! ```toml
//! name = "maimai DX"
//! version = "PRiSM PLUS"
//! dicts = ["songs.txt"]
//! ```
//!
//! Each file listed in `dicts` lives in the library's `dict/` directory and
//! holds one title per line.

use crate::engine::CorpusVersion;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Errors from discovering and loading libraries.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Cannot read dict folder {path}: {source}")]
    DictFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No library selected, please enter indices separated by commas")]
    EmptySelection,
}

/// Manifest file name inside each library directory.
pub const MANIFEST_FILE: &str = "dict.toml";

/// Directory inside each library holding the title lists.
pub const DICT_DIR: &str = "dict";

#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    version: String,
    #[serde(default)]
    dicts: Vec<String>,
}

/// A discovered song library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    /// Library directory.
    pub path: PathBuf,
    /// Display name of the game.
    pub name: String,
    /// Game version the lists were taken from.
    pub version: String,
    /// Title list files under `dict/`.
    pub dicts: Vec<String>,
}

impl Library {
    pub fn corpus_version(&self) -> CorpusVersion {
        CorpusVersion::new(&self.name, &self.version)
    }

    /// Read every title of this library. Missing lists are skipped with a warning.
    pub async fn load_titles(&self) -> Vec<String> {
        let mut titles = Vec::new();
        for dict in &self.dicts {
            let file = self.path.join(DICT_DIR).join(dict);
            match fs::read_to_string(&file).await {
                Ok(content) => titles.extend(parse_titles(&content)),
                Err(e) => log::warn!("Skipping title list {}: {e}", file.display()),
            }
        }
        titles
    }
}

/// One title per line; blank lines are ignored and `\r` is stripped.
pub fn parse_titles(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
}

/// List the libraries under `dict_folder`, sorted by directory name.
pub async fn discover(dict_folder: impl AsRef<Path>) -> Result<Vec<Library>, LibraryError> {
    let dict_folder = dict_folder.as_ref();
    let folder_error = |source| LibraryError::DictFolder {
        path: dict_folder.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dict_folder).await.map_err(folder_error)?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(folder_error)? {
        let path = entry.path();
        if fs::try_exists(path.join(MANIFEST_FILE)).await.unwrap_or(false) {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut libraries = Vec::with_capacity(dirs.len());
    for path in dirs {
        match read_manifest(&path).await {
            Ok(manifest) => libraries.push(Library {
                path,
                name: manifest.name,
                version: manifest.version,
                dicts: manifest.dicts,
            }),
            Err(reason) => log::warn!("Skipping library {}: {reason}", path.display()),
        }
    }

    log::info!(
        "Found {} libraries in {}",
        libraries.len(),
        dict_folder.display()
    );
    Ok(libraries)
}

async fn read_manifest(dir: &Path) -> Result<Manifest, String> {
    let text = fs::read_to_string(dir.join(MANIFEST_FILE))
        .await
        .map_err(|e| e.to_string())?;
    toml::from_str(&text).map_err(|e| e.to_string())
}

/// Parsed library selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Valid 1-based indices, in the order given.
    pub indices: Vec<usize>,
    /// Indices that matched no library.
    pub ignored: Vec<usize>,
}

/// Parse a comma-separated list of 1-based library indices.
///
/// Each entry is trimmed and must start with a digit; entries that don't
/// are skipped. Fails only when no entry yields a number at all.
pub fn parse_selection(input: &str, library_count: usize) -> Result<Selection, LibraryError> {
    let mut selection = Selection::default();
    let mut any = false;

    for entry in input.split(',') {
        let digits: String = entry
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let Ok(index) = digits.parse::<usize>() else {
            continue;
        };
        any = true;

        if (1..=library_count).contains(&index) {
            if !selection.indices.contains(&index) {
                selection.indices.push(index);
            }
        } else {
            selection.ignored.push(index);
        }
    }

    if !any {
        return Err(LibraryError::EmptySelection);
    }
    Ok(selection)
}

/// Merge the titles of `libraries` into one deduplicated corpus.
pub async fn load_corpus<'a, I>(libraries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Library>,
{
    let mut corpus = BTreeSet::new();
    for library in libraries {
        let titles = library.load_titles().await;
        log::info!("Loaded {} titles from {}", titles.len(), library.name);
        corpus.extend(titles);
    }
    corpus
}
