//! Named presets persisted as one JSON file each.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::Preset;

const PRESET_EXTENSION: &str = "json";

/// Errors raised while loading, looking up or saving presets.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("couldn't find preset with the name: {0}")]
    NotFound(String),
    #[error("there are no presets loaded")]
    Empty,
    #[error("invalid preset name {0:?}: names must be non-empty and contain no path separators")]
    InvalidName(String),
    #[error("preset {name:?} is defined by more than one file")]
    Duplicate { name: String },
    #[error("preset {:?} in {}: cell ({}, {}) lies outside its {}x{} box", .name, .path.display(), .x, .y, .width, .height)]
    OutOfBox {
        path: PathBuf,
        name: String,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("can't access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed preset file {}: {}", .path.display(), .source)]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Ordered in-memory catalog of presets backed by a directory.
#[derive(Debug)]
pub struct PresetStore {
    dir: PathBuf,
    presets: Vec<Preset>,
    /// File backing each preset, same order as `presets`
    files: Vec<PathBuf>,
    /// Index of the preset last returned by lookup or cycling
    cursor: Option<usize>,
}

impl PresetStore {
    /// Create an empty store that saves into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            presets: Vec::new(),
            files: Vec::new(),
            cursor: None,
        }
    }

    /// Load every `*.json` preset in `dir`, in file name order.
    ///
    /// Any unreadable directory or file, malformed record, cell outside its
    /// box or duplicated name fails the whole load.
    pub fn fetch_presets(dir: impl Into<PathBuf>) -> Result<Self, PresetError> {
        let dir = dir.into();
        let io_error = |source| PresetError::Io { path: dir.clone(), source };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_preset = path.extension().is_some_and(|ext| ext == PRESET_EXTENSION);
            if is_preset && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let presets: Vec<Preset> = paths
            .par_iter()
            .map(|path| read_preset(path))
            .collect::<Result<_, _>>()?;

        let mut seen = HashSet::new();
        if let Some(preset) = presets.iter().find(|p| !seen.insert(p.name.as_str())) {
            return Err(PresetError::Duplicate { name: preset.name.clone() });
        }

        info!(count = presets.len(), dir = %dir.display(), "presets loaded");
        Ok(Self {
            dir,
            presets,
            files: paths,
            cursor: None,
        })
    }

    /// Write each preset that has no file yet into `dir`, creating it.
    /// Returns how many files were written.
    pub fn write_missing(dir: &Path, presets: &[Preset]) -> Result<usize, PresetError> {
        fs::create_dir_all(dir).map_err(|source| PresetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = 0;
        for preset in presets {
            validate_name(&preset.name)?;
            let path = preset_path(dir, &preset.name);
            if !path.exists() {
                write_preset(&path, preset)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Presets in catalog order
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Find a preset by name and move the cycling cursor onto it
    pub fn get_preset(&mut self, name: &str) -> Result<&Preset, PresetError> {
        let idx = self
            .presets
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        self.cursor = Some(idx);
        Ok(&self.presets[idx])
    }

    /// Advance to the next preset, wrapping from the last back to the first
    pub fn cycle_presets(&mut self) -> Result<&Preset, PresetError> {
        if self.presets.is_empty() {
            return Err(PresetError::Empty);
        }
        let idx = self.cursor.map_or(0, |i| (i + 1) % self.presets.len());
        self.cursor = Some(idx);
        Ok(&self.presets[idx])
    }

    /// Build a preset, persist it as `<name>.json` and add it to the catalog.
    ///
    /// An existing preset with the same name is replaced in place.
    pub fn create_preset(
        &mut self,
        name: &str,
        cells: Vec<(usize, usize)>,
        width: usize,
        height: usize,
    ) -> Result<&Preset, PresetError> {
        self.insert(Preset::from_parts(name, width, height, cells))
    }

    /// Persist `preset` and add it to the catalog.
    ///
    /// Replacing a loaded preset rewrites the file it was loaded from, even
    /// when that file is not named after the preset.
    pub fn insert(&mut self, preset: Preset) -> Result<&Preset, PresetError> {
        validate_name(&preset.name)?;
        let existing = self.presets.iter().position(|p| p.name == preset.name);
        let path = match existing {
            Some(idx) => self.files[idx].clone(),
            None => {
                fs::create_dir_all(&self.dir).map_err(|source| PresetError::Io {
                    path: self.dir.clone(),
                    source,
                })?;
                preset_path(&self.dir, &preset.name)
            }
        };
        write_preset(&path, &preset)?;
        info!(name = %preset.name, cells = preset.population(), path = %path.display(), "preset saved");

        let idx = match existing {
            Some(idx) => {
                debug!(name = %preset.name, "replacing existing preset");
                self.presets[idx] = preset;
                idx
            }
            None => {
                self.presets.push(preset);
                self.files.push(path);
                self.presets.len() - 1
            }
        };
        Ok(&self.presets[idx])
    }
}

fn validate_name(name: &str) -> Result<(), PresetError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        Err(PresetError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

fn preset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{PRESET_EXTENSION}"))
}

fn read_preset(path: &Path) -> Result<Preset, PresetError> {
    let content = fs::read(path).map_err(|source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let preset: Preset = serde_json::from_slice(&content).map_err(|source| PresetError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some((x, y)) = preset.first_outside_box() {
        return Err(PresetError::OutOfBox {
            path: path.to_path_buf(),
            name: preset.name,
            x,
            y,
            width: preset.width,
            height: preset.height,
        });
    }
    Ok(preset)
}

fn write_preset(path: &Path, preset: &Preset) -> Result<(), PresetError> {
    let encoded = serde_json::to_vec_pretty(preset).map_err(|source| PresetError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, encoded).map_err(|source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
