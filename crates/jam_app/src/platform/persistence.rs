use std::fs;
use std::io::{self, Write};
use std::path::Path;

use jam_core::ViewLocation;
use jam_logging::{jam_error, jam_info, jam_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    location: Option<String>,
}

/// Location saved by the previous run, or the default one.
pub(crate) fn load_location(path: &Path) -> ViewLocation {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return ViewLocation::default();
        }
        Err(err) => {
            jam_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return ViewLocation::default();
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            jam_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            return ViewLocation::default();
        }
    };

    match state.location.as_deref().map(ViewLocation::parse) {
        Some(Ok(location)) => {
            jam_info!("Restored location {} from {:?}", location, path);
            location
        }
        Some(Err(err)) => {
            jam_warn!("Ignoring persisted location in {:?}: {}", path, err);
            ViewLocation::default()
        }
        None => ViewLocation::default(),
    }
}

pub(crate) fn save_location(path: &Path, location: &str) {
    let state = PersistedState {
        location: Some(location.to_string()),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            jam_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(path, &content) {
        jam_error!("Failed to write persisted state to {:?}: {}", path, err);
    }
}

fn write_atomically(path: &Path, content: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
