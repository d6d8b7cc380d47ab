//! Local filesystem repository

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::{EntryType, Item, ItemConfig, ItemType, RepoError, RepoResult, Repository};

/// Repository over the local filesystem
#[derive(Debug, Default)]
pub struct LocalRepo {
    /// Start directory; the working directory when unset
    start: Option<PathBuf>,
}

impl LocalRepo {
    pub fn new(start: Option<PathBuf>) -> Self {
        Self { start }
    }

    /// Config for a local directory, with its ancestors derived from the path
    fn dir_config(path: &Path) -> ItemConfig {
        let mut config = ItemConfig::new(ItemType::Directory, path.to_string_lossy());
        config.parent = path.parent().map(|p| Arc::new(Self::dir_config(p)));
        config
    }

    fn check_location(location: &ItemConfig) -> RepoResult<&Path> {
        if location.item_type != ItemType::Directory || location.path.is_empty() {
            return Err(RepoError::InvalidLocation(format!(
                "{} '{}' is not a local directory",
                location.item_type, location.path
            )));
        }
        Ok(Path::new(&location.path))
    }

    fn entry_path(location: &ItemConfig, name: &str) -> RepoResult<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(RepoError::InvalidLocation(format!("bad entry name '{}'", name)));
        }
        Ok(Self::check_location(location)?.join(name))
    }

    fn map_io(err: io::Error, path: &Path) -> RepoError {
        if err.kind() == io::ErrorKind::NotFound {
            RepoError::NotFound(path.to_string_lossy().into_owned())
        } else {
            RepoError::Io(err)
        }
    }
}

impl Repository for LocalRepo {
    fn name(&self) -> &str {
        "local"
    }

    fn initial_location(&mut self) -> RepoResult<ItemConfig> {
        let start = match &self.start {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        let start = start.canonicalize().map_err(|e| Self::map_io(e, &start))?;
        if !start.is_dir() {
            return Err(RepoError::InvalidLocation(format!(
                "'{}' is not a directory",
                start.display()
            )));
        }
        Ok(Self::dir_config(&start))
    }

    fn list(&mut self, location: &ItemConfig) -> RepoResult<Vec<Item>> {
        let dir = Self::check_location(location)?;
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| Self::map_io(e, dir))? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks; skip entries whose target is gone
            let Ok(meta) = fs::metadata(entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "skipping unreadable entry");
                continue;
            };
            let modified = format_date(meta.modified().ok());
            if meta.is_dir() {
                let config = location.child(&name, ItemType::Directory);
                dirs.push(Item::new(name, config).with_modified(modified));
            } else {
                let config = location.child(&name, ItemType::File);
                files.push(
                    Item::new(name, config)
                        .with_size(meta.len().to_string())
                        .with_modified(modified),
                );
            }
        }

        dirs.sort_by(|a, b| name_cmp(&a.name, &b.name));
        files.sort_by(|a, b| name_cmp(&a.name, &b.name));

        let mut items = Vec::with_capacity(dirs.len() + files.len() + 1);
        if let Some(parent_path) = dir.parent() {
            let parent = location
                .parent()
                .cloned()
                .unwrap_or_else(|| Self::dir_config(parent_path));
            let modified = fs::metadata(parent_path)
                .ok()
                .and_then(|m| m.modified().ok());
            items.push(Item::new("..", parent).with_modified(format_date(modified)));
        }
        items.extend(dirs);
        items.extend(files);
        Ok(items)
    }

    fn get_file(&mut self, location: &ItemConfig, name: &str) -> RepoResult<Vec<u8>> {
        let path = Self::entry_path(location, name)?;
        fs::read(&path).map_err(|e| Self::map_io(e, &path))
    }

    fn update_file(&mut self, location: &ItemConfig, name: &str, data: &[u8]) -> RepoResult<()> {
        let path = Self::entry_path(location, name)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "writing file");
        fs::write(&path, data).map_err(|e| Self::map_io(e, &path))
    }

    fn create_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()> {
        let path = Self::entry_path(location, name)?;
        tracing::debug!(path = %path.display(), "creating directory");
        fs::create_dir(&path).map_err(|e| Self::map_io(e, &path))
    }

    fn delete(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()> {
        let path = Self::entry_path(location, name)?;
        let meta = fs::symlink_metadata(&path).map_err(|e| Self::map_io(e, &path))?;
        tracing::debug!(path = %path.display(), dir = meta.is_dir(), "deleting");
        let result = if meta.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|e| Self::map_io(e, &path))
    }

    fn entry_type(&mut self, location: &ItemConfig, name: &str) -> RepoResult<EntryType> {
        let path = Self::entry_path(location, name)?;
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => Ok(EntryType::Directory),
            Ok(_) => Ok(EntryType::File),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntryType::None),
            Err(e) => Err(RepoError::Io(e)),
        }
    }

    fn is_empty_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<bool> {
        let path = Self::entry_path(location, name)?;
        let mut entries = fs::read_dir(&path).map_err(|e| Self::map_io(e, &path))?;
        Ok(entries.next().is_none())
    }

    fn display_title(&self, location: &ItemConfig) -> String {
        format!("local: {}", location.path)
    }
}

/// Case-insensitive name order, ties broken by the raw name
fn name_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` (UTC)
fn format_date(time: Option<SystemTime>) -> String {
    let Some(secs) = time
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
    else {
        return String::new();
    };

    const SECS_PER_DAY: u64 = 86400;
    let days = (secs / SECS_PER_DAY) as i64;
    let time_of_day = secs % SECS_PER_DAY;
    let (year, month, day) = civil_from_days(days);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
