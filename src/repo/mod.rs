//! Repositories browsed by the panes
//!
//! A repository abstracts one backend, allowing panes to work with:
//! - the local filesystem
//! - a remote appliance configuration store
//! - any other backend that can list, read and write named entries
//!
//! The core only ever talks to a backend through [`Repository`].

mod local;
#[cfg(test)]
pub mod memory;

pub use local::LocalRepo;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
    #[error("{0}")]
    Other(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of a browsable item
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ItemType {
    File,
    #[default]
    Directory,
    ApplianceConfiguration,
    Domain,
    Filestore,
    None,
}

impl ItemType {
    /// Single character used in the rendered display line
    pub fn type_char(self) -> char {
        match self {
            ItemType::File => 'f',
            ItemType::Directory => 'd',
            ItemType::ApplianceConfiguration => 'A',
            ItemType::Domain => 'D',
            ItemType::Filestore => 'F',
            ItemType::None => '-',
        }
    }

    /// Whether items of this type can be entered like a directory
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ItemType::Directory
                | ItemType::ApplianceConfiguration
                | ItemType::Domain
                | ItemType::Filestore
        )
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::File => "file",
            ItemType::Directory => "directory",
            ItemType::ApplianceConfiguration => "appliance configuration",
            ItemType::Domain => "domain",
            ItemType::Filestore => "filestore",
            ItemType::None => "none",
        };
        f.write_str(name)
    }
}

/// What a destination already holds under a given name
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryType {
    None,
    File,
    Directory,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryType::None => "nothing",
            EntryType::File => "file",
            EntryType::Directory => "directory",
        };
        f.write_str(name)
    }
}

/// A browsable position inside a repository.
///
/// `parent` is an immutable snapshot of the enclosing location, kept only so
/// the ".." entry knows where to go. It never participates in equality.
#[derive(Clone, Debug, Default)]
pub struct ItemConfig {
    pub item_type: ItemType,
    /// Backend path (filesystem path for local, store path for remote)
    pub path: String,
    /// Appliance name (remote only)
    pub appliance: Option<String>,
    /// Domain name (remote only)
    pub domain: Option<String>,
    /// Filestore name (remote only)
    pub filestore: Option<String>,
    pub parent: Option<Arc<ItemConfig>>,
}

impl PartialEq for ItemConfig {
    fn eq(&self, other: &Self) -> bool {
        self.item_type == other.item_type
            && self.path == other.path
            && self.appliance == other.appliance
            && self.domain == other.domain
            && self.filestore == other.filestore
    }
}

impl Eq for ItemConfig {}

impl ItemConfig {
    pub fn new(item_type: ItemType, path: impl Into<String>) -> Self {
        Self {
            item_type,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Location of a named entry inside this one. Qualifiers are inherited
    /// and the parent link points back at a snapshot of `self`.
    pub fn child(&self, name: &str, item_type: ItemType) -> Self {
        Self {
            item_type,
            path: join_path(&self.path, name),
            appliance: self.appliance.clone(),
            domain: self.domain.clone(),
            filestore: self.filestore.clone(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    pub fn parent(&self) -> Option<&ItemConfig> {
        self.parent.as_deref()
    }
}

/// Join a backend path and an entry name with a single separator
pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else if base.ends_with('/') || base.ends_with('\\') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// One row of a pane listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// Backend formatted size (empty for containers)
    pub size: String,
    /// Backend formatted modification time
    pub modified: String,
    pub selected: bool,
    pub config: ItemConfig,
}

impl Item {
    pub fn new(name: impl Into<String>, config: ItemConfig) -> Self {
        Self {
            name: name.into(),
            size: String::new(),
            modified: String::new(),
            selected: false,
            config,
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = modified.into();
        self
    }

    /// The synthetic entry leading to the enclosing location
    pub fn is_parent_link(&self) -> bool {
        self.name == ".."
    }

    pub fn item_type(&self) -> ItemType {
        self.config.item_type
    }

    /// Line as shown in the pane; filtering and searching match against it
    pub fn display_line(&self) -> String {
        format!(
            "{} {:>10} {:>19} {}",
            self.config.item_type.type_char(),
            self.size,
            self.modified,
            self.name
        )
    }
}

/// Operations the browser needs from a backend.
///
/// `location` arguments are container locations; `name` is an entry inside
/// them. Listings are expected directories first, sorted by case-insensitive
/// name, with ".." first when a parent exists.
pub trait Repository: Send {
    /// Short backend name for logs ("local", "appliance", ...)
    fn name(&self) -> &str;

    /// Location shown when a pane is first opened
    fn initial_location(&mut self) -> RepoResult<ItemConfig>;

    /// List a container location
    fn list(&mut self, location: &ItemConfig) -> RepoResult<Vec<Item>>;

    /// Read a file
    fn get_file(&mut self, location: &ItemConfig, name: &str) -> RepoResult<Vec<u8>>;

    /// Create or replace a file
    fn update_file(&mut self, location: &ItemConfig, name: &str, data: &[u8]) -> RepoResult<()>;

    /// Create a directory, failing if the name is taken
    fn create_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()>;

    /// Delete a file or a whole directory tree
    fn delete(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()>;

    /// What currently exists under `name`
    fn entry_type(&mut self, location: &ItemConfig, name: &str) -> RepoResult<EntryType>;

    /// Whether the directory `name` has no entries
    fn is_empty_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<bool>;

    /// Title for the pane border
    fn display_title(&self, location: &ItemConfig) -> String;
}
