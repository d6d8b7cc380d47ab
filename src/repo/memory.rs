//! In-memory repository used by tests
//!
//! Keeps a flat map of paths to nodes and records every call so tests can
//! assert on ordering. Single operations can be made to fail.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{join_path, EntryType, Item, ItemConfig, ItemType, RepoError, RepoResult, Repository};

#[derive(Clone, Debug)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// Call log shared between repositories, entries prefixed with the repo label
pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Debug, Default)]
pub struct MemoryRepo {
    /// Unique per instance: two memory repositories are never the same backend
    name: String,
    label: String,
    nodes: BTreeMap<String, Node>,
    /// Calls in order, formatted as `op(path)`
    pub calls: Vec<String>,
    failures: HashSet<String>,
    journal: Option<Journal>,
}

impl MemoryRepo {
    /// Repository with an empty root directory "/"
    pub fn new() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let mut repo = Self {
            name: format!("memory#{}", NEXT.fetch_add(1, Ordering::Relaxed)),
            ..Self::default()
        };
        repo.nodes.insert("/".to_string(), Node::Dir);
        repo
    }

    /// Label used in the shared journal
    pub fn named(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Some(Arc::clone(journal));
        self
    }

    pub fn root(&self) -> ItemConfig {
        ItemConfig::new(ItemType::Directory, "/")
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.nodes.insert(path.to_string(), Node::Dir);
        self
    }

    pub fn with_file(mut self, path: &str, data: &[u8]) -> Self {
        self.nodes.insert(path.to_string(), Node::File(data.to_vec()));
        self
    }

    /// Make the call rendered as `op(path)` fail
    pub fn fail_on(mut self, call: &str) -> Self {
        self.failures.insert(call.to_string());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        match self.nodes.get(path) {
            Some(Node::File(data)) => Some(data),
            _ => None,
        }
    }

    pub fn is_dir(&self, path: &str) -> bool {
        matches!(self.nodes.get(path), Some(Node::Dir))
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, op: &str, path: &str) -> RepoResult<()> {
        let call = format!("{}({})", op, path);
        let fail = self.failures.contains(&call);
        if let Some(journal) = &self.journal {
            if let Ok(mut entries) = journal.lock() {
                entries.push(format!("{}:{}", self.label, call));
            }
        }
        self.calls.push(call.clone());
        if fail {
            return Err(RepoError::Other(format!("injected failure: {}", call)));
        }
        Ok(())
    }

    fn children(&self, dir: &str) -> Vec<(String, Node)> {
        let prefix = if dir.ends_with('/') {
            dir.to_string()
        } else {
            format!("{}/", dir)
        };
        self.nodes
            .iter()
            .filter_map(|(path, node)| {
                let rest = path.strip_prefix(&prefix)?;
                (!rest.is_empty() && !rest.contains('/')).then(|| (rest.to_string(), node.clone()))
            })
            .collect()
    }
}

impl Repository for MemoryRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn initial_location(&mut self) -> RepoResult<ItemConfig> {
        Ok(self.root())
    }

    fn list(&mut self, location: &ItemConfig) -> RepoResult<Vec<Item>> {
        self.record("list", &location.path)?;
        if !self.is_dir(&location.path) {
            return Err(RepoError::NotFound(location.path.clone()));
        }
        let mut items = Vec::new();
        if let Some(parent) = location.parent() {
            items.push(Item::new("..", parent.clone()));
        }
        let mut children = self.children(&location.path);
        children.sort_by_key(|(name, node)| (!matches!(node, Node::Dir), name.to_lowercase()));
        for (name, node) in children {
            let item = match node {
                Node::Dir => Item::new(name.clone(), location.child(&name, ItemType::Directory)),
                Node::File(data) => Item::new(name.clone(), location.child(&name, ItemType::File))
                    .with_size(data.len().to_string()),
            };
            items.push(item);
        }
        Ok(items)
    }

    fn get_file(&mut self, location: &ItemConfig, name: &str) -> RepoResult<Vec<u8>> {
        let path = join_path(&location.path, name);
        self.record("get_file", &path)?;
        self.file(&path)
            .map(|d| d.to_vec())
            .ok_or(RepoError::NotFound(path))
    }

    fn update_file(&mut self, location: &ItemConfig, name: &str, data: &[u8]) -> RepoResult<()> {
        let path = join_path(&location.path, name);
        self.record("update_file", &path)?;
        self.nodes.insert(path, Node::File(data.to_vec()));
        Ok(())
    }

    fn create_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()> {
        let path = join_path(&location.path, name);
        self.record("create_directory", &path)?;
        if self.nodes.contains_key(&path) {
            return Err(RepoError::Other(format!("{} exists", path)));
        }
        self.nodes.insert(path, Node::Dir);
        Ok(())
    }

    fn delete(&mut self, location: &ItemConfig, name: &str) -> RepoResult<()> {
        let path = join_path(&location.path, name);
        self.record("delete", &path)?;
        if self.nodes.remove(&path).is_none() {
            return Err(RepoError::NotFound(path));
        }
        let prefix = format!("{}/", path);
        self.nodes.retain(|p, _| !p.starts_with(&prefix));
        Ok(())
    }

    fn entry_type(&mut self, location: &ItemConfig, name: &str) -> RepoResult<EntryType> {
        let path = join_path(&location.path, name);
        self.record("entry_type", &path)?;
        Ok(match self.nodes.get(&path) {
            Some(Node::Dir) => EntryType::Directory,
            Some(Node::File(_)) => EntryType::File,
            None => EntryType::None,
        })
    }

    fn is_empty_directory(&mut self, location: &ItemConfig, name: &str) -> RepoResult<bool> {
        let path = join_path(&location.path, name);
        self.record("is_empty_directory", &path)?;
        Ok(self.children(&path).is_empty())
    }

    fn display_title(&self, location: &ItemConfig) -> String {
        format!("memory: {}", location.path)
    }
}
