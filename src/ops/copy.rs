//! Recursive copy between two repositories

use crate::errors::{AppError, AppResult};
use crate::repo::{EntryType, Item, ItemConfig, ItemType, Repository};
use crate::state::{Model, Side};

/// Answer to an overwrite (or delete) confirmation
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfirmAnswer {
    YesOnce,
    YesAll,
    NoOnce,
    NoAll,
}

impl ConfirmAnswer {
    /// Parse the short forms typed into the prompt: y, ya, n, na
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(ConfirmAnswer::YesOnce),
            "ya" | "a" | "all" => Some(ConfirmAnswer::YesAll),
            "n" | "no" => Some(ConfirmAnswer::NoOnce),
            "na" | "none" => Some(ConfirmAnswer::NoAll),
            _ => None,
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, ConfirmAnswer::YesOnce | ConfirmAnswer::YesAll)
    }

    /// Whether the answer applies to the rest of the batch
    pub fn is_all(self) -> bool {
        matches!(self, ConfirmAnswer::YesAll | ConfirmAnswer::NoAll)
    }
}

/// Source of interactive decisions during a batch.
///
/// `Ok(None)` means the prompt was canceled. Errors are only expected when
/// the input source itself fails.
pub trait ConfirmPrompt {
    fn ask(&mut self, model: &Model, question: &str) -> AppResult<Option<ConfirmAnswer>>;
}

/// Counters for one copy run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub files: usize,
    pub directories: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// One copy batch from one repository to another.
///
/// Operands are taken from the source pane's selection (or current item).
/// Backend calls are strictly sequential; directories are created before
/// their children are visited. Each operand and each child fails on its
/// own: the error becomes a status line and the batch goes on.
pub struct CopyOrchestrator<'a> {
    source: &'a mut dyn Repository,
    target: &'a mut dyn Repository,
    /// Remembered yes-all / no-all decision
    overwrite_all: Option<bool>,
    /// Source and target are the same backend, so locations of both sides
    /// can nest
    same_backend: bool,
    summary: CopySummary,
}

impl<'a> CopyOrchestrator<'a> {
    pub fn new(source: &'a mut dyn Repository, target: &'a mut dyn Repository) -> Self {
        let same_backend = source.name() == target.name();
        Self {
            source,
            target,
            overwrite_all: None,
            same_backend,
            summary: CopySummary::default(),
        }
    }

    /// Copy the selection of `from` into the location of the other pane,
    /// then refresh that pane. Only a failing prompt aborts the run.
    pub fn run(
        mut self,
        model: &mut Model,
        from: Side,
        prompt: &mut dyn ConfirmPrompt,
    ) -> AppResult<CopySummary> {
        let to = from.other();
        let (Some(src_dir), Some(dst_dir)) = (
            model.pane(from).location.clone(),
            model.pane(to).location.clone(),
        ) else {
            model.status.push("Copy needs a location on both sides");
            return Ok(self.summary);
        };

        if self.same_backend && src_dir == dst_dir {
            model.status.push("Source and destination are the same");
            return Ok(self.summary);
        }

        let operands = model.selected_or_current(from);
        if operands.is_empty() {
            model.status.push("Nothing to copy");
            return Ok(self.summary);
        }

        tracing::info!(
            count = operands.len(),
            from = %src_dir.path,
            to = %dst_dir.path,
            source = self.source.name(),
            target = self.target.name(),
            "copy started"
        );

        let current = model.pane(to).current().map(|item| item.config.clone());
        for item in &operands {
            self.copy_entry(model, prompt, item, &src_dir, &dst_dir)?;
        }

        match self.target.list(&dst_dir) {
            Ok(items) => {
                model.set_items(to, items);
                if let Some(current) = current {
                    model.position_on(to, &current);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh after copy failed");
                model.status.push(format!("Refresh failed: {}", e));
            }
        }

        let s = self.summary;
        model.status.push(format!(
            "Copy done: {} file(s), {} new dir(s), {} skipped, {} failed",
            s.files, s.directories, s.skipped, s.failed
        ));
        Ok(s)
    }

    /// Copy one item, turning non-fatal failures into status lines
    fn copy_entry(
        &mut self,
        model: &mut Model,
        prompt: &mut dyn ConfirmPrompt,
        item: &Item,
        src_dir: &ItemConfig,
        dst_dir: &ItemConfig,
    ) -> AppResult<()> {
        let result = match item.item_type() {
            ItemType::Directory => self.copy_directory(model, prompt, item, dst_dir),
            ItemType::File => self.copy_file(model, prompt, item, src_dir, dst_dir),
            other => Err(AppError::Validation(format!(
                "cannot copy {} '{}'",
                other, item.name
            ))),
        };
        match result {
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                self.summary.failed += 1;
                tracing::warn!(name = %item.name, error = %e, "copy failed");
                model.status.push(format!("Failed to copy '{}': {}", item.config.path, e));
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn copy_directory(
        &mut self,
        model: &mut Model,
        prompt: &mut dyn ConfirmPrompt,
        item: &Item,
        dst_dir: &ItemConfig,
    ) -> AppResult<()> {
        if self.same_backend && is_within(dst_dir, &item.config) {
            return Err(AppError::Validation(format!(
                "cannot copy '{}' into itself",
                item.name
            )));
        }
        match self.target.entry_type(dst_dir, &item.name)? {
            EntryType::None => {
                self.target.create_directory(dst_dir, &item.name)?;
                self.summary.directories += 1;
                tracing::debug!(name = %item.name, "created directory");
            }
            EntryType::Directory => {}
            existing @ EntryType::File => {
                return Err(AppError::TargetTypeConflict {
                    name: item.name.clone(),
                    item_type: ItemType::Directory,
                    existing,
                });
            }
        }

        let src_sub = &item.config;
        let dst_sub = dst_dir.child(&item.name, ItemType::Directory);
        let children = self.source.list(src_sub)?;
        for child in children.iter().filter(|c| !c.is_parent_link()) {
            self.copy_entry(model, prompt, child, src_sub, &dst_sub)?;
        }
        Ok(())
    }

    fn copy_file(
        &mut self,
        model: &mut Model,
        prompt: &mut dyn ConfirmPrompt,
        item: &Item,
        src_dir: &ItemConfig,
        dst_dir: &ItemConfig,
    ) -> AppResult<()> {
        match self.target.entry_type(dst_dir, &item.name)? {
            existing @ EntryType::Directory => {
                return Err(AppError::TargetTypeConflict {
                    name: item.name.clone(),
                    item_type: ItemType::File,
                    existing,
                });
            }
            existing => {
                if !self.confirm(model, prompt, item, existing)? {
                    self.summary.skipped += 1;
                    model.status.push(format!("Skipped '{}'", item.config.path));
                    return Ok(());
                }
            }
        }

        let data = self.source.get_file(src_dir, &item.name)?;
        self.target.update_file(dst_dir, &item.name, &data)?;
        self.summary.files += 1;
        model.status.push(format!(
            "Copied '{}' ({} bytes)",
            item.config.path,
            data.len()
        ));
        Ok(())
    }

    /// Ask whether to write `item`, unless a yes-all / no-all answer is
    /// already in force. A canceled prompt counts as no.
    fn confirm(
        &mut self,
        model: &Model,
        prompt: &mut dyn ConfirmPrompt,
        item: &Item,
        existing: EntryType,
    ) -> AppResult<bool> {
        if let Some(all) = self.overwrite_all {
            return Ok(all);
        }
        let question = match existing {
            EntryType::File => format!("Overwrite '{}'? [y/ya/n/na]", item.name),
            _ => format!("Copy '{}'? [y/ya/n/na]", item.name),
        };
        let Some(answer) = prompt.ask(model, &question)? else {
            return Ok(false);
        };
        if answer.is_all() {
            self.overwrite_all = Some(answer.is_yes());
        }
        Ok(answer.is_yes())
    }
}

/// Whether `inner` is `outer` or lies somewhere below it
fn is_within(inner: &ItemConfig, outer: &ItemConfig) -> bool {
    if inner.appliance != outer.appliance
        || inner.domain != outer.domain
        || inner.filestore != outer.filestore
    {
        return false;
    }
    let base = outer.path.trim_end_matches(['/', '\\']);
    match inner.path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '\\']),
        None => false,
    }
}
