//! Deleting the selection of one pane

use super::copy::{ConfirmAnswer, ConfirmPrompt};
use crate::errors::AppResult;
use crate::repo::{Item, ItemConfig, Repository};
use crate::state::{Model, Side};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Delete the selection (or current item) of `side` after one batch
/// confirmation. Non-empty directories are confirmed again with the
/// four-way answer. The pane is reloaded afterwards.
pub fn delete_selection(
    repo: &mut dyn Repository,
    model: &mut Model,
    side: Side,
    prompt: &mut dyn ConfirmPrompt,
) -> AppResult<DeleteSummary> {
    let mut summary = DeleteSummary::default();
    let Some(location) = model.pane(side).location.clone() else {
        model.status.push("Nothing to delete here");
        return Ok(summary);
    };
    let operands = model.selected_or_current(side);
    let question = match operands.as_slice() {
        [] => {
            model.status.push("Nothing to delete");
            return Ok(summary);
        }
        [single] => format!("Delete '{}'? [y/n]", single.name),
        many => format!("Delete {} items? [y/n]", many.len()),
    };
    if !prompt.ask(model, &question)?.is_some_and(ConfirmAnswer::is_yes) {
        model.status.push("Delete canceled");
        return Ok(summary);
    }

    let mut non_empty_all: Option<bool> = None;
    for item in &operands {
        match delete_one(repo, model, prompt, &location, item, &mut non_empty_all) {
            Ok(true) => {
                summary.deleted += 1;
                model.status.push(format!("Deleted '{}'", item.config.path));
            }
            Ok(false) => {
                summary.skipped += 1;
                model.status.push(format!("Skipped '{}'", item.config.path));
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(name = %item.name, error = %e, "delete failed");
                model.status.push(format!("Failed to delete '{}': {}", item.config.path, e));
            }
        }
    }

    match repo.list(&location) {
        Ok(items) => model.set_items(side, items),
        Err(e) => model.status.push(format!("Refresh failed: {}", e)),
    }
    Ok(summary)
}

/// Returns whether the item was deleted
fn delete_one(
    repo: &mut dyn Repository,
    model: &Model,
    prompt: &mut dyn ConfirmPrompt,
    location: &ItemConfig,
    item: &Item,
    non_empty_all: &mut Option<bool>,
) -> AppResult<bool> {
    if item.item_type().is_container() && !repo.is_empty_directory(location, &item.name)? {
        let confirmed = match *non_empty_all {
            Some(all) => all,
            None => {
                let question = format!("'{}' is not empty, delete it? [y/ya/n/na]", item.name);
                match prompt.ask(model, &question)? {
                    Some(answer) => {
                        if answer.is_all() {
                            *non_empty_all = Some(answer.is_yes());
                        }
                        answer.is_yes()
                    }
                    None => false,
                }
            }
        };
        if !confirmed {
            return Ok(false);
        }
    }
    repo.delete(location, &item.name)?;
    Ok(true)
}
