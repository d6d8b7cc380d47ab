//! Application state and key dispatch

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command as Process;

use crossterm::event::{KeyCode, KeyEvent};

use super::mode::{Mode, ViewerState};
use super::{Model, Side, Snapshot};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::input::{Command, InputDialogSession};
use crate::ops::{delete_selection, ConfirmAnswer, ConfirmPrompt, CopyOrchestrator};
use crate::repo::{Item, ItemConfig, ItemType, Repository};
use crate::ui::{Frontend, Viewport};

/// Run a modal input session against the frontend until it finishes.
///
/// Returns the submitted text, or None when canceled (an OS shutdown
/// signal cancels too).
pub fn run_dialog(
    model: &Model,
    frontend: &mut dyn Frontend,
    mut session: InputDialogSession,
) -> AppResult<Option<String>> {
    session.start();
    loop {
        if frontend.interrupted() {
            session.cancel();
            return Ok(None);
        }
        frontend.draw(&model.snapshot(Some(session.snapshot()), None))?;
        let Some(key) = frontend.next_key()? else {
            continue;
        };
        if session.handle_key(key).is_finished() {
            return Ok(session.into_result());
        }
    }
}

/// Confirmation prompts shown as input dialogs; unknown answers ask again
struct DialogPrompt<'a> {
    frontend: &'a mut dyn Frontend,
}

impl ConfirmPrompt for DialogPrompt<'_> {
    fn ask(&mut self, model: &Model, question: &str) -> AppResult<Option<ConfirmAnswer>> {
        let mut prompt = question.to_string();
        loop {
            let Some(text) = run_dialog(model, self.frontend, InputDialogSession::new(&prompt))?
            else {
                return Ok(None);
            };
            if let Some(answer) = ConfirmAnswer::parse(&text) {
                return Ok(Some(answer));
            }
            prompt = format!("{} (answer y, ya, n or na)", question);
        }
    }
}

/// Source and target repositories for a transfer starting at `from`
fn split_repos(
    repos: &mut [Box<dyn Repository>; 2],
    from: Side,
) -> (&mut dyn Repository, &mut dyn Repository) {
    let [left, right] = repos;
    match from {
        Side::Left => (left.as_mut(), right.as_mut()),
        Side::Right => (right.as_mut(), left.as_mut()),
    }
}

/// Main application state
pub struct App {
    pub model: Model,
    repos: [Box<dyn Repository>; 2],
    pub config: Config,
    pub mode: Mode,
    viewport: Option<Viewport>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, left: Box<dyn Repository>, right: Box<dyn Repository>) -> Self {
        Self {
            model: Model::new(config.general.status_history),
            repos: [left, right],
            config,
            mode: Mode::Normal,
            viewport: None,
            should_quit: false,
        }
    }

    fn viewer_rows(&self) -> usize {
        self.viewport.map(|v| v.viewer_rows).unwrap_or(1)
    }

    /// Frame for the current state
    pub fn snapshot(&self) -> Snapshot {
        let viewer = match &self.mode {
            Mode::Viewing(view) => Some(view.snapshot(self.viewer_rows())),
            Mode::Normal => None,
        };
        self.model.snapshot(None, viewer)
    }

    fn sync_viewport(&mut self, frontend: &dyn Frontend) -> AppResult<()> {
        let viewport = frontend.viewport()?;
        if self.viewport != Some(viewport) {
            self.model.set_viewport(viewport.pane_rows, viewport.pane_cols);
            self.viewport = Some(viewport);
        }
        Ok(())
    }

    /// Open each repository's initial location in panes showing nothing yet
    pub fn open_initial_locations(&mut self) {
        for side in [Side::Left, Side::Right] {
            if self.model.pane(side).location.is_some() {
                continue;
            }
            let result = self.repos[side.index()]
                .initial_location()
                .map_err(AppError::from)
                .and_then(|location| self.open_location(side, location));
            if let Err(e) = result {
                tracing::warn!(?side, error = %e, "could not open initial location");
                self.model.status.push(format!("Cannot open start location: {}", e));
            }
        }
    }

    /// Dispatch loop: draw, wait for a key, handle it. Ends on quit, on an
    /// OS shutdown signal, or when the frontend fails.
    pub fn run(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        self.sync_viewport(frontend)?;
        self.open_initial_locations();

        while !self.should_quit {
            if frontend.interrupted() {
                tracing::info!("shutdown signal received");
                break;
            }
            self.sync_viewport(frontend)?;
            frontend.draw(&self.snapshot())?;

            let Some(key) = frontend.next_key()? else {
                continue;
            };
            if let Err(e) = self.handle_key(frontend, key) {
                if e.is_fatal() {
                    tracing::error!(error = %e, "input source failed");
                    return Err(e);
                }
                if !matches!(e, AppError::Canceled) {
                    self.model.status.push(e.to_string());
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, frontend: &mut dyn Frontend, key: KeyEvent) -> AppResult<()> {
        if let Mode::Viewing(view) = &mut self.mode {
            let rows = self.viewport.map(|v| v.viewer_rows).unwrap_or(1);
            let page = rows.saturating_sub(1).max(1) as isize;
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(3) => self.mode = Mode::Normal,
                KeyCode::Up => view.scroll_by(-1, rows),
                KeyCode::Down => view.scroll_by(1, rows),
                KeyCode::PageUp => view.scroll_by(-page, rows),
                KeyCode::PageDown | KeyCode::Char(' ') => view.scroll_by(page, rows),
                KeyCode::Home => view.scroll_by(isize::MIN, rows),
                KeyCode::End => view.scroll_by(isize::MAX, rows),
                _ => {}
            }
            return Ok(());
        }

        let Some(command) = Command::from_key(key) else {
            return Ok(());
        };
        tracing::trace!(?command, "command");
        match command {
            Command::Up => self.model.nav_up(),
            Command::Down => self.model.nav_down(),
            Command::PageUp => self.model.nav_pg_up(),
            Command::PageDown => self.model.nav_pg_down(),
            Command::Home => self.model.nav_top(),
            Command::End => self.model.nav_bottom(),
            Command::Left => self.model.scroll_left(),
            Command::Right => self.model.scroll_right(),
            Command::SelectUp => self.model.select_and_move_up(),
            Command::SelectDown => self.model.select_and_move_down(),
            Command::SelectPageUp => self.model.sel_pg_up(),
            Command::SelectPageDown => self.model.sel_pg_down(),
            Command::SelectToTop => self.model.sel_to_top(),
            Command::SelectToBottom => self.model.sel_to_bottom(),
            Command::ToggleSide => self.model.toggle_side(),
            Command::ToggleSelect => {
                self.model.toggle_current();
            }
            Command::Activate => self.activate()?,
            Command::Cancel => self.clear_filter(),
            Command::Refresh => {
                self.refresh(self.model.active())?;
                self.model.status.push("Refreshed");
            }
            Command::View => self.view()?,
            Command::Edit => self.edit(frontend)?,
            Command::Copy => self.copy(frontend)?,
            Command::MakeDirectory => self.make_directory(frontend)?,
            Command::Delete => self.delete(frontend)?,
            Command::Filter => self.filter(frontend)?,
            Command::SearchNext => self.search(frontend, true)?,
            Command::SearchPrev => self.search(frontend, false)?,
            Command::RepeatSearchNext => self.repeat_search(true),
            Command::RepeatSearchPrev => self.repeat_search(false),
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    /// List `location` and show it in `side`. On failure the pane is left
    /// untouched.
    fn open_location(&mut self, side: Side, location: ItemConfig) -> AppResult<()> {
        let repo = &mut self.repos[side.index()];
        let items = repo.list(&location)?;
        let title = repo.display_title(&location);
        tracing::debug!(?side, path = %location.path, count = items.len(), "opened location");

        let pane = self.model.pane_mut(side);
        pane.location = Some(location);
        pane.title = title;
        pane.reset_position();
        self.model.set_filter(side, "");
        self.model.set_items(side, items);
        Ok(())
    }

    /// Reload the listing of `side`, keeping the cursor on the same entry
    fn refresh(&mut self, side: Side) -> AppResult<()> {
        let Some(location) = self.model.pane(side).location.clone() else {
            return Ok(());
        };
        let current = self.model.pane(side).current().map(|item| item.config.clone());
        let items = self.repos[side.index()].list(&location)?;
        self.model.set_items(side, items);
        if let Some(current) = current {
            self.model.position_on(side, &current);
        }
        Ok(())
    }

    /// Refresh the pane opposite `side` if it shows the same location
    fn refresh_twin(&mut self, side: Side) -> AppResult<()> {
        let other = side.other();
        if self.model.pane(other).location.is_some()
            && self.model.pane(other).location == self.model.pane(side).location
        {
            self.refresh(other)?;
        }
        Ok(())
    }

    fn current_item(&self) -> Option<Item> {
        self.model.active_pane().current().cloned()
    }

    fn active_location(&self) -> AppResult<ItemConfig> {
        self.model
            .active_pane()
            .location
            .clone()
            .ok_or_else(|| AppError::Validation("pane has no location".to_string()))
    }

    /// Enter a container, or view a file
    fn activate(&mut self) -> AppResult<()> {
        let side = self.model.active();
        let Some(item) = self.current_item() else {
            return Ok(());
        };
        if item.item_type().is_container() {
            let previous = self.model.pane(side).location.clone();
            self.open_location(side, item.config.clone())?;
            if item.is_parent_link()
                && let Some(previous) = previous
            {
                self.model.position_on(side, &previous);
            }
            Ok(())
        } else if item.item_type() == ItemType::File {
            self.view()
        } else {
            Err(AppError::Validation(format!(
                "cannot open {} '{}'",
                item.item_type(),
                item.name
            )))
        }
    }

    fn clear_filter(&mut self) {
        let side = self.model.active();
        if !self.model.pane(side).filter().is_empty() {
            self.model.set_filter(side, "");
            self.model.status.push("Filter cleared");
        }
    }

    fn filter(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        let side = self.model.active();
        let session = InputDialogSession::new("Filter:").with_text(self.model.pane(side).filter());
        if let Some(text) = run_dialog(&self.model, frontend, session)? {
            self.model.set_filter(side, &text);
        }
        Ok(())
    }

    fn search(&mut self, frontend: &mut dyn Frontend, forward: bool) -> AppResult<()> {
        let prompt = if forward { "Search forward:" } else { "Search backward:" };
        let session = InputDialogSession::new(prompt).with_text(self.model.last_search.clone());
        if let Some(text) = run_dialog(&self.model, frontend, session)? {
            self.find(&text, forward);
        }
        Ok(())
    }

    fn repeat_search(&mut self, forward: bool) {
        if self.model.last_search.is_empty() {
            self.model.status.push("No previous search");
            return;
        }
        let text = self.model.last_search.clone();
        self.find(&text, forward);
    }

    fn find(&mut self, text: &str, forward: bool) {
        if text.is_empty() {
            return;
        }
        let found = if forward {
            self.model.search_next(text)
        } else {
            self.model.search_prev(text)
        };
        if !found {
            self.model.status.push(format!("'{}' not found", text));
        }
    }

    /// Current file with its container location
    fn current_file(&self) -> AppResult<(Item, ItemConfig)> {
        let item = self
            .current_item()
            .ok_or_else(|| AppError::Validation("no current item".to_string()))?;
        if item.item_type() != ItemType::File {
            return Err(AppError::Validation(format!("'{}' is not a file", item.name)));
        }
        Ok((item, self.active_location()?))
    }

    fn view(&mut self) -> AppResult<()> {
        let (item, location) = self.current_file()?;
        let side = self.model.active();
        let data = self.repos[side.index()].get_file(&location, &item.name)?;
        self.mode = Mode::Viewing(ViewerState::from_bytes(item.config.path.clone(), &data));
        Ok(())
    }

    /// Fetch the current file into a temporary file, run the editor on it
    /// and upload the result if it changed.
    fn edit(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        let (item, location) = self.current_file()?;
        let side = self.model.active();
        let original = self.repos[side.index()].get_file(&location, &item.name)?;

        let mut temp = tempfile::Builder::new()
            .prefix("apcmd-")
            .suffix(&format!("-{}", item.name))
            .tempfile()
            .map_err(|e| AppError::Edit(format!("cannot create temporary file: {}", e)))?;
        temp.write_all(&original)
            .and_then(|()| temp.flush())
            .map_err(|e| AppError::Edit(format!("cannot write {}: {}", temp.path().display(), e)))?;

        let editor = self.config.general.editor_command();
        tracing::info!(%editor, path = %item.config.path, "launching editor");
        frontend.suspend()?;
        let launched = launch_editor(&editor, temp.path());
        frontend.resume()?;
        launched?;

        // Editors may replace the file, so read it back by path
        let edited = fs::read(temp.path())
            .map_err(|e| AppError::Edit(format!("cannot read {}: {}", temp.path().display(), e)))?;

        if edited == original {
            self.model.status.push(format!("No changes to '{}'", item.config.path));
            return Ok(());
        }
        self.repos[side.index()].update_file(&location, &item.name, &edited)?;
        self.model.status.push(format!("Saved '{}' ({} bytes)", item.config.path, edited.len()));
        self.refresh(side)?;
        self.refresh_twin(side)
    }

    fn copy(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        let from = self.model.active();
        let (source, target) = split_repos(&mut self.repos, from);
        let mut prompt = DialogPrompt { frontend };
        let summary = CopyOrchestrator::new(source, target).run(&mut self.model, from, &mut prompt)?;
        tracing::info!(?summary, "copy finished");
        self.refresh_twin(from.other())
    }

    fn make_directory(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        let side = self.model.active();
        let location = self.active_location()?;
        let session = InputDialogSession::new("New directory name:");
        let Some(name) = run_dialog(&self.model, frontend, session)? else {
            return Ok(());
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        self.repos[side.index()].create_directory(&location, name)?;
        self.model.status.push(format!("Created directory '{}'", name));
        self.refresh(side)?;
        self.model.position_on(side, &location.child(name, ItemType::Directory));
        self.refresh_twin(side)
    }

    fn delete(&mut self, frontend: &mut dyn Frontend) -> AppResult<()> {
        let side = self.model.active();
        let mut prompt = DialogPrompt { frontend };
        let summary = delete_selection(
            self.repos[side.index()].as_mut(),
            &mut self.model,
            side,
            &mut prompt,
        )?;
        tracing::info!(?summary, "delete finished");
        self.refresh_twin(side)
    }
}

/// Run the editor command (program plus optional arguments) on `path`
fn launch_editor(editor: &str, path: &Path) -> AppResult<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| AppError::Edit("no editor configured".to_string()))?;
    let status = Process::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| AppError::Edit(format!("cannot run '{}': {}", program, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(AppError::Edit(format!("'{}' exited with {}", program, status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::memory::MemoryRepo;
    use crossterm::event::KeyModifiers;
    use std::collections::VecDeque;
    use std::io;

    /// Frontend replaying a fixed key script; it reports an interrupt once
    /// the script is used up so every loop terminates.
    struct ScriptedFrontend {
        keys: VecDeque<KeyEvent>,
        frames: Vec<Snapshot>,
        suspended: usize,
        fail_reads: bool,
    }

    impl ScriptedFrontend {
        fn new(keys: Vec<KeyEvent>) -> Self {
            Self {
                keys: keys.into(),
                frames: Vec::new(),
                suspended: 0,
                fail_reads: false,
            }
        }
    }

    impl Frontend for ScriptedFrontend {
        fn viewport(&self) -> io::Result<Viewport> {
            Ok(Viewport::from_size(100, 20))
        }

        fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
            self.frames.push(snapshot.clone());
            Ok(())
        }

        fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
            if self.fail_reads {
                return Err(io::Error::other("tty gone"));
            }
            Ok(self.keys.pop_front())
        }

        fn suspend(&mut self) -> io::Result<()> {
            self.suspended += 1;
            Ok(())
        }

        fn resume(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn interrupted(&self) -> bool {
            self.keys.is_empty() && !self.fail_reads
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn script(parts: &[Vec<KeyEvent>]) -> Vec<KeyEvent> {
        parts.concat()
    }

    fn app_with(left: MemoryRepo, right: MemoryRepo) -> App {
        App::new(Config::default(), Box::new(left), Box::new(right))
    }

    fn run(app: &mut App, keys: Vec<KeyEvent>) -> ScriptedFrontend {
        let mut frontend = ScriptedFrontend::new(keys);
        app.run(&mut frontend).unwrap();
        frontend
    }

    fn names(app: &App, side: Side) -> Vec<String> {
        app.model.pane(side).visible_items().map(|i| i.name.clone()).collect()
    }

    fn statuses(app: &App) -> Vec<String> {
        app.model.status.iter().map(String::from).collect()
    }

    #[test]
    fn test_initial_locations_are_listed() {
        let mut app = app_with(MemoryRepo::new().with_file("/a", b"1"), MemoryRepo::new());
        run(&mut app, Vec::new());
        assert_eq!(names(&app, Side::Left), vec!["a"]);
        assert_eq!(app.model.pane(Side::Left).title, "memory: /");
        assert!(app.model.pane(Side::Right).location.is_some());
    }

    #[test]
    fn test_enter_and_leave_directory() {
        let left = MemoryRepo::new()
            .with_dir("/alpha")
            .with_dir("/docs")
            .with_file("/docs/a", b"1");
        let mut app = app_with(left, MemoryRepo::new());
        run(&mut app, vec![key(KeyCode::Down), key(KeyCode::Enter)]);
        assert_eq!(app.model.pane(Side::Left).location.as_ref().unwrap().path, "/docs");
        assert_eq!(names(&app, Side::Left), vec!["..", "a"]);

        run(&mut app, vec![key(KeyCode::Enter)]);
        let pane = app.model.pane(Side::Left);
        assert_eq!(pane.location.as_ref().unwrap().path, "/");
        assert_eq!(pane.current().unwrap().name, "docs");
    }

    #[test]
    fn test_failed_listing_keeps_pane() {
        let left = MemoryRepo::new().with_dir("/docs").fail_on("list(/docs)");
        let mut app = app_with(left, MemoryRepo::new());
        run(&mut app, vec![key(KeyCode::Enter)]);
        assert_eq!(app.model.pane(Side::Left).location.as_ref().unwrap().path, "/");
        assert!(statuses(&app).last().unwrap().contains("injected failure"));
    }

    #[test]
    fn test_filter_submit_cancel_and_clear() {
        let left = MemoryRepo::new().with_file("/xylophone", b"").with_file("/zebra", b"");
        let mut app = app_with(left, MemoryRepo::new());
        let keys = script(&[
            vec![key(KeyCode::Char('f'))],
            typed("xy"),
            vec![key(KeyCode::Enter)],
        ]);
        let frontend = run(&mut app, keys);
        assert_eq!(app.model.pane(Side::Left).filter(), "xy");
        assert_eq!(names(&app, Side::Left), vec!["xylophone"]);
        assert!(frontend
            .frames
            .iter()
            .any(|f| f.dialog.as_ref().is_some_and(|d| d.prompt == "Filter:" && d.text == "xy")));

        run(&mut app, vec![key(KeyCode::Char('f')), key(KeyCode::Backspace), key(KeyCode::Esc)]);
        assert_eq!(app.model.pane(Side::Left).filter(), "xy");

        run(&mut app, vec![key(KeyCode::Esc)]);
        assert_eq!(app.model.pane(Side::Left).filter(), "");
        assert_eq!(names(&app, Side::Left).len(), 2);
    }

    #[test]
    fn test_search_and_repeat() {
        let left = MemoryRepo::new()
            .with_file("/b1", b"")
            .with_file("/c", b"")
            .with_file("/b2", b"");
        let mut app = app_with(left, MemoryRepo::new());
        let keys = script(&[
            vec![key(KeyCode::Char('/'))],
            typed("b"),
            vec![key(KeyCode::Enter), key(KeyCode::Char('n'))],
        ]);
        run(&mut app, keys);
        // Listing order: b1, b2, c
        assert_eq!(app.model.active_pane().current().unwrap().name, "b2");
        assert_eq!(statuses(&app).last().unwrap(), "'b' not found");

        run(&mut app, vec![key(KeyCode::Char('N'))]);
        assert_eq!(app.model.active_pane().current().unwrap().name, "b1");
    }

    #[test]
    fn test_copy_asks_before_overwrite() {
        let left = MemoryRepo::new().with_file("/a.txt", b"new!");
        let right = MemoryRepo::new().with_file("/a.txt", b"old");
        let mut app = app_with(left, right);
        let keys = script(&[vec![key(KeyCode::F(5))], typed("ya"), vec![key(KeyCode::Enter)]]);
        let frontend = run(&mut app, keys);

        assert!(frontend.frames.iter().any(|f| f
            .dialog
            .as_ref()
            .is_some_and(|d| d.prompt == "Overwrite 'a.txt'? [y/ya/n/na]")));
        let right_item = app.model.pane(Side::Right).current().unwrap().clone();
        assert_eq!(right_item.size, "4");
        assert!(statuses(&app).contains(&"Copied '/a.txt' (4 bytes)".to_string()));
    }

    #[test]
    fn test_copy_reasks_unknown_answer() {
        let left = MemoryRepo::new().with_file("/a.txt", b"new!");
        let right = MemoryRepo::new().with_file("/a.txt", b"old");
        let mut app = app_with(left, right);
        let keys = script(&[
            vec![key(KeyCode::F(5))],
            typed("maybe"),
            vec![key(KeyCode::Enter)],
            typed("n"),
            vec![key(KeyCode::Enter)],
        ]);
        let frontend = run(&mut app, keys);
        assert!(frontend.frames.iter().any(|f| f
            .dialog
            .as_ref()
            .is_some_and(|d| d.prompt.ends_with("(answer y, ya, n or na)"))));
        assert_eq!(app.model.pane(Side::Right).current().unwrap().size, "3");
        assert!(statuses(&app).contains(&"Skipped '/a.txt'".to_string()));
    }

    #[test]
    fn test_copy_from_right_pane() {
        let right = MemoryRepo::new().with_dir("/d").with_file("/d/f", b"xyz");
        let mut app = app_with(MemoryRepo::new(), right);
        let frontend = run(
            &mut app,
            script(&[vec![key(KeyCode::Tab), key(KeyCode::F(5))], typed("y"), vec![key(KeyCode::Enter)]]),
        );
        assert!(frontend
            .frames
            .iter()
            .any(|f| f.dialog.as_ref().is_some_and(|d| d.prompt == "Copy 'f'? [y/ya/n/na]")));
        assert_eq!(names(&app, Side::Left), vec!["d"]);
        assert!(statuses(&app).last().unwrap().starts_with("Copy done: 1 file(s), 1 new dir(s)"));
    }

    #[test]
    fn test_view_file() {
        let left = MemoryRepo::new().with_file("/notes", b"one\ntwo\n");
        let mut app = app_with(left, MemoryRepo::new());
        run(&mut app, vec![key(KeyCode::Enter)]);
        let viewer = app.snapshot().viewer.unwrap();
        assert_eq!(viewer.title, "/notes");
        assert_eq!(viewer.lines, vec!["one", "two"]);

        run(&mut app, vec![key(KeyCode::Char('q'))]);
        assert!(matches!(app.mode, Mode::Normal));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_make_directory() {
        let left = MemoryRepo::new().with_file("/a", b"");
        let mut app = app_with(left, MemoryRepo::new());
        let keys = script(&[vec![key(KeyCode::F(7))], typed("new"), vec![key(KeyCode::Enter)]]);
        run(&mut app, keys);
        assert_eq!(names(&app, Side::Left), vec!["new", "a"]);
        assert_eq!(app.model.active_pane().current().unwrap().name, "new");
    }

    #[test]
    fn test_delete_confirmed() {
        let left = MemoryRepo::new().with_file("/a", b"").with_file("/b", b"");
        let mut app = app_with(left, MemoryRepo::new());
        let keys = script(&[vec![key(KeyCode::F(8))], typed("y"), vec![key(KeyCode::Enter)]]);
        run(&mut app, keys);
        assert_eq!(names(&app, Side::Left), vec!["b"]);
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let left = MemoryRepo::new().with_file("/a", b"");
        let mut app = app_with(left, MemoryRepo::new());
        let mut frontend =
            ScriptedFrontend::new(vec![key(KeyCode::Char('q')), key(KeyCode::Down)]);
        app.run(&mut frontend).unwrap();
        assert!(app.should_quit);
        assert_eq!(frontend.keys.len(), 1);
    }

    #[test]
    fn test_input_failure_is_fatal() {
        let mut app = app_with(MemoryRepo::new(), MemoryRepo::new());
        let mut frontend = ScriptedFrontend::new(Vec::new());
        frontend.fail_reads = true;
        assert!(matches!(app.run(&mut frontend), Err(AppError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_uploads_changes() {
        let tmp = tempfile::tempdir().unwrap();
        let replacement = tmp.path().join("replacement");
        fs::write(&replacement, b"edited text").unwrap();

        let left = MemoryRepo::new().with_file("/note", b"draft");
        let mut config = Config::default();
        config.general.editor = format!("cp {}", replacement.display());
        let mut app = App::new(config, Box::new(left), Box::new(MemoryRepo::new()));

        let frontend = run(&mut app, vec![key(KeyCode::F(4))]);
        assert_eq!(frontend.suspended, 1);
        assert_eq!(app.model.active_pane().current().unwrap().size, "11");
        assert_eq!(statuses(&app).last().unwrap(), "Saved '/note' (11 bytes)");
        let leftovers = fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                name.starts_with("apcmd-") && name.ends_with("-note")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_without_changes() {
        let left = MemoryRepo::new().with_file("/memo", b"draft");
        let mut config = Config::default();
        config.general.editor = "true".to_string();
        let mut app = App::new(config, Box::new(left), Box::new(MemoryRepo::new()));
        run(&mut app, vec![key(KeyCode::F(4))]);
        assert_eq!(statuses(&app).last().unwrap(), "No changes to '/memo'");
    }
}
