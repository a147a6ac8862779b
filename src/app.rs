use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;
use crate::input;
use crate::jar::KeyValueStore;
use crate::store::TaskStore;
use crate::theme::Theme;
use crate::view::TaskListView;

pub struct App<S: KeyValueStore> {
    pub store: TaskStore<S>,
    pub view: TaskListView,
    pub theme: Theme,
    /// Contents of the input line
    pub input: String,
    /// Last error, shown in the footer until the next key press
    pub status: Option<String>,
    pub should_quit: bool,
    today: fn() -> NaiveDate,
}

impl<S: KeyValueStore> App<S> {
    /// Loads tasks and theme from `jar`.
    pub fn new(jar: S) -> Result<Self> {
        let store = TaskStore::open(jar)?;
        let theme = Theme::load(store.jar())?;
        let mut view = TaskListView::new();
        view.render_all(&store)?;
        Ok(Self {
            store,
            view,
            theme,
            input: String::new(),
            status: None,
            should_quit: false,
            today: input::today,
        })
    }

    /// Replaces the clock used to date new tasks.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        self.status = None;
        if let Err(e) = self.dispatch(key) {
            tracing::error!("{e}");
            self.status = Some(e.to_string());
        }
    }

    fn dispatch(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => self.toggle_selected()?,
                KeyCode::Char('d') => self.delete_selected()?,
                KeyCode::Char('x') => self.view.on_clear_completed(&mut self.store)?,
                KeyCode::Char('l') => self.toggle_theme()?,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit()?,
            KeyCode::Tab | KeyCode::BackTab => {
                let other = self.view.visible().other();
                self.view.switch_partition_view(other);
            }
            KeyCode::Up => self.view.select_previous(),
            KeyCode::Down => self.view.select_next(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        let today = (self.today)();
        if self.view.on_submit(&mut self.store, &self.input, today)? {
            self.input.clear();
        }
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        if let Some(id) = self.view.selected().map(|t| t.id) {
            self.view.on_toggle_request(&mut self.store, id)?;
        }
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        if let Some(id) = self.view.selected().map(|t| t.id) {
            self.view.on_delete_request(&mut self.store, id)?;
        }
        Ok(())
    }

    fn toggle_theme(&mut self) -> Result<()> {
        let theme = self.theme.toggled();
        theme.save(self.store.jar_mut())?;
        self.theme = theme;
        Ok(())
    }
}
