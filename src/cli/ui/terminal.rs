//! Interactive [`PromptHost`] drawing prompts with crossterm.
//!
//! Keys: Enter accepts, Esc or Ctrl+C dismisses, Ctrl+B goes back and Tab
//! triggers the forward button. In pickers the arrows move the highlight,
//! typing filters the list and Space toggles an item in multi-select mode.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{apply_style, current_preferences, detail_text, MessageKind, OutputPreferences};
use crate::inquiry::prompts::{NavButton, PromptKind};
use crate::inquiry::session::{PromptEvent, PromptHost, PromptSurface, PromptView};

#[derive(Debug, Default)]
pub struct TerminalHost {
    prefs: OutputPreferences,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }
}

impl PromptHost for TerminalHost {
    fn open<'a>(&'a mut self, view: &PromptView) -> io::Result<Box<dyn PromptSurface + 'a>> {
        let guard = RawModeGuard::activate()?;
        let mut surface = TerminalSurface {
            input: KeyInput::new(view),
            prefs: self.prefs,
            stdout: io::stdout(),
            guard,
            message: None,
        };
        surface.stdout.execute(cursor::Hide)?;
        surface.render()?;
        Ok(Box::new(surface))
    }
}

struct TerminalSurface {
    input: KeyInput,
    prefs: OutputPreferences,
    stdout: Stdout,
    guard: RawModeGuard,
    message: Option<String>,
}

/// Editing state of one prompt and the key to event mapping.
#[derive(Debug)]
struct KeyInput {
    view: PromptView,
    value: String,
    filter: String,
    highlight: Option<usize>,
    selected: Vec<usize>,
}

impl PromptSurface for TerminalSurface {
    fn next_event(&mut self) -> io::Result<PromptEvent> {
        loop {
            let key = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                Event::Resize(_, _) => {
                    self.render()?;
                    continue;
                }
                _ => continue,
            };
            if let Some(event) = self.input.translate(key) {
                self.render()?;
                return Ok(event);
            }
        }
    }

    fn show_validation(&mut self, message: Option<&str>) -> io::Result<()> {
        self.message = message.map(str::to_string);
        self.render()
    }

    fn sync_items(&mut self, active: &[usize], selected: &[usize]) -> io::Result<()> {
        self.input.highlight = active.first().copied();
        self.input.selected = selected.to_vec();
        self.render()
    }

    fn dispose(&mut self) {
        let _ = self.stdout.execute(terminal::Clear(ClearType::All));
        let _ = self.stdout.execute(cursor::MoveTo(0, 0));
        let _ = self.stdout.execute(cursor::Show);
        self.guard.deactivate();
    }
}

impl KeyInput {
    fn new(view: &PromptView) -> Self {
        Self {
            view: view.clone(),
            value: view.value.clone(),
            filter: String::new(),
            highlight: view.active.first().copied(),
            selected: view.selected.clone(),
        }
    }

    fn translate(&mut self, key: KeyEvent) -> Option<PromptEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(PromptEvent::Hide),
                KeyCode::Char('b') | KeyCode::Char('B') => Some(PromptEvent::Button(NavButton::Back)),
                KeyCode::Char('u') | KeyCode::Char('U') => self.edit(String::clear),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Enter | KeyCode::Tab if !self.can_accept() => None,
            KeyCode::Enter => Some(PromptEvent::Accept),
            KeyCode::Esc => Some(PromptEvent::Hide),
            KeyCode::Tab => Some(self.forward_button()),
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            KeyCode::Up if self.view.is_picker() => self.move_highlight(false),
            KeyCode::Down if self.view.is_picker() => self.move_highlight(true),
            KeyCode::Char(' ') if self.view.kind == PromptKind::Multi => self.toggle_highlighted(),
            KeyCode::Char(ch) => self.edit(|text| text.push(ch)),
            _ => None,
        }
    }

    /// A single-select picker needs a highlighted or selected item; when
    /// the filter hides every item the keys that accept do nothing.
    fn can_accept(&self) -> bool {
        self.view.kind != PromptKind::Single
            || self.highlight.is_some()
            || !self.selected.is_empty()
    }

    fn forward_button(&self) -> PromptEvent {
        self.view
            .buttons
            .iter()
            .find(|button| matches!(button, NavButton::Proceed | NavButton::Confirm))
            .map(|button| PromptEvent::Button(*button))
            .unwrap_or(PromptEvent::Accept)
    }

    /// Applies `change` to the text value, or to the filter in pickers.
    fn edit(&mut self, change: impl FnOnce(&mut String)) -> Option<PromptEvent> {
        if !self.view.is_picker() {
            change(&mut self.value);
            return Some(PromptEvent::Changed(self.value.clone()));
        }
        change(&mut self.filter);
        let visible = self.visible();
        if !self.highlight.is_some_and(|index| visible.contains(&index)) {
            self.highlight = visible.first().copied();
        }
        Some(PromptEvent::ActiveChanged(self.highlight.into_iter().collect()))
    }

    fn move_highlight(&mut self, forward: bool) -> Option<PromptEvent> {
        let visible = self.visible();
        if visible.is_empty() {
            return None;
        }
        let position = self
            .highlight
            .and_then(|index| visible.iter().position(|candidate| *candidate == index));
        let next = match (position, forward) {
            (None, _) => 0,
            (Some(position), true) => (position + 1) % visible.len(),
            (Some(position), false) => position.checked_sub(1).unwrap_or(visible.len() - 1),
        };
        self.highlight = Some(visible[next]);
        Some(PromptEvent::ActiveChanged(vec![visible[next]]))
    }

    fn toggle_highlighted(&mut self) -> Option<PromptEvent> {
        let index = self.highlight?;
        match self.selected.iter().position(|candidate| *candidate == index) {
            Some(position) => {
                self.selected.remove(position);
            }
            None => {
                self.selected.push(index);
                self.selected.sort_unstable();
            }
        }
        Some(PromptEvent::SelectionChanged(self.selected.clone()))
    }

    /// Enabled items matching the filter, in display order.
    fn visible(&self) -> Vec<usize> {
        let needle = self.filter.to_lowercase();
        self.view
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.disabled)
            .filter(|(_, item)| {
                needle.is_empty()
                    || item.always_show
                    || item.label.to_lowercase().contains(&needle)
                    || (self.view.match_on_description
                        && item
                            .description
                            .as_deref()
                            .is_some_and(|text| text.to_lowercase().contains(&needle)))
                    || (self.view.match_on_detail
                        && item
                            .detail
                            .as_deref()
                            .is_some_and(|text| text.to_lowercase().contains(&needle)))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

impl TerminalSurface {
    fn render(&mut self) -> io::Result<()> {
        self.stdout.execute(terminal::Clear(ClearType::All))?;
        self.stdout.execute(cursor::MoveTo(0, 0))?;

        let title = match (self.input.view.step, self.input.view.total_steps) {
            (Some(step), Some(total)) => format!("{} ({step}/{total})", self.input.view.title),
            _ => self.input.view.title.clone(),
        };
        let header = apply_style(MessageKind::Section, title, &self.prefs);
        self.line(&header)?;
        if let Some(prompt) = self.input.view.prompt.clone() {
            self.line(&detail_text(prompt, &self.prefs))?;
        }
        self.line("")?;

        if self.input.view.is_picker() {
            self.render_items()?;
        } else {
            self.render_text()?;
        }

        if let Some(message) = self.message.clone() {
            self.line(&apply_style(MessageKind::Error, message, &self.prefs))?;
        }
        self.line("")?;
        let hint = self.hint();
        self.line(&detail_text(hint, &self.prefs))?;
        self.stdout.flush()
    }

    fn render_text(&mut self) -> io::Result<()> {
        let shown = if self.input.view.password {
            "*".repeat(self.input.value.chars().count())
        } else {
            self.input.value.clone()
        };
        let line = if shown.is_empty() {
            let placeholder = self.input.view.placeholder.clone().unwrap_or_default();
            format!("> {}", detail_text(placeholder, &self.prefs))
        } else {
            format!("> {shown}")
        };
        self.line(&line)
    }

    fn render_items(&mut self) -> io::Result<()> {
        let filter_line = if self.input.filter.is_empty() {
            let placeholder = self.input.view.placeholder.clone().unwrap_or_default();
            format!("> {}", detail_text(placeholder, &self.prefs))
        } else {
            format!("> {}", self.input.filter)
        };
        self.line(&filter_line)?;

        let visible = self.input.visible();
        let pointer_glyph = if self.prefs.plain_mode { ">" } else { "▸" };
        let multi = self.input.view.kind == PromptKind::Multi;
        for index in visible {
            let item = self.input.view.items[index].clone();
            let highlighted = self.input.highlight == Some(index);
            let pointer = if highlighted { pointer_glyph } else { " " };
            let check = match (multi, self.input.selected.contains(&index)) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            let description = item
                .description
                .as_deref()
                .map(|text| format!("  {}", detail_text(text, &self.prefs)))
                .unwrap_or_default();
            if highlighted {
                self.stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            write!(self.stdout, " {pointer} {check}{}", item.label)?;
            self.stdout.execute(SetAttribute(Attribute::Reset))?;
            self.line(&description)?;
            if let Some(detail) = item.detail.as_deref() {
                self.line(&format!("     {}", detail_text(detail, &self.prefs)))?;
            }
        }
        Ok(())
    }

    fn hint(&self) -> String {
        let mut parts = vec!["Enter accept".to_string()];
        for button in &self.input.view.buttons {
            match button {
                NavButton::Back => parts.push(format!("Ctrl+B {}", button.label())),
                NavButton::Proceed | NavButton::Confirm => {
                    parts.push(format!("Tab {}", button.label()))
                }
                NavButton::Cancel => {}
            }
        }
        if self.input.view.kind == PromptKind::Multi {
            parts.push("Space toggle".to_string());
        }
        parts.push("Esc cancel".to_string());
        parts.join("  ")
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        write!(self.stdout, "{text}\r\n")
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}
