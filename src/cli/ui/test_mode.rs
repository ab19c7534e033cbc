//! Scripted prompt host used by tests and by the binary when
//! `COMMIT_INQUIRY_TEST_EVENTS` is set.
//!
//! A script is a `|`-separated list of sessions, one per prompt opened, each
//! a `,`-separated list of events:
//!
//! ```text
//! active=1,accept | type=core,next | back | type=add parser,confirm
//! ```

use std::collections::VecDeque;
use std::env;
use std::io;

use crate::errors::InquiryError;
use crate::inquiry::prompts::NavButton;
use crate::inquiry::session::{PromptEvent, PromptHost, PromptSurface, PromptView};

pub const TEST_EVENTS_VAR: &str = "COMMIT_INQUIRY_TEST_EVENTS";

/// Events fed to one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedSession {
    events: VecDeque<PromptEvent>,
}

impl ScriptedSession {
    pub fn new(events: Vec<PromptEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Types `text` and presses Enter.
    pub fn typed(text: impl Into<String>) -> Self {
        Self::new(vec![PromptEvent::Changed(text.into()), PromptEvent::Accept])
    }

    /// Presses the `Back` button.
    pub fn back() -> Self {
        Self::new(vec![PromptEvent::Button(NavButton::Back)])
    }

    /// Moves the highlight to `index` and presses Enter.
    pub fn pick(index: usize) -> Self {
        Self::new(vec![PromptEvent::ActiveChanged(vec![index]), PromptEvent::Accept])
    }
}

/// [`PromptHost`] that replays scripted sessions and records what was shown.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    sessions: VecDeque<ScriptedSession>,
    views: Vec<PromptView>,
    validation_messages: Vec<Option<String>>,
    disposed: usize,
}

impl ScriptedHost {
    pub fn new(sessions: Vec<ScriptedSession>) -> Self {
        Self {
            sessions: sessions.into(),
            ..Self::default()
        }
    }

    /// Builds a host from [`TEST_EVENTS_VAR`], or `None` when it is unset.
    pub fn from_env() -> Result<Option<Self>, InquiryError> {
        match env::var(TEST_EVENTS_VAR) {
            Ok(raw) => parse_script(&raw).map(|sessions| Some(Self::new(sessions))),
            Err(_) => Ok(None),
        }
    }

    /// Every prompt opened so far, in order.
    pub fn views(&self) -> &[PromptView] {
        &self.views
    }

    /// Every validation update pushed to a surface, in order.
    pub fn validation_messages(&self) -> &[Option<String>] {
        &self.validation_messages
    }

    pub fn disposed(&self) -> usize {
        self.disposed
    }

    pub fn remaining_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl PromptHost for ScriptedHost {
    fn open<'a>(&'a mut self, view: &PromptView) -> io::Result<Box<dyn PromptSurface + 'a>> {
        let session = self.sessions.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Scripted sessions exhausted before prompt `{}`", view.title),
            )
        })?;
        self.views.push(view.clone());
        Ok(Box::new(ScriptedSurface {
            title: view.title.clone(),
            events: session.events,
            validation_messages: &mut self.validation_messages,
            disposed: &mut self.disposed,
        }))
    }
}

struct ScriptedSurface<'a> {
    title: String,
    events: VecDeque<PromptEvent>,
    validation_messages: &'a mut Vec<Option<String>>,
    disposed: &'a mut usize,
}

impl PromptSurface for ScriptedSurface<'_> {
    fn next_event(&mut self) -> io::Result<PromptEvent> {
        self.events.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Scripted events exhausted in prompt `{}`", self.title),
            )
        })
    }

    fn show_validation(&mut self, message: Option<&str>) -> io::Result<()> {
        self.validation_messages.push(message.map(str::to_string));
        Ok(())
    }

    fn sync_items(&mut self, _active: &[usize], _selected: &[usize]) -> io::Result<()> {
        Ok(())
    }

    fn dispose(&mut self) {
        *self.disposed += 1;
    }
}

/// Parses a full script into sessions. Blank segments are skipped.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptedSession>, InquiryError> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(parse_event)
                .collect::<Result<Vec<_>, _>>()
                .map(ScriptedSession::new)
        })
        .collect()
}

fn parse_event(token: &str) -> Result<PromptEvent, InquiryError> {
    if let Some((name, argument)) = token.split_once('=') {
        return match name.trim().to_ascii_lowercase().as_str() {
            "type" => Ok(PromptEvent::Changed(argument.to_string())),
            "active" => parse_indices(argument).map(PromptEvent::ActiveChanged),
            "select" => parse_indices(argument).map(PromptEvent::SelectionChanged),
            other => Err(InquiryError::Script(format!("unknown event `{other}`"))),
        };
    }
    match token.to_ascii_lowercase().as_str() {
        "accept" | "enter" => Ok(PromptEvent::Accept),
        "back" => Ok(PromptEvent::Button(NavButton::Back)),
        "next" | "proceed" => Ok(PromptEvent::Button(NavButton::Proceed)),
        "confirm" => Ok(PromptEvent::Button(NavButton::Confirm)),
        "cancel" => Ok(PromptEvent::Button(NavButton::Cancel)),
        "hide" | "esc" => Ok(PromptEvent::Hide),
        other => Err(InquiryError::Script(format!("unknown event `{other}`"))),
    }
}

fn parse_indices(raw: &str) -> Result<Vec<usize>, InquiryError> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| InquiryError::Script(format!("invalid item index `{part}`")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sessions_and_events() {
        let sessions = parse_script("active=1, accept | type=core,next || select=0;2,confirm").unwrap();
        assert_eq!(
            sessions,
            vec![
                ScriptedSession::pick(1),
                ScriptedSession::new(vec![
                    PromptEvent::Changed("core".into()),
                    PromptEvent::Button(NavButton::Proceed),
                ]),
                ScriptedSession::new(vec![
                    PromptEvent::SelectionChanged(vec![0, 2]),
                    PromptEvent::Button(NavButton::Confirm),
                ]),
            ]
        );
    }

    #[test]
    fn empty_type_clears_value() {
        let sessions = parse_script("type=,accept").unwrap();
        assert_eq!(
            sessions,
            vec![ScriptedSession::new(vec![
                PromptEvent::Changed(String::new()),
                PromptEvent::Accept,
            ])]
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(matches!(parse_script("wiggle"), Err(InquiryError::Script(_))));
        assert!(matches!(parse_script("active=x"), Err(InquiryError::Script(_))));
    }
}
