use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// ASCII glyphs and no colors.
    pub plain_mode: bool,
    /// Suppress informational chatter and confirmations; warnings and
    /// errors still print.
    pub quiet_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet_mode
        && matches!(
            kind,
            MessageKind::Info | MessageKind::Success | MessageKind::Section
        )
}

fn icon(kind: MessageKind, prefs: &OutputPreferences) -> &'static str {
    match (kind, prefs.plain_mode) {
        (MessageKind::Success, false) => "✔",
        (MessageKind::Warning, false) => "⚠",
        (MessageKind::Error, false) => "✖",
        (MessageKind::Success, true) => "OK:",
        (MessageKind::Warning, true) => "WARNING:",
        (MessageKind::Error, true) => "ERROR:",
        (MessageKind::Info | MessageKind::Section, _) => "",
    }
}

pub fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => match icon(kind, prefs) {
            "" => text,
            icon => format!("{icon} {text}"),
        },
    };

    if prefs.plain_mode {
        return base;
    }
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

/// Dimmed secondary text (hints, descriptions).
pub fn detail_text(message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    if prefs.plain_mode {
        message.to_string()
    } else {
        message.to_string().dimmed().to_string()
    }
}

/// Messages go to stderr so that stdout carries only the composed commit
/// message.
pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = current_preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    eprintln!("{}", apply_style(kind, message, &prefs));
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_uses_ascii_labels() {
        let prefs = OutputPreferences {
            plain_mode: true,
            quiet_mode: false,
        };
        assert_eq!(apply_style(MessageKind::Warning, "careful", &prefs), "WARNING: careful");
        assert_eq!(apply_style(MessageKind::Section, " Commit ", &prefs), "=== Commit ===");
        assert_eq!(apply_style(MessageKind::Info, "hello", &prefs), "hello");
    }

    #[test]
    fn quiet_mode_skips_only_chatter() {
        let prefs = OutputPreferences {
            plain_mode: false,
            quiet_mode: true,
        };
        assert!(should_skip(MessageKind::Info, &prefs));
        assert!(should_skip(MessageKind::Success, &prefs));
        assert!(!should_skip(MessageKind::Warning, &prefs));
        assert!(!should_skip(MessageKind::Error, &prefs));
    }
}
