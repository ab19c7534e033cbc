//! Conventional commit message composer built on the inquiry engine.

pub mod fields;
pub mod gitmoji;
pub mod message;
pub mod rules;
pub mod steps;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use crate::commit::rules::RuleLevel;
use crate::config::{ComposerConfig, ConfigManager};
use crate::errors::ComposeError;
use crate::inquiry::driver::{loop_inquiry, LoopOptions, WizardOutcome};
use crate::inquiry::record::AnswerRecord;
use crate::inquiry::session::PromptHost;

pub use fields::CommitField;
pub use message::{compose_message, MessageOptions};

/// Caller-supplied parameters of a composition run.
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Run this preset directly instead of asking for one.
    pub preset: Option<String>,
    /// Current branch name, appended when the configuration asks for it.
    pub branch: Option<String>,
}

/// Runs the commit wizard and returns the composed message, or `None` when
/// the user cancelled or answered nothing.
///
/// The configuration is saved back when a new scope was added or a message
/// was composed (to remember the preset).
pub fn run_commit_wizard(
    host: &mut dyn PromptHost,
    manager: &ConfigManager,
    options: &ComposeOptions,
) -> Result<Option<String>, ComposeError> {
    let initial = manager.load()?;
    let preset = match options.preset.as_deref() {
        Some(name) => Some(initial.preset(name)?.clone()),
        None => None,
    };

    let config = Rc::new(RefCell::new(initial.clone()));
    let message_steps = steps::message_steps(&config);
    let outcome = match &preset {
        Some(preset) => {
            let steps = steps::steps_for(&message_steps, &preset.fields);
            loop_inquiry(&steps, host, LoopOptions::new())?.map_completed(|answers| {
                let mut record = AnswerRecord::new();
                record.insert(CommitField::Steps, preset.name.clone());
                record.extend(&answers);
                record
            })
        }
        None => {
            let steps = vec![steps::preset_step(&config, message_steps)];
            loop_inquiry(&steps, host, LoopOptions::new())?
        }
    };
    let mut updated = config.borrow().clone();

    let message = match outcome {
        WizardOutcome::Completed(record) => {
            let message = compose_message(&record, &message_options(&updated, options));
            if let Some(message) = &message {
                report_lint_warnings(&updated, &record, message);
                updated.last_preset = record.get_text(&CommitField::Steps).map(str::to_string);
            }
            message
        }
        WizardOutcome::Cancelled | WizardOutcome::SteppedOut => None,
    };

    if message.is_some() {
        info!(preset = ?updated.last_preset, "commit message composed");
    }
    if updated != initial {
        manager.save(&updated)?;
    }
    Ok(message)
}

fn message_options(config: &ComposerConfig, options: &ComposeOptions) -> MessageOptions {
    MessageOptions {
        breaking_keyword: config.breaking_keyword.clone(),
        branch: options.branch.clone().filter(|_| config.append_branch_name),
    }
}

/// Logs warning-level violations of the answers, and every header rule
/// the composed header breaks (it was never typed, so never validated).
fn report_lint_warnings(config: &ComposerConfig, record: &AnswerRecord<CommitField>, message: &str) {
    for (field, answer) in record.iter() {
        let value = answer.to_string();
        for violation in config.rules.violations(*field, RuleLevel::Warning, &value) {
            warn!("{violation}");
        }
    }
    if record
        .get_text(&CommitField::Header)
        .is_some_and(|header| !header.trim().is_empty())
    {
        return;
    }
    let header = message.lines().next().unwrap_or_default();
    for rule in config.rules.rules.iter().filter(|rule| rule.field == CommitField::Header) {
        if let Some(violation) = rule.check(header) {
            warn!("{violation}");
        }
    }
}
