//! Step definitions of the commit wizard.
//!
//! The configuration is shared between steps through `Rc<RefCell<_>>` so
//! that items are rebuilt from its current state on every visit and the
//! scope step can record new scopes.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::commit::fields::CommitField;
use crate::config::ComposerConfig;
use crate::errors::InquiryError;
use crate::inquiry::driver::{loop_inquiry, LoopOptions, WizardOutcome};
use crate::inquiry::prompts::{
    NavButton, PickItem, PickPrompt, PromptChrome, PromptKind, PromptOutcome, PromptRequest,
    Response, TextPrompt, Validator,
};
use crate::inquiry::session::show_box;
use crate::inquiry::step::{create_inquiry_item, Navigation, Step, StepContext};

pub type SharedConfig = Rc<RefCell<ComposerConfig>>;

/// Scope picker value that creates and remembers a new scope.
pub const NEW_SCOPE: &str = "$new";
/// Scope picker value that uses a new scope for this commit only.
pub const ONCE_SCOPE: &str = "$once";

/// Message steps in their fixed order.
pub fn message_steps(config: &SharedConfig) -> Vec<Step<CommitField>> {
    CommitField::MESSAGE
        .into_iter()
        .map(|field| match field {
            CommitField::Type => type_step(config),
            CommitField::Scope => scope_step(config),
            CommitField::Gitmoji => gitmoji_step(config),
            text => text_step(text, config),
        })
        .collect()
}

/// The message steps whose field belongs to `fields`, keeping step order.
pub fn steps_for(steps: &[Step<CommitField>], fields: &[CommitField]) -> Vec<Step<CommitField>> {
    steps
        .iter()
        .filter(|step| fields.contains(step.key()))
        .cloned()
        .collect()
}

/// `Back` plus `Confirm` on the last step or `Proceed` otherwise. Message
/// steps always offer `Back`, so the first step of a preset can return to
/// the preset picker.
fn wizard_buttons(ctx: &StepContext<'_, CommitField>) -> Vec<NavButton> {
    let forward = if ctx.index + 1 == ctx.steps.len() {
        NavButton::Confirm
    } else {
        NavButton::Proceed
    };
    vec![NavButton::Back, forward]
}

fn chrome_for(
    field: CommitField,
    base: &PromptChrome,
    config: &ComposerConfig,
    ctx: &StepContext<'_, CommitField>,
) -> PromptChrome {
    let placeholder = config
        .question(field)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Enter {field}"));
    let mut chrome = PromptChrome::titled(field.as_str())
        .with_placeholder(placeholder)
        .with_buttons(wizard_buttons(ctx));
    chrome.step = base.step;
    chrome.total_steps = base.total_steps;
    chrome
}

fn text_step(field: CommitField, config: &SharedConfig) -> Step<CommitField> {
    let config = Rc::clone(config);
    create_inquiry_item(PromptKind::Text, field)
        .resolve_with(move |base, ctx| {
            let config = config.borrow();
            let chrome = chrome_for(field, base.chrome(), &config, ctx);
            Ok(PromptRequest::Text(
                TextPrompt::new(chrome).with_validator(config.rules.validator_for(field)),
            ))
        })
        .build()
}

fn picker(chrome: PromptChrome, items: Vec<PickItem>) -> PromptRequest {
    PromptRequest::Single(PickPrompt::new(chrome, items).matching_details())
}

fn type_step(config: &SharedConfig) -> Step<CommitField> {
    let config = Rc::clone(config);
    create_inquiry_item(PromptKind::Single, CommitField::Type)
        .resolve_with(move |base, ctx| {
            let config = config.borrow();
            let items = config
                .types
                .iter()
                .map(|entry| {
                    let (label, value) = match entry.emoji.as_deref() {
                        Some(emoji) if config.emoji_in_header => {
                            (format!("{emoji} {}", entry.name), format!("{emoji}{}", entry.name))
                        }
                        _ => (entry.name.clone(), entry.name.clone()),
                    };
                    PickItem::new(label, value)
                        .with_description(entry.title.clone())
                        .with_detail(entry.description.clone())
                })
                .collect();
            Ok(picker(chrome_for(CommitField::Type, base.chrome(), &config, ctx), items))
        })
        .build()
}

fn scope_items(config: &ComposerConfig) -> Vec<PickItem> {
    let mut items = vec![PickItem::new("None", "").with_detail("No scope.").always_shown()];
    items.extend(
        config
            .scopes
            .iter()
            .map(|scope| PickItem::new(scope.clone(), scope.clone()).with_detail("From the composer configuration.")),
    );
    items.extend(
        config
            .rules
            .scope_enum
            .iter()
            .filter(|scope| !config.scopes.contains(scope))
            .map(|scope| PickItem::new(scope.clone(), scope.clone()).with_detail("From the lint rules.")),
    );
    items.push(
        PickItem::new("New scope", NEW_SCOPE)
            .with_detail("Create a new scope and remember it.")
            .always_shown(),
    );
    items.push(
        PickItem::new("New scope (once)", ONCE_SCOPE)
            .with_detail("Use a new scope for this commit only.")
            .always_shown(),
    );
    items
}

fn scope_step(config: &SharedConfig) -> Step<CommitField> {
    let resolve_config = Rc::clone(config);
    let interpret_config = Rc::clone(config);
    create_inquiry_item(PromptKind::Single, CommitField::Scope)
        .resolve_with(move |base, ctx| {
            let config = resolve_config.borrow();
            let chrome = chrome_for(CommitField::Scope, base.chrome(), &config, ctx);
            Ok(picker(chrome, scope_items(&config)))
        })
        .interpret_with(move |ctx, request, outcome| {
            let item = match outcome {
                PromptOutcome::Produced(Response::Item(item)) => item,
                PromptOutcome::Produced(_) => return Ok(Navigation::JumpBy(0)),
                PromptOutcome::SteppedBack => return Ok(Navigation::Retreat),
                PromptOutcome::Abandoned => return Ok(Navigation::Abort(None)),
            };
            let scope = if item.value == NEW_SCOPE || item.value == ONCE_SCOPE {
                let Some(scope) = ask_new_scope(ctx, request, &interpret_config)? else {
                    return Ok(Navigation::JumpBy(0));
                };
                if item.value == NEW_SCOPE && interpret_config.borrow_mut().add_scope(&scope) {
                    info!(scope = %scope, "new scope added to configuration");
                }
                scope
            } else {
                item.value
            };
            ctx.record.insert(CommitField::Scope, scope);
            Ok(Navigation::Advance)
        })
        .build()
}

/// Asks for the name of a new scope. `None` when the prompt was left
/// without a value.
fn ask_new_scope(
    ctx: &mut StepContext<'_, CommitField>,
    picker: &PromptRequest,
    config: &SharedConfig,
) -> Result<Option<String>, InquiryError> {
    let (known, placeholder) = {
        let config = config.borrow();
        let placeholder = config
            .question(CommitField::Scope)
            .unwrap_or("Enter a scope")
            .to_string();
        (config.scopes.clone(), placeholder)
    };
    let mut chrome = PromptChrome::titled("scope").with_placeholder(placeholder);
    chrome.step = picker.chrome().step;
    chrome.total_steps = picker.chrome().total_steps;
    let validator = Validator::custom(move |value| {
        let value = value.trim();
        if value.is_empty() {
            Err("Scope cannot be empty".to_string())
        } else if known.iter().any(|scope| scope == value) {
            Err("Scope already exists".to_string())
        } else {
            Ok(())
        }
    });
    let request = PromptRequest::Text(TextPrompt::new(chrome).with_validator(validator));
    match show_box(&mut *ctx.host, &request)? {
        PromptOutcome::Produced(Response::Text(scope)) => Ok(Some(scope.trim().to_string())),
        _ => Ok(None),
    }
}

fn gitmoji_step(config: &SharedConfig) -> Step<CommitField> {
    let config = Rc::clone(config);
    create_inquiry_item(PromptKind::Single, CommitField::Gitmoji)
        .resolve_with(move |base, ctx| {
            let config = config.borrow();
            let mut items = vec![PickItem::new("None", "").with_detail("No gitmoji.").always_shown()];
            items.extend(config.gitmojis().iter().map(|gitmoji| {
                PickItem::new(gitmoji.emoji.clone(), gitmoji.emoji.clone())
                    .with_description(gitmoji.description.clone())
                    .with_detail(gitmoji.code.clone())
            }));
            Ok(picker(chrome_for(CommitField::Gitmoji, base.chrome(), &config, ctx), items))
        })
        .build()
}

/// The top-level step: pick a preset, then run its message steps as a
/// nested wizard sharing this run's answers.
pub fn preset_step(config: &SharedConfig, message_steps: Vec<Step<CommitField>>) -> Step<CommitField> {
    let resolve_config = Rc::clone(config);
    let interpret_config = Rc::clone(config);
    create_inquiry_item(PromptKind::Single, CommitField::Steps)
        .resolve_with(move |base, ctx| {
            let config = resolve_config.borrow();
            let remembered = config
                .last_preset
                .as_deref()
                .filter(|name| config.presets.iter().any(|preset| preset.name == *name));
            let mut presets: Vec<_> = config.presets.iter().collect();
            presets.sort_by_key(|preset| Some(preset.name.as_str()) != remembered);
            let items = presets
                .into_iter()
                .map(|preset| {
                    let item = PickItem::new(preset.name.clone(), preset.name.clone()).with_detail(preset.summary());
                    if Some(preset.name.as_str()) == remembered {
                        item.with_description("last used")
                    } else {
                        item
                    }
                })
                .collect();
            let current = ctx
                .record
                .get_text(&CommitField::Steps)
                .or(remembered)
                .map(|name| vec![name.to_string()]);
            let chrome = PromptChrome::titled("Select steps")
                .with_placeholder("Choose which fields to fill in");
            let mut pick = PickPrompt::new(chrome, items);
            pick.chrome.step = base.chrome().step;
            pick.chrome.total_steps = base.chrome().total_steps;
            pick.active = current;
            Ok(PromptRequest::Single(pick))
        })
        .interpret_with(move |ctx, _request, outcome| {
            let preset = match outcome {
                PromptOutcome::Produced(Response::Item(item)) => item.value,
                PromptOutcome::Produced(_) => return Ok(Navigation::JumpBy(0)),
                PromptOutcome::SteppedBack => return Ok(Navigation::Retreat),
                PromptOutcome::Abandoned => return Ok(Navigation::Abort(None)),
            };
            let fields = interpret_config
                .borrow()
                .presets
                .iter()
                .find(|candidate| candidate.name == preset)
                .map(|candidate| candidate.fields.clone())
                .unwrap_or_default();
            ctx.record.insert(CommitField::Steps, preset.clone());
            let nested = steps_for(&message_steps, &fields);
            debug!(preset = %preset, steps = nested.len(), "running preset steps");

            match loop_inquiry(&nested, &mut *ctx.host, LoopOptions::nested(&mut *ctx.record))? {
                WizardOutcome::Completed(answers) => {
                    ctx.record.extend(&answers);
                    // Drop answers left behind by presets the user backed out of.
                    ctx.record
                        .retain(|field, _| *field == CommitField::Steps || fields.contains(field));
                    Ok(Navigation::Advance)
                }
                WizardOutcome::SteppedOut => Ok(Navigation::JumpBy(0)),
                WizardOutcome::Cancelled => {
                    ctx.record.clear();
                    Ok(Navigation::Retreat)
                }
            }
        })
        .build()
}
