//! Prompt configuration and outcome types.
//!
//! A [`PromptRequest`] describes one modal prompt: a free-text input, a
//! single-select picker or a multi-select picker. Requests are rebuilt on
//! every visit of a step so they can depend on answers collected earlier.

use std::fmt;
use std::sync::Arc;

/// Navigation controls a prompt can expose next to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    /// Return to the previous step without validating.
    Back,
    /// Validate and continue to the next step.
    Proceed,
    /// Validate and finish; shown on the last step.
    Confirm,
    /// Dismiss the prompt.
    Cancel,
}

impl NavButton {
    pub fn label(&self) -> &'static str {
        match self {
            NavButton::Back => "Back",
            NavButton::Proceed => "Next",
            NavButton::Confirm => "Confirm",
            NavButton::Cancel => "Cancel",
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

type ValidatorCallback = dyn Fn(&str) -> Result<(), String> + Send + Sync;
type SharedValidatorCallback = Arc<ValidatorCallback>;

/// Built-in validation helpers for text prompts.
#[derive(Clone, Default)]
pub enum Validator {
    #[default]
    None,
    NonEmpty,
    MaxLength(usize),
    OneOf(Vec<String>),
    NotIn(Vec<String>),
    Custom(SharedValidatorCallback),
}

impl Validator {
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Validator::Custom(Arc::new(func))
    }

    pub fn validate(&self, input: &str) -> Result<(), ValidationError> {
        match self {
            Validator::None => Ok(()),
            Validator::NonEmpty => {
                if input.trim().is_empty() {
                    Err(ValidationError::new("Value cannot be empty"))
                } else {
                    Ok(())
                }
            }
            Validator::MaxLength(max) => {
                let len = input.chars().count();
                if len > *max {
                    Err(ValidationError::new(format!(
                        "Value cannot exceed {max} characters (got {len})"
                    )))
                } else {
                    Ok(())
                }
            }
            Validator::OneOf(options) => {
                if options.iter().any(|candidate| candidate == input.trim()) {
                    Ok(())
                } else {
                    Err(ValidationError::new(format!(
                        "Value must be one of: {}",
                        options.join(", ")
                    )))
                }
            }
            Validator::NotIn(existing) => {
                if existing.iter().any(|candidate| candidate == input.trim()) {
                    Err(ValidationError::new(format!(
                        "`{}` already exists",
                        input.trim()
                    )))
                } else {
                    Ok(())
                }
            }
            Validator::Custom(func) => func(input).map_err(ValidationError::new),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::None => write!(f, "None"),
            Validator::NonEmpty => write!(f, "NonEmpty"),
            Validator::MaxLength(max) => write!(f, "MaxLength({max})"),
            Validator::OneOf(options) => f.debug_tuple("OneOf").field(options).finish(),
            Validator::NotIn(existing) => f.debug_tuple("NotIn").field(existing).finish(),
            Validator::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Chrome shared by every prompt kind. Unset fields are filled from the
/// step baseline by [`PromptChrome::fill_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptChrome {
    pub title: Option<String>,
    pub step: Option<usize>,
    pub total_steps: Option<usize>,
    pub placeholder: Option<String>,
    pub buttons: Option<Vec<NavButton>>,
}

impl PromptChrome {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_progress(mut self, step: usize, total_steps: usize) -> Self {
        self.step = Some(step);
        self.total_steps = Some(total_steps);
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<NavButton>) -> Self {
        self.buttons = Some(buttons);
        self
    }

    /// Keeps every field already set and copies the rest from `baseline`.
    pub fn fill_from(&mut self, baseline: &PromptChrome) {
        if self.title.is_none() {
            self.title = baseline.title.clone();
        }
        if self.step.is_none() {
            self.step = baseline.step;
        }
        if self.total_steps.is_none() {
            self.total_steps = baseline.total_steps;
        }
        if self.placeholder.is_none() {
            self.placeholder = baseline.placeholder.clone();
        }
        if self.buttons.is_none() {
            self.buttons = baseline.buttons.clone();
        }
    }

    /// Buttons shown on the prompt: the explicit list, else `Back` past the
    /// first step followed by `Confirm` on the last step or `Proceed`.
    pub fn active_buttons(&self) -> Vec<NavButton> {
        if let Some(buttons) = &self.buttons {
            return buttons.clone();
        }
        match (self.step, self.total_steps) {
            (Some(step), Some(total)) => {
                let mut buttons = Vec::new();
                if step > 1 {
                    buttons.push(NavButton::Back);
                }
                buttons.push(if step == total {
                    NavButton::Confirm
                } else {
                    NavButton::Proceed
                });
                buttons
            }
            _ => Vec::new(),
        }
    }
}

/// Free-text prompt configuration.
#[derive(Debug, Clone, Default)]
pub struct TextPrompt {
    pub chrome: PromptChrome,
    pub value: Option<String>,
    pub prompt: Option<String>,
    pub password: bool,
    pub validator: Validator,
}

impl TextPrompt {
    pub fn new(chrome: PromptChrome) -> Self {
        Self {
            chrome,
            ..Self::default()
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

/// One entry of a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub disabled: bool,
    pub always_show: bool,
}

impl PickItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            detail: None,
            disabled: false,
            always_show: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn always_shown(mut self) -> Self {
        self.always_show = true;
        self
    }
}

/// Picker configuration shared by single- and multi-select prompts.
///
/// `active` and `selected` refer to items by value; `None` means "derive
/// from the answer record or the step default".
#[derive(Debug, Clone, Default)]
pub struct PickPrompt {
    pub chrome: PromptChrome,
    pub items: Vec<PickItem>,
    pub active: Option<Vec<String>>,
    pub selected: Option<Vec<String>>,
    pub match_on_description: bool,
    pub match_on_detail: bool,
}

impl PickPrompt {
    pub fn new(chrome: PromptChrome, items: Vec<PickItem>) -> Self {
        Self {
            chrome,
            items,
            ..Self::default()
        }
    }

    pub fn with_active(mut self, values: Vec<String>) -> Self {
        self.active = Some(values);
        self
    }

    pub fn matching_details(mut self) -> Self {
        self.match_on_description = true;
        self.match_on_detail = true;
        self
    }

    pub(crate) fn indices_of(&self, values: &[String]) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.disabled && values.contains(&item.value))
            .map(|(index, _)| index)
            .collect()
    }
}

/// The prompt kinds a step can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    Single,
    Multi,
}

impl PromptKind {
    pub fn name(&self) -> &'static str {
        match self {
            PromptKind::Text => "text",
            PromptKind::Single => "single-select",
            PromptKind::Multi => "multi-select",
        }
    }
}

/// A fully described prompt, tagged by kind.
#[derive(Debug, Clone)]
pub enum PromptRequest {
    Text(TextPrompt),
    Single(PickPrompt),
    Multi(PickPrompt),
}

impl PromptRequest {
    /// An empty request of `kind` carrying only `chrome`.
    pub fn blank(kind: PromptKind, chrome: PromptChrome) -> Self {
        match kind {
            PromptKind::Text => PromptRequest::Text(TextPrompt::new(chrome)),
            PromptKind::Single => PromptRequest::Single(PickPrompt::new(chrome, Vec::new())),
            PromptKind::Multi => PromptRequest::Multi(PickPrompt::new(chrome, Vec::new())),
        }
    }

    pub fn kind(&self) -> PromptKind {
        match self {
            PromptRequest::Text(_) => PromptKind::Text,
            PromptRequest::Single(_) => PromptKind::Single,
            PromptRequest::Multi(_) => PromptKind::Multi,
        }
    }

    pub fn chrome(&self) -> &PromptChrome {
        match self {
            PromptRequest::Text(text) => &text.chrome,
            PromptRequest::Single(pick) | PromptRequest::Multi(pick) => &pick.chrome,
        }
    }

    pub fn chrome_mut(&mut self) -> &mut PromptChrome {
        match self {
            PromptRequest::Text(text) => &mut text.chrome,
            PromptRequest::Single(pick) | PromptRequest::Multi(pick) => &mut pick.chrome,
        }
    }

    pub fn title(&self) -> &str {
        self.chrome().title.as_deref().unwrap_or("Input")
    }
}

/// A value produced by a prompt that resolved normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Text(String),
    Item(PickItem),
    Items(Vec<PickItem>),
}

/// How a prompt session ended.
///
/// Going back and abandoning are kept apart: collapsing them would make a
/// backward step indistinguishable from cancelling the whole wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Produced(Response),
    SteppedBack,
    Abandoned,
}

impl PromptOutcome {
    pub fn produced(&self) -> Option<&Response> {
        match self {
            PromptOutcome::Produced(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buttons_follow_progress() {
        let first = PromptChrome::default().with_progress(1, 3);
        assert_eq!(first.active_buttons(), vec![NavButton::Proceed]);

        let middle = PromptChrome::default().with_progress(2, 3);
        assert_eq!(
            middle.active_buttons(),
            vec![NavButton::Back, NavButton::Proceed]
        );

        let last = PromptChrome::default().with_progress(3, 3);
        assert_eq!(last.active_buttons(), vec![NavButton::Back, NavButton::Confirm]);

        assert!(PromptChrome::default().active_buttons().is_empty());
    }

    #[test]
    fn explicit_buttons_win() {
        let chrome = PromptChrome::default()
            .with_progress(2, 3)
            .with_buttons(vec![NavButton::Cancel]);
        assert_eq!(chrome.active_buttons(), vec![NavButton::Cancel]);
    }

    #[test]
    fn fill_from_keeps_custom_values() {
        let mut chrome = PromptChrome::titled("scope");
        let baseline = PromptChrome::titled("Enter scope")
            .with_progress(2, 4)
            .with_placeholder("baseline");
        chrome.fill_from(&baseline);

        assert_eq!(chrome.title.as_deref(), Some("scope"));
        assert_eq!(chrome.step, Some(2));
        assert_eq!(chrome.total_steps, Some(4));
        assert_eq!(chrome.placeholder.as_deref(), Some("baseline"));
    }

    #[test]
    fn validators_report_messages() {
        assert!(Validator::NonEmpty.validate("  ").is_err());
        assert!(Validator::NonEmpty.validate("x").is_ok());
        assert!(Validator::MaxLength(3).validate("abcd").is_err());
        assert!(Validator::NotIn(vec!["core".into()]).validate("core").is_err());
        assert!(Validator::OneOf(vec!["a".into()]).validate("a").is_ok());

        let custom = Validator::custom(|input| {
            if input.starts_with('#') {
                Ok(())
            } else {
                Err("Issues must start with #".into())
            }
        });
        assert_eq!(
            custom.validate("12").unwrap_err().message,
            "Issues must start with #"
        );
    }

    #[test]
    fn indices_skip_disabled_items() {
        let pick = PickPrompt::new(
            PromptChrome::default(),
            vec![
                PickItem::new("A", "a").disabled(),
                PickItem::new("B", "b"),
                PickItem::new("A again", "a"),
            ],
        );
        assert_eq!(pick.indices_of(&["a".to_string()]), vec![2]);
    }
}
