//! Prompt sessions: one modal prompt, opened through a [`PromptHost`],
//! resolved exactly once and disposed on every exit path.

use std::io;

use tracing::{debug, trace};

use crate::errors::InquiryError;
use crate::inquiry::prompts::{
    NavButton, PickItem, PickPrompt, PromptKind, PromptOutcome, PromptRequest, Response,
    TextPrompt,
};

/// Snapshot of a request as handed to the host for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub kind: PromptKind,
    pub title: String,
    pub step: Option<usize>,
    pub total_steps: Option<usize>,
    pub placeholder: Option<String>,
    pub buttons: Vec<NavButton>,
    pub value: String,
    pub prompt: Option<String>,
    pub password: bool,
    pub items: Vec<PickItem>,
    pub active: Vec<usize>,
    pub selected: Vec<usize>,
    pub match_on_description: bool,
    pub match_on_detail: bool,
}

impl PromptView {
    pub fn from_request(request: &PromptRequest) -> Self {
        let chrome = request.chrome();
        let mut view = Self {
            kind: request.kind(),
            title: request.title().to_string(),
            step: chrome.step,
            total_steps: chrome.total_steps,
            placeholder: chrome.placeholder.clone(),
            buttons: chrome.active_buttons(),
            value: String::new(),
            prompt: None,
            password: false,
            items: Vec::new(),
            active: Vec::new(),
            selected: Vec::new(),
            match_on_description: false,
            match_on_detail: false,
        };
        match request {
            PromptRequest::Text(text) => {
                view.value = text.value.clone().unwrap_or_default();
                view.prompt = text.prompt.clone();
                view.password = text.password;
            }
            PromptRequest::Single(pick) | PromptRequest::Multi(pick) => {
                view.items = pick.items.clone();
                view.active = match &pick.active {
                    Some(values) => pick.indices_of(values),
                    None => first_enabled(pick).into_iter().collect(),
                };
                view.selected = pick
                    .selected
                    .as_ref()
                    .map(|values| pick.indices_of(values))
                    .unwrap_or_default();
                view.match_on_description = pick.match_on_description;
                view.match_on_detail = pick.match_on_detail;
            }
        }
        view
    }

    pub fn is_picker(&self) -> bool {
        !matches!(self.kind, PromptKind::Text)
    }
}

/// Interaction reported by an open prompt surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// The text (or picker filter) changed to the given value.
    Changed(String),
    /// Picker highlight moved; indices into the view's items.
    ActiveChanged(Vec<usize>),
    /// Picker selection changed; indices into the view's items.
    SelectionChanged(Vec<usize>),
    /// Primary confirm gesture (Enter).
    Accept,
    /// A navigation button was triggered.
    Button(NavButton),
    /// The prompt was dismissed or lost focus.
    Hide,
}

/// A rendered prompt owned by the host UI layer.
pub trait PromptSurface {
    /// Blocks until the user does something the session must react to.
    fn next_event(&mut self) -> io::Result<PromptEvent>;

    /// Shows or clears the inline validation message of a text prompt.
    fn show_validation(&mut self, message: Option<&str>) -> io::Result<()>;

    /// Reflects the session's filtered highlight and selection.
    fn sync_items(&mut self, active: &[usize], selected: &[usize]) -> io::Result<()>;

    /// Releases the underlying UI resource.
    fn dispose(&mut self);
}

/// Factory for prompt surfaces (terminal, scripted, ...).
pub trait PromptHost {
    fn open<'a>(&'a mut self, view: &PromptView) -> io::Result<Box<dyn PromptSurface + 'a>>;
}

struct OpenSession<'a> {
    surface: Box<dyn PromptSurface + 'a>,
}

impl Drop for OpenSession<'_> {
    fn drop(&mut self) {
        self.surface.dispose();
    }
}

/// Opens `request` on `host` and waits for its single outcome.
///
/// Validation failures keep the prompt open. The `Back` button resolves to
/// [`PromptOutcome::SteppedBack`]; the `Cancel` button and dismissal resolve
/// to [`PromptOutcome::Abandoned`]. Buttons that are not active on the
/// prompt are ignored.
pub fn show_box(
    host: &mut dyn PromptHost,
    request: &PromptRequest,
) -> Result<PromptOutcome, InquiryError> {
    let view = PromptView::from_request(request);
    debug!(title = %view.title, kind = view.kind.name(), "opening prompt");
    let mut session = OpenSession {
        surface: host.open(&view)?,
    };

    let outcome = match request {
        PromptRequest::Text(text) => run_text(&mut session, text, &view),
        PromptRequest::Single(pick) => run_pick(&mut session, pick, &view, false),
        PromptRequest::Multi(pick) => run_pick(&mut session, pick, &view, true),
    };
    if let Ok(resolved) = &outcome {
        debug!(title = %view.title, outcome = outcome_label(resolved), "prompt resolved");
    }
    outcome
}

fn run_text(
    session: &mut OpenSession<'_>,
    text: &TextPrompt,
    view: &PromptView,
) -> Result<PromptOutcome, InquiryError> {
    let mut value = view.value.clone();
    loop {
        match session.surface.next_event()? {
            PromptEvent::Changed(next) => {
                value = next;
                let failure = text.validator.validate(&value).err();
                session
                    .surface
                    .show_validation(failure.as_ref().map(|err| err.message.as_str()))?;
            }
            PromptEvent::Button(button) if !view.buttons.contains(&button) => {
                trace!(?button, "ignoring inactive button");
            }
            PromptEvent::Accept
            | PromptEvent::Button(NavButton::Proceed)
            | PromptEvent::Button(NavButton::Confirm) => {
                match text.validator.validate(&value) {
                    Ok(()) => return Ok(PromptOutcome::Produced(Response::Text(value))),
                    Err(err) => session.surface.show_validation(Some(&err.message))?,
                }
            }
            PromptEvent::Button(NavButton::Back) => return Ok(PromptOutcome::SteppedBack),
            PromptEvent::Button(NavButton::Cancel) | PromptEvent::Hide => {
                return Ok(PromptOutcome::Abandoned)
            }
            PromptEvent::ActiveChanged(_) | PromptEvent::SelectionChanged(_) => {}
        }
    }
}

fn run_pick(
    session: &mut OpenSession<'_>,
    pick: &PickPrompt,
    view: &PromptView,
    multi: bool,
) -> Result<PromptOutcome, InquiryError> {
    let mut active = view.active.clone();
    let mut selected = view.selected.clone();
    loop {
        match session.surface.next_event()? {
            PromptEvent::ActiveChanged(indices) => {
                active = enabled_only(pick, indices);
                session.surface.sync_items(&active, &selected)?;
            }
            PromptEvent::SelectionChanged(indices) => {
                selected = enabled_only(pick, indices);
                session.surface.sync_items(&active, &selected)?;
            }
            PromptEvent::Button(button) if !view.buttons.contains(&button) => {
                trace!(?button, "ignoring inactive button");
            }
            PromptEvent::Accept
            | PromptEvent::Button(NavButton::Proceed)
            | PromptEvent::Button(NavButton::Confirm) => {
                return resolve_pick(pick, view, &active, &selected, multi);
            }
            PromptEvent::Button(NavButton::Back) => return Ok(PromptOutcome::SteppedBack),
            PromptEvent::Button(NavButton::Cancel) | PromptEvent::Hide => {
                return Ok(PromptOutcome::Abandoned)
            }
            PromptEvent::Changed(_) => {}
        }
    }
}

fn resolve_pick(
    pick: &PickPrompt,
    view: &PromptView,
    active: &[usize],
    selected: &[usize],
    multi: bool,
) -> Result<PromptOutcome, InquiryError> {
    if multi {
        let items = selected
            .iter()
            .filter_map(|index| pick.items.get(*index).cloned())
            .collect();
        return Ok(PromptOutcome::Produced(Response::Items(items)));
    }
    selected
        .first()
        .or_else(|| active.first())
        .and_then(|index| pick.items.get(*index))
        .map(|item| PromptOutcome::Produced(Response::Item(item.clone())))
        .ok_or_else(|| InquiryError::EmptySelection(view.title.clone()))
}

fn enabled_only(pick: &PickPrompt, indices: Vec<usize>) -> Vec<usize> {
    indices
        .into_iter()
        .filter(|index| pick.items.get(*index).is_some_and(|item| !item.disabled))
        .collect()
}

fn first_enabled(pick: &PickPrompt) -> Option<usize> {
    pick.items.iter().position(|item| !item.disabled)
}

fn outcome_label(outcome: &PromptOutcome) -> &'static str {
    match outcome {
        PromptOutcome::Produced(_) => "produced",
        PromptOutcome::SteppedBack => "back",
        PromptOutcome::Abandoned => "abandoned",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::test_mode::{ScriptedHost, ScriptedSession};
    use crate::inquiry::prompts::{PromptChrome, Validator};

    fn text_request(validator: Validator) -> PromptRequest {
        PromptRequest::Text(
            TextPrompt::new(PromptChrome::titled("subject").with_progress(2, 3))
                .with_validator(validator),
        )
    }

    fn pick_items() -> Vec<PickItem> {
        vec![
            PickItem::new("feat", "feat"),
            PickItem::new("fix", "fix"),
            PickItem::new("legacy", "legacy").disabled(),
        ]
    }

    #[test]
    fn text_accept_resolves_current_value() {
        let mut host = ScriptedHost::new(vec![ScriptedSession::typed("add x")]);
        let outcome = show_box(&mut host, &text_request(Validator::None)).unwrap();
        assert_eq!(outcome, PromptOutcome::Produced(Response::Text("add x".into())));
        assert_eq!(host.disposed(), 1);
    }

    #[test]
    fn failed_validation_keeps_prompt_open() {
        let mut host = ScriptedHost::new(vec![ScriptedSession::new(vec![
            PromptEvent::Accept,
            PromptEvent::Changed("ok".into()),
            PromptEvent::Accept,
        ])]);
        let outcome = show_box(&mut host, &text_request(Validator::NonEmpty)).unwrap();

        assert_eq!(outcome, PromptOutcome::Produced(Response::Text("ok".into())));
        assert_eq!(
            host.validation_messages(),
            &[Some("Value cannot be empty".to_string()), None]
        );
    }

    #[test]
    fn back_skips_validation_and_hide_abandons() {
        let mut host = ScriptedHost::new(vec![
            ScriptedSession::new(vec![PromptEvent::Button(NavButton::Back)]),
            ScriptedSession::new(vec![PromptEvent::Hide]),
        ]);
        let request = text_request(Validator::NonEmpty);

        assert_eq!(show_box(&mut host, &request).unwrap(), PromptOutcome::SteppedBack);
        assert_eq!(show_box(&mut host, &request).unwrap(), PromptOutcome::Abandoned);
        assert_eq!(host.disposed(), 2);
    }

    #[test]
    fn inactive_back_button_is_ignored_on_first_step() {
        let request = PromptRequest::Text(TextPrompt::new(
            PromptChrome::titled("type").with_progress(1, 3),
        ));
        let mut host = ScriptedHost::new(vec![ScriptedSession::new(vec![
            PromptEvent::Button(NavButton::Back),
            PromptEvent::Changed("feat".into()),
            PromptEvent::Button(NavButton::Proceed),
        ])]);

        let outcome = show_box(&mut host, &request).unwrap();
        assert_eq!(outcome, PromptOutcome::Produced(Response::Text("feat".into())));
    }

    #[test]
    fn single_pick_prefers_selection_then_active() {
        let request = PromptRequest::Single(PickPrompt::new(
            PromptChrome::titled("type"),
            pick_items(),
        ));
        let mut host = ScriptedHost::new(vec![
            ScriptedSession::new(vec![PromptEvent::Accept]),
            ScriptedSession::new(vec![
                PromptEvent::ActiveChanged(vec![1]),
                PromptEvent::Accept,
            ]),
            ScriptedSession::new(vec![
                PromptEvent::ActiveChanged(vec![0]),
                PromptEvent::SelectionChanged(vec![1]),
                PromptEvent::Accept,
            ]),
        ]);

        let first = show_box(&mut host, &request).unwrap();
        assert_eq!(first, PromptOutcome::Produced(Response::Item(pick_items()[0].clone())));
        let second = show_box(&mut host, &request).unwrap();
        assert_eq!(second, PromptOutcome::Produced(Response::Item(pick_items()[1].clone())));
        let third = show_box(&mut host, &request).unwrap();
        assert_eq!(third, PromptOutcome::Produced(Response::Item(pick_items()[1].clone())));
    }

    #[test]
    fn disabled_items_never_become_active() {
        let request = PromptRequest::Single(
            PickPrompt::new(PromptChrome::titled("type"), pick_items())
                .with_active(Vec::new()),
        );
        let mut host = ScriptedHost::new(vec![ScriptedSession::new(vec![
            PromptEvent::ActiveChanged(vec![2]),
            PromptEvent::Accept,
        ])]);

        let err = show_box(&mut host, &request).unwrap_err();
        assert!(matches!(err, InquiryError::EmptySelection(title) if title == "type"));
        assert_eq!(host.disposed(), 1);
    }

    #[test]
    fn multi_pick_returns_selected_items() {
        let request = PromptRequest::Multi(PickPrompt::new(
            PromptChrome::titled("tags"),
            pick_items(),
        ));
        let mut host = ScriptedHost::new(vec![ScriptedSession::new(vec![
            PromptEvent::SelectionChanged(vec![0, 1, 2]),
            PromptEvent::Accept,
        ])]);

        let outcome = show_box(&mut host, &request).unwrap();
        assert_eq!(
            outcome,
            PromptOutcome::Produced(Response::Items(vec![
                pick_items()[0].clone(),
                pick_items()[1].clone()
            ]))
        );
    }

    #[test]
    fn view_defaults_active_to_first_enabled_item() {
        let mut items = pick_items();
        items[0].disabled = true;
        let request = PromptRequest::Single(PickPrompt::new(PromptChrome::default(), items));
        let view = PromptView::from_request(&request);
        assert_eq!(view.active, vec![1]);
        assert!(view.is_picker());
    }
}
