//! Steps and the step factory.
//!
//! A [`Step`] pairs a key with a handler that returns a [`Navigation`]
//! signal. Most steps are built with [`create_inquiry_item`], which binds a
//! prompt definition to the answer record: it resolves the prompt
//! configuration for the current visit, seeds the previous answer, runs the
//! prompt and either stores the result or hands the outcome to a custom
//! interpreter.

use std::fmt;
use std::rc::Rc;

use crate::errors::InquiryError;
use crate::inquiry::prompts::{PromptChrome, PromptKind, PromptOutcome, PromptRequest, Response};
use crate::inquiry::record::{Answer, AnswerRecord};
use crate::inquiry::session::{show_box, PromptHost};

/// Requirements on step keys.
pub trait StepKey: Clone + PartialEq + fmt::Display + fmt::Debug + 'static {}

impl<T> StepKey for T where T: Clone + PartialEq + fmt::Display + fmt::Debug + 'static {}

/// How the driver should move its cursor after a step ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Move to the next step.
    Advance,
    /// Move to the previous step.
    Retreat,
    /// Move the cursor by a signed delta; `JumpBy(0)` repeats the step.
    JumpBy(isize),
    /// End the whole wizard without a result, optionally with a reason.
    Abort(Option<String>),
}

impl Navigation {
    pub fn abort(reason: impl Into<String>) -> Self {
        Navigation::Abort(Some(reason.into()))
    }
}

/// Everything a step handler can see and touch during one visit.
pub struct StepContext<'a, K> {
    pub key: &'a K,
    pub record: &'a mut AnswerRecord<K>,
    pub steps: &'a [Step<K>],
    pub index: usize,
    pub host: &'a mut dyn PromptHost,
}

type StepHandler<K> = Rc<dyn Fn(&mut StepContext<'_, K>) -> Result<Navigation, InquiryError>>;

/// One unit of a wizard.
pub struct Step<K> {
    key: K,
    handler: StepHandler<K>,
}

impl<K: Clone> Clone for Step<K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Step<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("key", &self.key).finish()
    }
}

impl<K: StepKey> Step<K> {
    /// Builds a step from a raw handler, bypassing the prompt plumbing.
    pub fn new<F>(key: K, handler: F) -> Self
    where
        F: Fn(&mut StepContext<'_, K>) -> Result<Navigation, InquiryError> + 'static,
    {
        Self {
            key,
            handler: Rc::new(handler),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn run(&self, context: &mut StepContext<'_, K>) -> Result<Navigation, InquiryError> {
        (self.handler)(context)
    }
}

type Resolver<K> =
    Rc<dyn Fn(PromptRequest, &StepContext<'_, K>) -> Result<PromptRequest, InquiryError>>;
type ValueFormatter = Rc<dyn Fn(&PromptRequest, &Response) -> Answer>;
type Interpreter<K> = Rc<
    dyn Fn(&mut StepContext<'_, K>, &PromptRequest, PromptOutcome) -> Result<Navigation, InquiryError>,
>;

enum ConfigSource<K> {
    Baseline,
    Static(PromptRequest),
    Dynamic(Resolver<K>),
}

/// Builder returned by [`create_inquiry_item`].
pub struct InquiryItem<K> {
    key: K,
    kind: PromptKind,
    source: ConfigSource<K>,
    default: Option<Answer>,
    format: Option<ValueFormatter>,
    interpret: Option<Interpreter<K>>,
}

/// Starts a prompt-backed step of `kind` stored under `key`.
pub fn create_inquiry_item<K: StepKey>(kind: PromptKind, key: K) -> InquiryItem<K> {
    InquiryItem {
        key,
        kind,
        source: ConfigSource::Baseline,
        default: None,
        format: None,
        interpret: None,
    }
}

impl<K: StepKey> InquiryItem<K> {
    /// Uses a fixed configuration on every visit.
    pub fn options(mut self, request: PromptRequest) -> Self {
        self.source = ConfigSource::Static(request);
        self
    }

    /// Computes the configuration on every visit. The resolver receives a
    /// blank request carrying the baseline chrome and the current context.
    pub fn resolve_with<F>(mut self, resolver: F) -> Self
    where
        F: Fn(PromptRequest, &StepContext<'_, K>) -> Result<PromptRequest, InquiryError> + 'static,
    {
        self.source = ConfigSource::Dynamic(Rc::new(resolver));
        self
    }

    /// Value shown when the record has no entry for this key yet.
    pub fn default_value(mut self, value: impl Into<Answer>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Converts a produced response into the stored answer.
    pub fn format_with<F>(mut self, format: F) -> Self
    where
        F: Fn(&PromptRequest, &Response) -> Answer + 'static,
    {
        self.format = Some(Rc::new(format));
        self
    }

    /// Takes over outcome handling entirely; the returned signal is passed
    /// to the driver verbatim.
    pub fn interpret_with<F>(mut self, interpret: F) -> Self
    where
        F: Fn(&mut StepContext<'_, K>, &PromptRequest, PromptOutcome) -> Result<Navigation, InquiryError>
            + 'static,
    {
        self.interpret = Some(Rc::new(interpret));
        self
    }

    pub fn build(self) -> Step<K> {
        let InquiryItem {
            key,
            kind,
            source,
            default,
            format,
            interpret,
        } = self;

        Step::new(key, move |ctx| {
            let baseline = PromptChrome::titled(format!("Enter {}", ctx.key))
                .with_progress(ctx.index + 1, ctx.steps.len());
            let mut request = match &source {
                ConfigSource::Baseline => PromptRequest::blank(kind, PromptChrome::default()),
                ConfigSource::Static(request) => request.clone(),
                ConfigSource::Dynamic(resolver) => {
                    resolver(PromptRequest::blank(kind, baseline.clone()), ctx)?
                }
            };
            if request.kind() != kind {
                return Err(InquiryError::KindMismatch {
                    key: ctx.key.to_string(),
                    expected: kind.name(),
                    found: request.kind().name(),
                });
            }
            request.chrome_mut().fill_from(&baseline);

            let seed = ctx.record.get(ctx.key).cloned().or_else(|| default.clone());
            seed_request(&mut request, seed.as_ref());

            let outcome = show_box(&mut *ctx.host, &request)?;
            if let Some(interpret) = &interpret {
                return interpret(ctx, &request, outcome);
            }

            match outcome {
                PromptOutcome::Produced(response) => {
                    let answer = match &format {
                        Some(format) => format(&request, &response),
                        None => plain_answer(&response),
                    };
                    ctx.record.insert(ctx.key.clone(), answer);
                    Ok(Navigation::Advance)
                }
                PromptOutcome::SteppedBack => Ok(Navigation::Retreat),
                PromptOutcome::Abandoned => Ok(Navigation::Abort(None)),
            }
        })
    }
}

/// Applies the previous answer (or the step default) to the request.
fn seed_request(request: &mut PromptRequest, seed: Option<&Answer>) {
    match request {
        PromptRequest::Text(text) => {
            if let Some(answer) = seed {
                text.value = Some(answer.to_string());
            }
        }
        PromptRequest::Single(pick) | PromptRequest::Multi(pick) => {
            let matched: Vec<String> = pick
                .items
                .iter()
                .filter(|item| !item.disabled && seed.is_some_and(|answer| answer.matches(&item.value)))
                .map(|item| item.value.clone())
                .collect();
            if pick.selected.is_none() && matches!(seed, Some(Answer::List(_))) {
                pick.selected = Some(matched.clone());
            }
            if pick.active.is_none() {
                pick.active = Some(if matched.is_empty() {
                    pick.items
                        .iter()
                        .find(|item| !item.disabled)
                        .map(|item| vec![item.value.clone()])
                        .unwrap_or_default()
                } else {
                    matched
                });
            }
        }
    }
}

fn plain_answer(response: &Response) -> Answer {
    match response {
        Response::Text(text) => Answer::Text(text.clone()),
        Response::Item(item) => Answer::Text(item.value.clone()),
        Response::Items(items) => Answer::List(items.iter().map(|item| item.value.clone()).collect()),
    }
}
