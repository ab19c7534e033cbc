//! The wizard driver: runs steps in order, following each step's
//! navigation signal, until the cursor leaves the step list.

use tracing::{debug, info};

use crate::errors::InquiryError;
use crate::inquiry::record::AnswerRecord;
use crate::inquiry::session::PromptHost;
use crate::inquiry::step::{Navigation, Step, StepContext, StepKey};

/// Result of one wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome<K> {
    /// The cursor moved past the last step.
    Completed(AnswerRecord<K>),
    /// A step aborted, or the top-level cursor moved before the first step.
    Cancelled,
    /// A nested run moved before its first step; its answers were merged
    /// into the parent record.
    SteppedOut,
}

impl<K> WizardOutcome<K> {
    pub fn completed(self) -> Option<AnswerRecord<K>> {
        match self {
            WizardOutcome::Completed(record) => Some(record),
            _ => None,
        }
    }

    /// Transforms the record of a completed run; other outcomes pass through.
    pub fn map_completed(self, f: impl FnOnce(AnswerRecord<K>) -> AnswerRecord<K>) -> Self {
        match self {
            WizardOutcome::Completed(record) => WizardOutcome::Completed(f(record)),
            other => other,
        }
    }
}

/// Starting point of a run.
pub struct LoopOptions<'p, K> {
    /// Index of the first step to visit.
    pub index: usize,
    /// Answers shown to steps that have no local answer yet.
    pub seed: Option<AnswerRecord<K>>,
    /// Record that receives the local answers when a nested run steps out.
    pub parent: Option<&'p mut AnswerRecord<K>>,
}

impl<K> Default for LoopOptions<'_, K> {
    fn default() -> Self {
        Self {
            index: 0,
            seed: None,
            parent: None,
        }
    }
}

impl<'p, K: Clone + PartialEq> LoopOptions<'p, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn seeded(mut self, seed: AnswerRecord<K>) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Options for a sub-wizard started from inside a step: the parent
    /// record seeds the run and receives its answers on step-out.
    pub fn nested(parent: &'p mut AnswerRecord<K>) -> Self {
        Self {
            index: 0,
            seed: Some(parent.clone()),
            parent: Some(parent),
        }
    }
}

/// Runs `steps` against `host`.
///
/// Each visit seeds the local record from `options.seed` when the step key
/// has no local answer yet, so a step revisited after going back shows what
/// was entered before. Only host failures and misconfigured steps produce
/// `Err`; user cancellation is [`WizardOutcome::Cancelled`].
pub fn loop_inquiry<K: StepKey>(
    steps: &[Step<K>],
    host: &mut dyn PromptHost,
    options: LoopOptions<'_, K>,
) -> Result<WizardOutcome<K>, InquiryError> {
    let LoopOptions {
        index,
        seed,
        mut parent,
    } = options;
    let mut record = AnswerRecord::new();
    let mut cursor = index as isize;
    let total = steps.len() as isize;

    while cursor < total {
        if cursor < 0 {
            return Ok(match parent.as_deref_mut() {
                Some(parent) => {
                    parent.extend(&record);
                    debug!(answers = record.len(), "stepped out of nested wizard");
                    WizardOutcome::SteppedOut
                }
                None => {
                    info!("Operation cancelled");
                    WizardOutcome::Cancelled
                }
            });
        }

        let index = cursor as usize;
        let step = &steps[index];
        if let Some(seed) = &seed {
            if !record.contains_key(step.key()) {
                if let Some(previous) = seed.get(step.key()) {
                    record.insert(step.key().clone(), previous.clone());
                }
            }
        }

        let mut context = StepContext {
            key: step.key(),
            record: &mut record,
            steps,
            index,
            host: &mut *host,
        };
        let signal = step.run(&mut context)?;
        debug!(step = %step.key(), index, ?signal, "step finished");

        cursor = match signal {
            Navigation::Advance => cursor + 1,
            Navigation::Retreat => cursor - 1,
            Navigation::JumpBy(delta) => cursor + delta,
            Navigation::Abort(reason) => {
                info!("{}", reason.as_deref().unwrap_or("Operation cancelled"));
                return Ok(WizardOutcome::Cancelled);
            }
        };
    }

    debug!(answers = record.len(), "wizard completed");
    Ok(WizardOutcome::Completed(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::test_mode::{ScriptedHost, ScriptedSession};
    use crate::inquiry::prompts::{NavButton, PromptChrome, PromptKind, PromptRequest, TextPrompt};
    use crate::inquiry::record::Answer;
    use crate::inquiry::step::create_inquiry_item;

    fn steps_with_back(keys: &[&'static str]) -> Vec<Step<&'static str>> {
        keys.iter()
            .map(|key| {
                let chrome = PromptChrome::default()
                    .with_buttons(vec![NavButton::Back, NavButton::Proceed]);
                create_inquiry_item(PromptKind::Text, *key)
                    .options(PromptRequest::Text(TextPrompt::new(chrome)))
                    .build()
            })
            .collect()
    }

    fn text_steps(keys: &[&'static str]) -> Vec<Step<&'static str>> {
        keys.iter()
            .map(|key| create_inquiry_item(PromptKind::Text, *key).build())
            .collect()
    }

    #[test]
    fn empty_step_list_completes_without_prompting() {
        let mut host = ScriptedHost::new(Vec::new());
        let outcome = loop_inquiry::<&str>(&[], &mut host, LoopOptions::new()).unwrap();
        assert_eq!(outcome, WizardOutcome::Completed(AnswerRecord::new()));
        assert!(host.views().is_empty());
    }

    #[test]
    fn start_index_past_end_completes_immediately() {
        let steps = text_steps(&["a"]);
        let mut host = ScriptedHost::new(Vec::new());
        let outcome = loop_inquiry(&steps, &mut host, LoopOptions::new().starting_at(3)).unwrap();
        assert_eq!(outcome, WizardOutcome::Completed(AnswerRecord::new()));
    }

    #[test]
    fn raw_steps_drive_the_cursor() {
        let steps = vec![
            Step::new("skip", |_ctx| Ok(Navigation::JumpBy(2))),
            Step::new("never", |_ctx| Ok(Navigation::abort("unreachable"))),
            Step::new("last", |ctx| {
                ctx.record.insert(*ctx.key, format!("{}/{}", ctx.index, ctx.steps.len()));
                Ok(Navigation::Advance)
            }),
        ];
        let mut host = ScriptedHost::new(Vec::new());
        let record = loop_inquiry(&steps, &mut host, LoopOptions::new())
            .unwrap()
            .completed()
            .unwrap();
        assert_eq!(record.get_text(&"last"), Some("2/3"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn retreat_before_first_step_cancels_top_level() {
        let steps = vec![Step::new("a", |_ctx| Ok(Navigation::Retreat))];
        let mut host = ScriptedHost::new(Vec::new());
        let outcome = loop_inquiry(&steps, &mut host, LoopOptions::new()).unwrap();
        assert_eq!(outcome, WizardOutcome::Cancelled);
    }

    #[test]
    fn abandoning_a_prompt_cancels_the_run() {
        let steps = text_steps(&["a", "b"]);
        let mut host = ScriptedHost::new(vec![
            ScriptedSession::typed("one"),
            ScriptedSession::new(vec![crate::inquiry::session::PromptEvent::Hide]),
        ]);
        let outcome = loop_inquiry(&steps, &mut host, LoopOptions::new()).unwrap();
        assert_eq!(outcome, WizardOutcome::Cancelled);
        assert_eq!(host.disposed(), 2);
    }

    #[test]
    fn nested_step_out_merges_into_parent() {
        let steps = steps_with_back(&["x", "y"]);
        let mut parent = AnswerRecord::new();
        parent.insert("outer", "kept");
        let mut host = ScriptedHost::new(vec![
            ScriptedSession::typed("first"),
            ScriptedSession::back(),
            ScriptedSession::back(),
        ]);

        let outcome = loop_inquiry(&steps, &mut host, LoopOptions::nested(&mut parent)).unwrap();

        assert_eq!(outcome, WizardOutcome::SteppedOut);
        assert_eq!(parent.get_text(&"outer"), Some("kept"));
        assert_eq!(parent.get_text(&"x"), Some("first"));
        assert!(!parent.contains_key(&"y"));
    }

    #[test]
    fn seed_prefills_without_overriding_fresh_answers() {
        let steps = text_steps(&["a", "b"]);
        let seed: AnswerRecord<&str> = [("a", Answer::from("seeded"))].into_iter().collect();
        let mut host = ScriptedHost::new(vec![
            ScriptedSession::typed("edited"),
            ScriptedSession::back(),
            ScriptedSession::new(vec![crate::inquiry::session::PromptEvent::Accept]),
            ScriptedSession::typed("b"),
        ]);

        let record = loop_inquiry(&steps, &mut host, LoopOptions::new().seeded(seed))
            .unwrap()
            .completed()
            .unwrap();

        assert_eq!(host.views()[0].value, "seeded");
        assert_eq!(host.views()[2].value, "edited");
        assert_eq!(record.get_text(&"a"), Some("edited"));
    }
}
