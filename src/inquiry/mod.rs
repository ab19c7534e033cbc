//! The multi-step inquiry engine: prompt sessions, prompt-backed steps and
//! the driver that walks them.

pub mod driver;
pub mod prompts;
pub mod record;
pub mod session;
pub mod step;

pub use driver::{loop_inquiry, LoopOptions, WizardOutcome};
pub use prompts::{
    NavButton, PickItem, PickPrompt, PromptChrome, PromptKind, PromptOutcome, PromptRequest,
    Response, TextPrompt, ValidationError, Validator,
};
pub use record::{Answer, AnswerRecord};
pub use session::{show_box, PromptEvent, PromptHost, PromptSurface, PromptView};
pub use step::{create_inquiry_item, InquiryItem, Navigation, Step, StepContext, StepKey};
