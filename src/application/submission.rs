//! # Sound Submission Workflow
//!
//! Guided conversation that collects an audio attachment, a description and tags,
//! then hands the result to the catalog.
//!
//! Only one submission runs at a time. The session is bound to the user and room
//! that started it: messages from anyone else, or from another room, are never
//! routed here (see [`SubmissionWorkflow::accepts`]).

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::types::{AudioRef, InboundMessage, SoundSubmission};
use crate::strings::messages;

/// Verbatim text that aborts a running submission.
pub const CANCEL_TOKEN: &str = "cancel";

pub const TEXT_LENGTH: std::ops::RangeInclusive<usize> = 5..=200;
pub const TAGS_LENGTH: std::ops::RangeInclusive<usize> = 3..=100;

static FILE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z-]+\.ogg$").expect("valid file name pattern"));

/// Owner and room a session is bound to. Holding a matching pair is required to drive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub owner: String,
    pub location: String,
}

impl SessionToken {
    pub fn new(owner: &str, location: &str) -> Self {
        Self {
            owner: owner.to_string(),
            location: location.to_string(),
        }
    }

    pub fn matches(&self, message: &InboundMessage) -> bool {
        self.owner == message.sender && self.location == message.room_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    AwaitAudio {
        token: SessionToken,
    },
    AwaitText {
        token: SessionToken,
        audio: AudioRef,
    },
    AwaitTags {
        token: SessionToken,
        audio: AudioRef,
        description: String,
    },
}

impl SubmissionState {
    fn token(&self) -> Option<&SessionToken> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::AwaitAudio { token }
            | SubmissionState::AwaitText { token, .. }
            | SubmissionState::AwaitTags { token, .. } => Some(token),
        }
    }
}

/// What the router should do after a message was fed to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Message did not belong to the session; no reply.
    Ignored,
    /// Reply and keep waiting (either the next step or a retry of the current one).
    Prompt(&'static str),
    /// Session was reset; reply with the notice.
    Abandoned(&'static str),
    /// All data collected and the session reset. Commit it.
    Complete(SoundSubmission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginError {
    AlreadyActive,
}

#[derive(Debug, Default)]
pub struct SubmissionWorkflow {
    state: SubmissionState,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SubmissionState::Idle
    }

    /// Whether `message` belongs to the running session. Always false while idle.
    pub fn accepts(&self, message: &InboundMessage) -> bool {
        self.state.token().is_some_and(|t| t.matches(message))
    }

    /// Starts a session bound to `owner` in `location`.
    pub fn begin(&mut self, owner: &str, location: &str) -> Result<&'static str, BeginError> {
        if self.is_active() {
            return Err(BeginError::AlreadyActive);
        }
        tracing::info!("Submission started by {} in {}", owner, location);
        self.state = SubmissionState::AwaitAudio {
            token: SessionToken::new(owner, location),
        };
        Ok(messages::SUBMISSION_START)
    }

    fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    fn abandon(&mut self, notice: &'static str) -> StepOutcome {
        tracing::info!("Submission abandoned");
        self.reset();
        StepOutcome::Abandoned(notice)
    }

    /// Feeds one message to the current step.
    pub fn advance(&mut self, message: &InboundMessage) -> StepOutcome {
        if !self.accepts(message) {
            return StepOutcome::Ignored;
        }
        if message.body == CANCEL_TOKEN {
            return self.abandon(messages::SUBMISSION_ABANDONED);
        }

        match std::mem::take(&mut self.state) {
            SubmissionState::AwaitAudio { token } => match message.attachments.as_slice() {
                [] => self.abandon(messages::SUBMISSION_ABANDONED),
                [attachment] if is_valid_file_name(&attachment.file_name) => {
                    self.state = SubmissionState::AwaitText {
                        token,
                        audio: AudioRef {
                            media: attachment.media.clone(),
                            file_name: attachment.file_name.clone(),
                        },
                    };
                    StepOutcome::Prompt(messages::SUBMISSION_ASK_TEXT)
                }
                _ => self.abandon(messages::SUBMISSION_BAD_FILE),
            },
            SubmissionState::AwaitText { token, audio } => {
                if TEXT_LENGTH.contains(&message.body.chars().count()) {
                    self.state = SubmissionState::AwaitTags {
                        token,
                        audio,
                        description: message.body.clone(),
                    };
                    StepOutcome::Prompt(messages::SUBMISSION_ASK_TAGS)
                } else {
                    self.state = SubmissionState::AwaitText { token, audio };
                    StepOutcome::Prompt(messages::SUBMISSION_TEXT_LENGTH)
                }
            }
            SubmissionState::AwaitTags {
                token,
                audio,
                description,
            } => {
                if TAGS_LENGTH.contains(&message.body.chars().count()) {
                    // Session is already reset by the take above.
                    StepOutcome::Complete(SoundSubmission {
                        audio,
                        description,
                        tags: message.body.clone(),
                    })
                } else {
                    self.state = SubmissionState::AwaitTags {
                        token,
                        audio,
                        description,
                    };
                    StepOutcome::Prompt(messages::SUBMISSION_TAGS_LENGTH)
                }
            }
            SubmissionState::Idle => self.abandon(messages::SUBMISSION_ABANDONED),
        }
    }
}

/// Letters and hyphens only, `.ogg` extension, any case.
pub fn is_valid_file_name(file_name: &str) -> bool {
    FILE_NAME_PATTERN.is_match(file_name)
}
