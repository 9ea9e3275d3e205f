use serde::{Deserialize, Serialize};

/// Category used when the caller never picked one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Selectable faith lenses, in picker order.
pub const FAITH_CATEGORIES: [&str; 7] = [
    "🙏 Hinduism",
    "☪️ Islam",
    "✝️ Christianity",
    "🪯 Sikhism",
    "☸️ Buddhism",
    "🕉️ Jainism",
    "🌍 Other",
];

/// Decorative markers cycled over the option list by position.
pub const OPTION_MARKERS: [&str; 8] = ["✨", "🔥", "🌿", "💡", "🌸", "🌍", "⭐", "🕊️"];

pub const FALLBACK_QUESTION: &str = "No poll question generated";

/// Input to one generation call. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRequest {
    pub headline: String,
    pub details: String,
    pub category: String,
}

impl PollRequest {
    /// An unset or blank category resolves to [`DEFAULT_CATEGORY`] here and nowhere else.
    pub fn new(headline: impl Into<String>, details: impl Into<String>, category: Option<&str>) -> Self {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        Self {
            headline: headline.into(),
            details: details.into(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPoll {
    pub question: String,
    pub options: Vec<String>,
}

impl ParsedPoll {
    pub fn fallback() -> Self {
        Self {
            question: FALLBACK_QUESTION.to_string(),
            options: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.question == FALLBACK_QUESTION && self.options.is_empty()
    }
}

/// One selectable row. `text` is cosmetic; `value` is what gets persisted and compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOption {
    pub text: String,
    pub value: String,
    pub selected: bool,
}

impl DisplayOption {
    pub fn marker_for(index: usize) -> &'static str {
        OPTION_MARKERS[index % OPTION_MARKERS.len()]
    }

    pub fn decorate(index: usize, value: &str) -> Self {
        Self {
            text: format!("{} {}", Self::marker_for(index), value),
            value: value.to_string(),
            selected: false,
        }
    }
}

/// What the UI renders once a generation has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyPoll {
    pub request: PollRequest,
    pub poll: ParsedPoll,
    pub display: Vec<DisplayOption>,
}

impl ReadyPoll {
    pub fn new(request: PollRequest, poll: ParsedPoll) -> Self {
        let display = super::parser::decorate(&poll.options);
        Self { request, poll, display }
    }

    pub fn selected(&self) -> Option<&DisplayOption> {
        self.display.iter().find(|opt| opt.selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollSessionState {
    Idle,
    Generating,
    Ready(ReadyPoll),
    Submitting(ReadyPoll),
    /// The rendered poll stays attached so the UI keeps showing it next to the confirmation.
    Submitted { poll: ReadyPoll, chosen: String },
    /// `poll` is kept when the failure happened during submission, so a retry is possible.
    Failed { reason: String, poll: Option<ReadyPoll> },
}

impl PollSessionState {
    pub fn name(&self) -> &'static str {
        match self {
            PollSessionState::Idle => "Idle",
            PollSessionState::Generating => "Generating",
            PollSessionState::Ready(_) => "Ready",
            PollSessionState::Submitting(_) => "Submitting",
            PollSessionState::Submitted { .. } => "Submitted",
            PollSessionState::Failed { .. } => "Failed",
        }
    }

    /// The poll currently on screen, if any.
    pub fn visible_poll(&self) -> Option<&ReadyPoll> {
        match self {
            PollSessionState::Ready(p) | PollSessionState::Submitting(p) => Some(p),
            PollSessionState::Submitted { poll, .. } => Some(poll),
            PollSessionState::Failed { poll, .. } => poll.as_ref(),
            PollSessionState::Idle | PollSessionState::Generating => None,
        }
    }
}
