//! Per-run diagnostic messages, partitioned into a closed set of categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::TestResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Flake,
    Info,
    Warning,
    Error,
}

impl MessageKind {
    /// Display order: flakes first, they explain the status.
    pub const ALL: [MessageKind; 4] = [
        MessageKind::Flake,
        MessageKind::Info,
        MessageKind::Warning,
        MessageKind::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flake => "flake",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

static NO_MESSAGES: BTreeMap<String, String> = BTreeMap::new();

impl TestResult {
    /// Messages of one category, keyed by message key. Empty map when the
    /// category is absent.
    pub fn messages_of(&self, kind: MessageKind) -> &BTreeMap<String, String> {
        self.messages.get(&kind).unwrap_or(&NO_MESSAGES)
    }

    pub fn flake_messages(&self) -> impl Iterator<Item = &str> {
        self.messages_of(MessageKind::Flake)
            .values()
            .map(String::as_str)
    }

    /// A run is a known flake iff it carries flake messages. The standalone
    /// `flake_failure` flag does not participate.
    pub fn is_known_flake(&self) -> bool {
        !self.messages_of(MessageKind::Flake).is_empty()
    }
}
