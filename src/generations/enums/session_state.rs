use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Submitted,
    Polling,
    Completed,
    Errored,
}

impl SessionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitted | Self::Polling)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Errored)
    }
}
