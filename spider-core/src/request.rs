//! Request tokens and view load state.

use serde::{Deserialize, Serialize};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing tokens so late responses from
/// superseded requests can be dropped.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Returns the value only when `token` is still the latest request.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_current(token) {
            Some(value)
        } else {
            tracing::debug!(
                token = token.0,
                latest = self.latest,
                "dropping stale response"
            );
            None
        }
    }
}

/// How a view renders a failed fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePresentation {
    ShowError,
    TreatAsEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Error message to display, if the presentation surfaces errors.
    pub fn visible_error(&self, presentation: FailurePresentation) -> Option<&str> {
        match (self, presentation) {
            (LoadState::Failed(message), FailurePresentation::ShowError) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// Items to render; failures shown as empty yield an empty slice.
    pub fn items(&self, presentation: FailurePresentation) -> Option<&[T]> {
        match (self, presentation) {
            (LoadState::Loaded(items), _) => Some(items.as_slice()),
            (LoadState::Failed(_), FailurePresentation::TreatAsEmpty) => Some(&[][..]),
            _ => None,
        }
    }
}
