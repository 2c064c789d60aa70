use atmo_core::{WeatherFetchError, WeatherSnapshot};

/// What the screen currently shows.
///
/// A failed refresh keeps the last good snapshot so the display never blanks.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(WeatherSnapshot),
    Failed {
        message: String,
        stale: Option<WeatherSnapshot>,
    },
}

impl ViewState {
    /// Fold the outcome of one fetch into the current state.
    pub fn apply(self, outcome: Result<WeatherSnapshot, WeatherFetchError>) -> Self {
        match outcome {
            Ok(snapshot) => ViewState::Ready(snapshot),
            Err(err) => ViewState::Failed { message: err.to_string(), stale: self.into_snapshot() },
        }
    }

    /// Snapshot to render, fresh or stale.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(snapshot) => Some(snapshot),
            ViewState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_snapshot(self) -> Option<WeatherSnapshot> {
        match self {
            ViewState::Loading => None,
            ViewState::Ready(snapshot) => Some(snapshot),
            ViewState::Failed { stale, .. } => stale,
        }
    }
}
