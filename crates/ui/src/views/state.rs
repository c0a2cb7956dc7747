use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Sets or historical results could not be fetched.
    DataUnavailable { details: String },
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => "Error Loading Data",
            Self::Unknown => "Something went wrong",
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::DataUnavailable { .. } => {
                "Could not load the practice sets. Check the web app URL and that the \
                 sheet script is deployed, then restart the app."
            }
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Underlying failure text, when there is one worth showing.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::DataUnavailable { details } => Some(details),
            Self::Unknown => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
