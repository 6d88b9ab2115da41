/// Failures the widget absorbs: each one is logged and leaves the widget
/// rendering nothing, never reaching the embedding host.
#[derive(thiserror::Error, Debug)]
pub enum WidgetError {
    #[error("Invalid root element")]
    InvalidRoot,
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("{rated} rated contest(s) found, at least 2 are needed to draw a chart")]
    InsufficientData { rated: usize },
}

/// Failures of the remote history endpoint.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Failed to request the rating history")]
    Request(#[from] reqwest::Error),
    #[error("History endpoint answered with status {0}")]
    Status(u16),
}
