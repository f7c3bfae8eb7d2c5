/// Errors raised while constructing a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The content selector matched no element.
    ContentNotFound(String),
    /// The DOM refused to create an element with this tag.
    ElementCreation(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::ContentNotFound(selector) => {
                write!(f, "No element matches content selector `{}`", selector)
            }
            WindowError::ElementCreation(tag) => {
                write!(f, "Failed to create `<{}>` element", tag)
            }
        }
    }
}

impl std::error::Error for WindowError {}

/// Result type for window construction.
pub type WindowResult<T> = Result<T, WindowError>;
