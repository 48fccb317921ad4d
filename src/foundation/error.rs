/// Convenience result type used across turtlekit.
pub type TurtleResult<T> = Result<T, TurtleError>;

/// Error taxonomy for the I/O edges of the toolkit.
///
/// Drawing and colorspace conversion never fail; only configuration, program
/// parsing, image grabbing and presentation produce errors.
#[derive(thiserror::Error, Debug)]
pub enum TurtleError {
    /// Invalid user-provided configuration or program data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image file requested for grabbing does not exist.
    #[error("file {0} not found")]
    NotFound(String),

    /// Frame output used out of order or outside its begin/end bracket.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TurtleError {
    /// Build a [`TurtleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TurtleError::NotFound`] value.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Build a [`TurtleError::Presentation`] value.
    pub fn presentation(msg: impl Into<String>) -> Self {
        Self::Presentation(msg.into())
    }

    /// Build a [`TurtleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TurtleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
