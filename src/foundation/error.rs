/// Convenience result type used across lutfx.
pub type LutfxResult<T> = Result<T, LutfxError>;

/// Top-level error taxonomy used by the renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum LutfxError {
    /// Invalid caller-provided data (dimensions, buffer lengths, parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// The host allocation capability could not provide a buffer.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LutfxError {
    /// Build a [`LutfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LutfxError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_taxonomy() {
        let e = LutfxError::validation("width must be > 0");
        assert_eq!(e.to_string(), "validation error: width must be > 0");

        let e = LutfxError::allocation("out of memory");
        assert_eq!(e.to_string(), "allocation error: out of memory");
    }
}
