//! Error types for the dotfield core.

use thiserror::Error;

/// Errors produced by core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Canvas width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A field key was not recognized by the registry.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// An I/O failure (snapshot write).
    #[error("io error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_includes_key() {
        let err = CoreError::UnknownField("swirl".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("swirl"),
            "expected message containing 'swirl', got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = CoreError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = format!("{}", CoreError::InvalidDimensions);
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn core_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn core_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<CoreError>();
    }
}
