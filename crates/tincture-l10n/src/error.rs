//! Localization errors.

use std::path::PathBuf;

/// Error returned when arguments cannot be substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The template has more placeholders than arguments were supplied.
    #[error("template needs {required} arguments but {supplied} were supplied")]
    ArgumentMismatch { required: usize, supplied: usize },
    /// An argument's kind cannot satisfy its conversion, e.g. text for `%d`.
    #[error("argument {position} is {found} and cannot be formatted with %{conversion}")]
    TypeMismatch {
        /// One-based argument position.
        position: usize,
        conversion: char,
        found: &'static str,
    },
    /// A `%` that does not start a recognised placeholder.
    #[error("invalid placeholder at byte {offset} of template")]
    InvalidPlaceholder { offset: usize },
}

/// Error returned when a catalog table cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is neither UTF-8 nor UTF-16 with a byte order mark.
    #[error("{} is not valid UTF-8 or UTF-16 text", .path.display())]
    Encoding { path: PathBuf },
    /// The file extension does not name a known catalog format.
    #[error("unrecognized catalog format for {}", .0.display())]
    UnknownFormat(PathBuf),
    #[error("invalid .strings syntax at line {line}: {message}")]
    Strings { line: usize, message: String },
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid CSV catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid Android string resources: {0}")]
    AndroidXml(#[from] quick_xml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_mismatch_display() {
        let err = FormatError::ArgumentMismatch {
            required: 2,
            supplied: 1,
        };
        assert_eq!(
            err.to_string(),
            "template needs 2 arguments but 1 were supplied"
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = LoadError::Io {
            path: PathBuf::from("/nope/Localizable.strings"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("Localizable.strings"));
    }
}
