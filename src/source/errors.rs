use std::fmt;

/// Input rejected at the comparison boundary, before the engine runs
#[derive(Debug)]
pub enum InputError {
    /// A side is missing or blank, or the request is malformed
    InvalidInput(String),
    /// Extension not allowed, or the content looks binary
    UnsupportedFileType(String),
    /// File exceeds the configured size limit
    FileTooLarge {
        /// Offending file
        path: String,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
    /// Content is not valid UTF-8
    InvalidEncoding(String),
    /// File could not be opened or read
    Io(String),
}

impl InputError {
    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(msg) => format!("Invalid input: {msg}"),
            Self::UnsupportedFileType(msg) => format!(
                "Unsupported file type: {msg}\n  Hint: only plain text files can be compared"
            ),
            Self::FileTooLarge { path, size, limit } => format!(
                "File too large: {path} is {size} bytes (limit {limit})\n  \
                 Hint: raise input.max_file_size in the config"
            ),
            Self::InvalidEncoding(msg) => format!("Invalid encoding: {msg}"),
            Self::Io(msg) => format!("Cannot read input: {msg}"),
        }
    }

    /// Short machine-readable error category
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::UnsupportedFileType(_) => "unsupported_file_type",
            Self::FileTooLarge { .. } => "file_too_large",
            Self::InvalidEncoding(_) => "invalid_encoding",
            Self::Io(_) => "io",
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        assert_eq!(
            InputError::InvalidInput("x".into()).error_type(),
            "invalid_input"
        );
        assert_eq!(
            InputError::FileTooLarge {
                path: "a.txt".into(),
                size: 10,
                limit: 5
            }
            .error_type(),
            "file_too_large"
        );
    }

    #[test]
    fn test_user_message_mentions_details() {
        let err = InputError::FileTooLarge {
            path: "big.txt".into(),
            size: 2048,
            limit: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("big.txt"));
        assert!(msg.contains("2048"));
        assert!(msg.contains("1024"));

        let err = InputError::UnsupportedFileType("page.pdf".into());
        assert!(err.to_string().contains("page.pdf"));
    }
}
