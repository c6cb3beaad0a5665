use image::ImageError;
use std::{error::Error, path::PathBuf};

/// Everything that can go wrong while producing a single icon.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("source icon not found at {}", .0.display())]
    MissingSourceFile(PathBuf),

    #[error("failed to decode source icon {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("failed to write {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("cannot render a {size}x{size} icon")]
    DegenerateGeometry { size: u32 },
}

impl IconError {
    /// The error message followed by every underlying cause, on one line.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_describe_includes_cause() {
        let err = IconError::WriteFailure {
            path: PathBuf::from("/nowhere/icon16.png"),
            source: ImageError::IoError(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
        };

        let message = err.describe();
        assert!(message.starts_with("failed to write /nowhere/icon16.png"));
        assert!(message.contains("permission denied"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn test_missing_source_names_path() {
        let err = IconError::MissingSourceFile(PathBuf::from("master.png"));
        assert_eq!(err.describe(), "source icon not found at master.png");
    }
}
