// src/resume_validator.rs
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

/// Largest resume the client will upload
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

const PDF_SIGNATURE: &[u8] = b"%PDF";

#[derive(Debug, Clone)]
pub struct ResumeValidationError {
    pub path: PathBuf,
    pub error_type: ResumeErrorType,
    pub message: String,
    pub suggestion: String,
}

impl std::fmt::Display for ResumeValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.suggestion)
    }
}

impl std::error::Error for ResumeValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeErrorType {
    FileNotFound,
    EmptyFile,
    TooLarge,
    WrongFormat,
    UnreadableFile,
}

impl ResumeErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound => "RESUME_NOT_FOUND",
            Self::EmptyFile => "RESUME_EMPTY",
            Self::TooLarge => "RESUME_TOO_LARGE",
            Self::WrongFormat => "RESUME_WRONG_FORMAT",
            Self::UnreadableFile => "RESUME_UNREADABLE",
        }
    }
}

pub struct ResumeValidator;

impl ResumeValidator {
    /// Check the file exists, is a non-empty PDF and fits the upload limit; returns its bytes
    pub async fn load_pdf(path: &Path) -> Result<Vec<u8>, ResumeValidationError> {
        let fail = |error_type: ResumeErrorType, message: String, suggestion: &str| {
            ResumeValidationError {
                path: path.to_path_buf(),
                error_type,
                message,
                suggestion: suggestion.to_string(),
            }
        };

        let metadata = fs::metadata(path).await.map_err(|_| {
            fail(
                ResumeErrorType::FileNotFound,
                format!("Resume not found: {}", path.display()),
                "Check the path to your resume PDF",
            )
        })?;

        if metadata.len() == 0 {
            return Err(fail(
                ResumeErrorType::EmptyFile,
                "Resume file is empty".to_string(),
                "Please attach a valid PDF",
            ));
        }

        if metadata.len() > MAX_RESUME_BYTES {
            return Err(fail(
                ResumeErrorType::TooLarge,
                format!(
                    "Resume too large: {:.1}MB (max 10MB)",
                    metadata.len() as f64 / 1024.0 / 1024.0
                ),
                "Please compress the PDF and try again",
            ));
        }

        let content = fs::read(path).await.map_err(|e| {
            fail(
                ResumeErrorType::UnreadableFile,
                format!("Cannot read resume: {}", e),
                "Check file permissions",
            )
        })?;

        if !content.starts_with(PDF_SIGNATURE) {
            error!("Resume rejected, not a PDF: {}", path.display());
            return Err(fail(
                ResumeErrorType::WrongFormat,
                "Resume must be a PDF document".to_string(),
                "Export your resume as PDF",
            ));
        }

        info!("Resume validation passed: {} ({} bytes)", path.display(), content.len());
        Ok(content)
    }

    /// Name sent with the multipart part
    pub fn upload_file_name(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("resume.pdf")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF-1.7\n%fake\n").unwrap();

        let bytes = ResumeValidator::load_pdf(&path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(ResumeValidator::upload_file_name(&path), "cv.pdf");
    }

    #[tokio::test]
    async fn test_rejects_missing_empty_and_non_pdf() {
        let dir = tempfile::tempdir().unwrap();

        let missing = ResumeValidator::load_pdf(&dir.path().join("nope.pdf"))
            .await
            .unwrap_err();
        assert_eq!(missing.error_type, ResumeErrorType::FileNotFound);

        let empty = dir.path().join("empty.pdf");
        std::fs::write(&empty, b"").unwrap();
        let err = ResumeValidator::load_pdf(&empty).await.unwrap_err();
        assert_eq!(err.error_type.code(), "RESUME_EMPTY");

        let docx = dir.path().join("cv.pdf");
        std::fs::write(&docx, b"PK\x03\x04word").unwrap();
        let err = ResumeValidator::load_pdf(&docx).await.unwrap_err();
        assert_eq!(err.error_type, ResumeErrorType::WrongFormat);
    }
}
