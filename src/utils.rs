use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalize a free-form label for file system usage
pub fn normalize_file_stem(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Default download path for an applicant's resume
pub fn resume_output_path(dir: &Path, application_id: i64, applicant: &str) -> PathBuf {
    dir.join(format!(
        "resume_{}_{}.pdf",
        application_id,
        normalize_file_stem(applicant)
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if tokio::fs::metadata(path).await.is_err() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write bytes, creating parent directories first
pub async fn write_file_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_file_stem() {
        assert_eq!(normalize_file_stem("Priya Nair"), "priya_nair");
        assert_eq!(normalize_file_stem("jean-paul"), "jean-paul");
        assert_eq!(normalize_file_stem("ravi@acme.io"), "ravi_acme_io");
    }

    #[test]
    fn test_resume_output_path() {
        let path = resume_output_path(Path::new("/tmp/resumes"), 42, "Priya Nair");
        assert_eq!(path, PathBuf::from("/tmp/resumes/resume_42_priya_nair.pdf"));
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("cv.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("export.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("export.txt", &["csv"]).is_err());
        assert!(validate_file_extension("noext", &["csv"]).is_err());
    }

    #[tokio::test]
    async fn test_write_file_bytes_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("resume.pdf");
        write_file_bytes(&path, b"%PDF-1.4").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }
}
