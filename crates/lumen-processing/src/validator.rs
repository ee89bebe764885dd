//! Upload validation, decoupled from storage and HTTP concerns.

use std::path::Path;

/// Validation errors for uploaded images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("No file selected")]
    MissingFilename,

    #[error("Unsupported file format. Allowed: {allowed}")]
    InvalidExtension { extension: String, allowed: String },

    #[error("Image too large. Maximum size: {max}x{max}")]
    ImageTooLarge { width: u32, height: u32, max: u32 },
}

/// Upload validator
///
/// Checks filename, extension, byte size, and decoded dimensions against
/// the configured limits. Decode itself happens in the codec module.
pub struct UploadValidator {
    max_file_size: usize,
    max_dimension: u32,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, max_dimension: u32, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            max_dimension,
            allowed_extensions,
        }
    }

    /// Validate the filename and return its lowercased extension.
    pub fn validate_filename(&self, filename: &str) -> Result<String, ValidationError> {
        if filename.is_empty() {
            return Err(ValidationError::MissingFilename);
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidExtension {
                extension: String::new(),
                allowed: self.allowed_extensions.join(", "),
            })?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.join(", "),
            });
        }

        Ok(extension)
    }

    /// Validate the payload size.
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate decoded pixel dimensions.
    pub fn validate_dimensions(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(ValidationError::ImageTooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        Ok(())
    }
}
