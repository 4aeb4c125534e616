use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

use crate::errors::AppError;

pub const PDF_MIME: &str = "application/pdf";
const MIB: usize = 1024 * 1024;

/// One file field of a multipart upload, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Reads every named field of the form into memory.
pub async fn read_files(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        files.push(UploadedFile {
            field: name,
            file_name,
            content_type,
            data,
        });
    }

    Ok(files)
}

/// Removes and returns the first upload sent under `field`.
pub fn take(files: &mut Vec<UploadedFile>, field: &str) -> Option<UploadedFile> {
    let index = files.iter().position(|f| f.field == field)?;
    Some(files.remove(index))
}

/// Rejects anything that is not a non-empty PDF within the size limit.
pub fn validate_pdf(file: &UploadedFile, max_bytes: usize) -> Result<(), AppError> {
    let essence = file.content_type.split(';').next().unwrap_or_default().trim();
    if !essence.eq_ignore_ascii_case(PDF_MIME) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    if file.data.is_empty() {
        return Err(AppError::Validation(format!(
            "File '{}' is empty",
            file.file_name
        )));
    }
    if file.data.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "File size must be less than {}",
            describe_size(max_bytes)
        )));
    }
    Ok(())
}

fn describe_size(bytes: usize) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart upload: {}", err.body_text()))
}
