//! Multipart form parsing helpers.
//!
//! Item, outfit media, and profile endpoints accept `multipart/form-data`
//! bodies mixing text fields with an optional file part. This module collects
//! a multipart stream into a [`FormData`] value so handlers can validate
//! fields up-front and decide whether to upload before touching the database.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::Multipart;

use crate::error::{AppError, AppResult};

/// An uploaded file part extracted from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client, if any.
    pub filename: String,
    /// Declared content type (e.g. `image/jpeg`, `video/mp4`), if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Bytes,
}

/// Collected multipart form data: text fields plus at most one file part.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    /// The file part, if one was sent. Keyed by whichever field name the
    /// route expects (`image`, `media`, `avatar`); only one file per form.
    pub file: Option<UploadedFile>,
}

impl FormData {
    /// Read an entire multipart stream into memory.
    ///
    /// Parts with a filename are treated as the file upload; all other parts
    /// are collected as text fields. A second file part replaces the first.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name() {
                let filename = filename.to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file part: {e}")))?;
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Get a text field by name, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a required text field, trimmed, rejecting missing or blank values.
    pub fn required(&self, name: &str) -> AppResult<&str> {
        match self.field(name).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(AppError::BadRequest(format!("Field '{name}' is required"))),
        }
    }
}
