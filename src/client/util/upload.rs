use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::form::payload::Attachment;

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Reads the first file picked in a file input.
pub async fn first_attachment(evt: &FormEvent) -> Option<Attachment> {
    let file = evt.files().into_iter().next()?;
    let file_name = file.name();

    match file.read_bytes().await {
        Ok(bytes) => {
            let mime = file
                .content_type()
                .unwrap_or_else(|| mime_for(&file_name).to_string());
            Some(Attachment::new(file_name, mime, bytes.to_vec()))
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", file_name, e);
            None
        }
    }
}
