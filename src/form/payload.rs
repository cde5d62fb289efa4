//! Request bodies produced by the form editors.

use serde_json::Value;

/// A file picked in an editor, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart fields. Repeated names are kept, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    pub parts: Vec<MultipartPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Adds a structured field serialized as JSON text.
    pub fn json(&mut self, name: impl Into<String>, value: &Value) -> &mut Self {
        self.text(name, value.to_string())
    }

    pub fn file(&mut self, name: impl Into<String>, attachment: Attachment) -> &mut Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::File(attachment),
        });
        self
    }

    pub fn has_files(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p.value, PartValue::File(_)))
    }

    /// First text value recorded under `name`.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(text) if p.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// All files recorded under `name`, in insertion order.
    pub fn files(&self, name: &str) -> Vec<&Attachment> {
        self.parts
            .iter()
            .filter_map(|p| match &p.value {
                PartValue::File(file) if p.name == name => Some(file),
                _ => None,
            })
            .collect()
    }

    /// Converts into a `reqwest` form for sending.
    pub fn into_form(self) -> reqwest::multipart::Form {
        use reqwest::multipart::{Form, Part};

        self.parts
            .into_iter()
            .fold(Form::new(), |form, part| match part.value {
                PartValue::Text(text) => form.text(part.name, text),
                PartValue::File(file) => {
                    let fallback = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                    let typed = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime)
                        .unwrap_or(fallback);
                    form.part(part.name, typed)
                }
            })
    }
}

/// The body of a create/update request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartBody),
}

impl Payload {
    /// Multipart when `multipart` carries at least one file, JSON otherwise.
    pub fn choose(json: Value, multipart: MultipartBody) -> Self {
        if multipart.has_files() {
            Self::Multipart(multipart)
        } else {
            Self::Json(json)
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartBody> {
        match self {
            Self::Multipart(body) => Some(body),
            Self::Json(_) => None,
        }
    }
}
