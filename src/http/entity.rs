// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request body strategies
//!
//! A body is kept in its editable form until dispatch, when it is turned
//! into the payload handed to the transport.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use indexmap::IndexMap;
use reqwest::multipart::{Form, Part};

use super::charset;
use super::mime;
use crate::error::{Error, Result};

/// Body carried by a request
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No entity
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` parameters
    Form(FormBody),
    /// `multipart/form-data` parts
    Multipart(MultipartBody),
    /// Single string entity
    Text(StringBody),
}

/// Payload ready for the transport
#[derive(Debug)]
pub(crate) enum Entity {
    Bytes { content_type: String, data: Vec<u8> },
    Multipart(Form),
}

impl RequestBody {
    /// Short name used in log fields and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Form(_) => "form",
            RequestBody::Multipart(_) => "multipart",
            RequestBody::Text(_) => "text",
        }
    }

    /// Build the transport payload
    pub(crate) async fn materialize(&self) -> Result<Option<Entity>> {
        match self {
            RequestBody::Empty => Ok(None),
            RequestBody::Form(form) => Ok(Some(form.to_entity())),
            RequestBody::Multipart(multipart) => Ok(Some(multipart.to_entity().await?)),
            RequestBody::Text(text) => Ok(Some(text.to_entity())),
        }
    }
}

fn byte_encoder<F>(f: F) -> F
where
    F: for<'s> Fn(&'s str) -> Cow<'s, [u8]>,
{
    f
}

/// Form-urlencoded parameters, insertion ordered
#[derive(Debug, Clone)]
pub struct FormBody {
    charset: String,
    encoding: &'static Encoding,
    params: IndexMap<String, String>,
}

impl FormBody {
    /// Create an empty form encoded with `charset`
    pub fn new(charset: impl Into<String>) -> Result<Self> {
        let charset = charset.into();
        let encoding = charset::lookup(&charset)?;
        Ok(Self {
            charset,
            encoding,
            params: IndexMap::new(),
        })
    }

    /// Charset label given at construction
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Add or overwrite a parameter. A `None` value is sent as empty.
    pub fn add_parameter<'a>(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Option<&'a str>>,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("Null/Empty name"));
        }

        let value = value.into().unwrap_or_default().to_string();
        self.params.insert(name, value);
        Ok(())
    }

    /// Current value for `name`
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All parameters in insertion order
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encoded body in the form's charset
    pub fn encode(&self) -> String {
        let encoding = self.encoding;
        let encode = byte_encoder(move |s| Cow::Owned(charset::encode(encoding, s)));

        url::form_urlencoded::Serializer::new(String::new())
            .encoding_override(Some(&encode))
            .extend_pairs(self.params.iter())
            .finish()
    }

    fn to_entity(&self) -> Entity {
        Entity::Bytes {
            content_type: format!("{}; charset={}", mime::FORM_URLENCODED, self.charset),
            data: self.encode().into_bytes(),
        }
    }
}

/// One multipart part
#[derive(Debug, Clone)]
pub enum MultipartPart {
    File {
        field: String,
        path: PathBuf,
        file_name: String,
        mime_type: Option<String>,
    },
    Text {
        field: String,
        value: String,
        content_type: Option<(String, String)>,
    },
}

/// Ordered multipart parts
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    parts: Vec<MultipartPart>,
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::invalid_argument(format!("Not a file path: {}", path.display())))
}

fn non_empty(field: String, what: &str) -> Result<String> {
    if field.trim().is_empty() {
        return Err(Error::invalid_argument(format!("Null/Empty {}", what)));
    }
    Ok(field)
}

impl MultipartBody {
    /// Create an empty multipart body
    pub fn new() -> Self {
        Self::default()
    }

    /// Parts in call order
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Attach a file under its own file name
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let file_name = file_name_of(&path)?;
        self.parts.push(MultipartPart::File {
            field: file_name.clone(),
            path,
            file_name,
            mime_type: None,
        });
        Ok(())
    }

    /// Attach a file under field `name`
    pub fn add_named_file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Result<()> {
        let field = non_empty(name.into(), "field name")?;
        let path = path.into();
        let file_name = file_name_of(&path)?;
        self.parts.push(MultipartPart::File {
            field,
            path,
            file_name,
            mime_type: None,
        });
        Ok(())
    }

    /// Attach a file under its own file name with an explicit MIME type
    pub fn add_file_with_mime(&mut self, path: impl Into<PathBuf>, mime_type: impl Into<String>) -> Result<()> {
        let path = path.into();
        let name = file_name_of(&path)?;
        self.add_named_file_with_mime(name, path, mime_type)
    }

    /// Attach a file under field `name` with an explicit MIME type.
    /// `name` is also sent as the part's file name.
    pub fn add_named_file_with_mime(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        mime_type: impl Into<String>,
    ) -> Result<()> {
        let field = non_empty(name.into(), "field name")?;
        let mime_type = non_empty(mime_type.into(), "MIME type")?;
        self.parts.push(MultipartPart::File {
            file_name: field.clone(),
            field,
            path: path.into(),
            mime_type: Some(mime_type),
        });
        Ok(())
    }

    /// Add a text field
    pub fn add_text(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let field = non_empty(name.into(), "field name")?;
        self.parts.push(MultipartPart::Text {
            field,
            value: value.into(),
            content_type: None,
        });
        Ok(())
    }

    /// Add a text field with an explicit MIME type and charset
    pub fn add_text_with_type(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        mime_type: impl Into<String>,
        charset: impl Into<String>,
    ) -> Result<()> {
        let field = non_empty(name.into(), "field name")?;
        let mime_type = non_empty(mime_type.into(), "MIME type")?;
        let charset = charset.into();
        charset::lookup(&charset)?;
        self.parts.push(MultipartPart::Text {
            field,
            value: value.into(),
            content_type: Some((mime_type, charset)),
        });
        Ok(())
    }

    async fn to_entity(&self) -> Result<Entity> {
        let mut form = Form::new();

        for part in &self.parts {
            form = match part {
                MultipartPart::File {
                    field,
                    path,
                    file_name,
                    mime_type,
                } => {
                    let data = tokio::fs::read(path).await?;
                    let mime_type = mime_type.as_deref().unwrap_or(mime::OCTET_STREAM);
                    let part = Part::bytes(data)
                        .file_name(file_name.clone())
                        .mime_str(mime_type)?;
                    form.part(field.clone(), part)
                }
                MultipartPart::Text {
                    field,
                    value,
                    content_type: None,
                } => form.text(field.clone(), value.clone()),
                MultipartPart::Text {
                    field,
                    value,
                    content_type: Some((mime_type, charset)),
                } => {
                    let encoding = charset::lookup(charset)?;
                    let part = Part::bytes(charset::encode(encoding, value))
                        .mime_str(&format!("{}; charset={}", mime_type, charset))?;
                    form.part(field.clone(), part)
                }
            };
        }

        Ok(Entity::Multipart(form))
    }
}

/// A single string entity with a fixed content type
#[derive(Debug, Clone)]
pub struct StringBody {
    mime_type: String,
    charset: String,
    encoding: &'static Encoding,
    content: String,
}

impl StringBody {
    /// Create an empty body sent as `mime_type; charset=charset`
    pub fn new(mime_type: impl Into<String>, charset: impl Into<String>) -> Result<Self> {
        let mime_type = non_empty(mime_type.into(), "MIME type")?;
        let charset = charset.into();
        let encoding = charset::lookup(&charset)?;
        Ok(Self {
            mime_type,
            charset,
            encoding,
            content: String::new(),
        })
    }

    /// MIME type without parameters
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Charset label given at construction
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Body string, empty until set
    pub fn content_body(&self) -> &str {
        &self.content
    }

    /// Replace the body string
    pub fn set_content_body(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Full `Content-Type` header value
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", self.mime_type, self.charset)
    }

    fn to_entity(&self) -> Entity {
        Entity::Bytes {
            content_type: self.content_type(),
            data: charset::encode(self.encoding, &self.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_form_last_write_wins() {
        let mut form = FormBody::new("utf-8").unwrap();
        form.add_parameter("a", "1").unwrap();
        form.add_parameter("a", "2").unwrap();
        assert_eq!(form.encode(), "a=2");
        assert_eq!(form.parameter("a"), Some("2"));
    }

    #[test]
    fn test_form_keeps_insertion_order() {
        let mut form = FormBody::new("utf-8").unwrap();
        form.add_parameter("z", "1").unwrap();
        form.add_parameter("a", "2").unwrap();
        form.add_parameter("z", "3").unwrap();
        assert_eq!(form.encode(), "z=3&a=2");
    }

    #[test]
    fn test_form_none_value_is_empty() {
        let mut form = FormBody::new("utf-8").unwrap();
        form.add_parameter("q", None).unwrap();
        assert_eq!(form.encode(), "q=");
    }

    #[test]
    fn test_form_empty_name_rejected() {
        let mut form = FormBody::new("utf-8").unwrap();
        assert!(form.add_parameter(" ", "x").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_form_charset_encoding() {
        let mut utf8 = FormBody::new("utf-8").unwrap();
        utf8.add_parameter("name", "José Silva").unwrap();
        assert_eq!(utf8.encode(), "name=Jos%C3%A9+Silva");

        let mut latin1 = FormBody::new("ISO-8859-1").unwrap();
        latin1.add_parameter("name", "José Silva").unwrap();
        assert_eq!(latin1.encode(), "name=Jos%E9+Silva");
    }

    #[test]
    fn test_form_unknown_charset() {
        assert!(FormBody::new("no-such-charset").unwrap_err().is_encoding());
        assert!(FormBody::new("").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_form_entity_content_type() {
        let form = FormBody::new("utf-8").unwrap();
        match form.to_entity() {
            Entity::Bytes { content_type, .. } => {
                assert_eq!(content_type, "application/x-www-form-urlencoded; charset=utf-8")
            }
            other => panic!("unexpected entity {:?}", other),
        }
    }

    #[test]
    fn test_string_body() {
        let mut body = StringBody::new("text/plain", "ISO-8859-1").unwrap();
        assert_eq!(body.content_body(), "");

        body.set_content_body("olá");
        assert_eq!(body.content_type(), "text/plain; charset=ISO-8859-1");
        match body.to_entity() {
            Entity::Bytes { data, .. } => assert_eq!(data, vec![b'o', b'l', 0xE1]),
            other => panic!("unexpected entity {:?}", other),
        }
    }

    #[test]
    fn test_utf16_bodies_are_really_utf16() {
        let mut body = StringBody::new("text/plain", "UTF-16").unwrap();
        body.set_content_body("hi");
        assert_eq!(body.content_type(), "text/plain; charset=UTF-16");
        match body.to_entity() {
            Entity::Bytes { data, .. } => assert_eq!(data, vec![b'h', 0, b'i', 0]),
            other => panic!("unexpected entity {:?}", other),
        }

        let mut form = FormBody::new("utf-16be").unwrap();
        form.add_parameter("n", "é").unwrap();
        assert_eq!(form.encode(), "%00n=%00%E9");
    }

    #[test]
    fn test_string_body_requires_mime_type() {
        assert!(StringBody::new("", "utf-8").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_multipart_field_names() {
        let mut body = MultipartBody::new();
        body.add_file("/tmp/report.pdf").unwrap();
        body.add_named_file("upload", "/tmp/report.pdf").unwrap();
        body.add_named_file_with_mime("doc", "/tmp/report.pdf", "application/pdf").unwrap();
        body.add_text("title", "Q3").unwrap();

        let parts = body.parts();
        assert_eq!(parts.len(), 4);
        match &parts[0] {
            MultipartPart::File { field, file_name, .. } => {
                assert_eq!(field, "report.pdf");
                assert_eq!(file_name, "report.pdf");
            }
            other => panic!("unexpected part {:?}", other),
        }
        match &parts[1] {
            MultipartPart::File { field, file_name, .. } => {
                assert_eq!(field, "upload");
                assert_eq!(file_name, "report.pdf");
            }
            other => panic!("unexpected part {:?}", other),
        }
        match &parts[2] {
            MultipartPart::File { field, file_name, mime_type, .. } => {
                assert_eq!(field, "doc");
                assert_eq!(file_name, "doc");
                assert_eq!(mime_type.as_deref(), Some("application/pdf"));
            }
            other => panic!("unexpected part {:?}", other),
        }
    }

    #[test]
    fn test_multipart_text_charset_checked() {
        let mut body = MultipartBody::new();
        assert!(body
            .add_text_with_type("t", "v", "text/plain", "bogus")
            .unwrap_err()
            .is_encoding());
        assert!(body.parts().is_empty());
    }

    #[tokio::test]
    async fn test_multipart_reads_files_at_dispatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();

        let mut body = MultipartBody::new();
        body.add_named_file("upload", file.path()).unwrap();
        body.add_text("note", "hi").unwrap();

        let entity = RequestBody::Multipart(body).materialize().await.unwrap();
        assert!(matches!(entity, Some(Entity::Multipart(_))));
    }

    #[tokio::test]
    async fn test_multipart_missing_file_is_io_error() {
        let mut body = MultipartBody::new();
        body.add_file("/nonexistent/dir/missing.bin").unwrap();

        let err = RequestBody::Multipart(body).materialize().await.unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_empty_body_has_no_entity() {
        let entity = tokio_test::block_on(RequestBody::Empty.materialize()).unwrap();
        assert!(entity.is_none());
    }
}
