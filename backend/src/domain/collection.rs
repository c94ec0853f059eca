//! Codec for the `UserCollection` XML wire format.
//!
//! A document is a `UserCollection` root holding zero or more `User`
//! elements, each with `first_name`, `last_name`, `email`, and `rate`
//! leaves. Decoding matches leaves by tag name, so their order inside a
//! `User` does not matter; encoding always emits them in the fixed order
//! above, preceded by a UTF-8 XML declaration.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::user::UserRecord;

const ROOT_TAG: &str = "UserCollection";
const USER_TAG: &str = "User";
/// Leaf tags of a `User` element, in the order the encoder writes them.
const FIELD_TAGS: [&str; 4] = ["first_name", "last_name", "email", "rate"];

/// Failures raised while decoding or encoding a collection document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The document is not well-formed XML.
    #[error("malformed XML document: {message}")]
    Malformed { message: String },
    /// The root element is absent or is not `UserCollection`.
    #[error("root element UserCollection is missing")]
    MissingRoot,
    /// A `User` element lacks one of the four required leaf elements.
    #[error("User element is missing required field {field}")]
    MissingField { field: &'static str },
    /// A `rate` leaf does not hold a decimal integer.
    #[error("rate value {value:?} is not a valid integer")]
    InvalidRate { value: String },
}

impl CodecError {
    fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Decode a `UserCollection` document into its ordered user records.
///
/// Only direct `User` children of the root are read; any other sibling
/// content (elements, text, comments) is skipped. Within a `User`, leaves
/// are matched by tag name and the first occurrence of a duplicated leaf
/// wins; unknown leaves are ignored.
pub fn decode_collection(document: &str) -> Result<Vec<UserRecord>, CodecError> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    if matches!(seek_root(&mut reader)?, RootStart::SelfClosing) {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    loop {
        match next_event(&mut reader)? {
            Event::Start(start) if start.name().as_ref() == USER_TAG.as_bytes() => {
                records.push(read_user(&mut reader)?);
            }
            Event::Empty(start) if start.name().as_ref() == USER_TAG.as_bytes() => {
                // A childless user can never satisfy the required leaves.
                records.push(LeafSlots::default().finish()?);
            }
            Event::Start(start) => skip_subtree(&mut reader, &start)?,
            Event::End(end) if end.name().as_ref() == ROOT_TAG.as_bytes() => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(records)
}

/// Encode records into a `UserCollection` document.
///
/// Leaves are written in the fixed order `first_name`, `last_name`,
/// `email`, `rate`, with text content XML-escaped. No identifier is
/// emitted. The output is semantically stable but makes no promise of
/// byte-equality with whatever document the records were decoded from.
pub fn encode_collection(records: &[UserRecord]) -> Result<String, CodecError> {
    let mut writer = Writer::new(Vec::new());

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
    for record in records {
        emit(&mut writer, Event::Start(BytesStart::new(USER_TAG)))?;
        write_leaf(&mut writer, "first_name", &record.first_name)?;
        write_leaf(&mut writer, "last_name", &record.last_name)?;
        write_leaf(&mut writer, "email", &record.email)?;
        write_leaf(&mut writer, "rate", &record.rate.to_string())?;
        emit(&mut writer, Event::End(BytesEnd::new(USER_TAG)))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| CodecError::malformed(e.to_string()))
}

/// Outcome of locating the root element.
enum RootStart {
    Open,
    SelfClosing,
}

fn next_event<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>, CodecError> {
    reader
        .read_event()
        .map_err(|e| CodecError::malformed(e.to_string()))
}

/// Advance past the prologue to the `UserCollection` start tag.
fn seek_root(reader: &mut Reader<&[u8]>) -> Result<RootStart, CodecError> {
    loop {
        match next_event(reader)? {
            Event::Start(start) if start.name().as_ref() == ROOT_TAG.as_bytes() => {
                return Ok(RootStart::Open);
            }
            Event::Empty(start) if start.name().as_ref() == ROOT_TAG.as_bytes() => {
                return Ok(RootStart::SelfClosing);
            }
            Event::Start(_) | Event::Empty(_) | Event::Eof => return Err(CodecError::MissingRoot),
            _ => {}
        }
    }
}

/// Read one `User` element, collecting its four required leaves.
fn read_user(reader: &mut Reader<&[u8]>) -> Result<UserRecord, CodecError> {
    let mut slots = LeafSlots::default();
    loop {
        match next_event(reader)? {
            Event::Start(start) => {
                let tag = start.name().as_ref().to_vec();
                if FIELD_TAGS.iter().any(|t| t.as_bytes() == tag.as_slice()) {
                    let text = read_leaf_text(reader, &tag)?;
                    slots.store(&tag, text);
                } else {
                    skip_subtree(reader, &start)?;
                }
            }
            Event::Empty(start) => slots.store(start.name().as_ref(), String::new()),
            Event::End(end) if end.name().as_ref() == USER_TAG.as_bytes() => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    slots.finish()
}

/// Collect the unescaped text content of a leaf element.
fn read_leaf_text(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<String, CodecError> {
    let mut text = String::new();
    loop {
        match next_event(reader)? {
            Event::Text(chunk) => {
                let unescaped = chunk
                    .unescape()
                    .map_err(|e| CodecError::malformed(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(data) => text.push_str(&String::from_utf8_lossy(data.as_ref())),
            Event::Start(nested) => skip_subtree(reader, &nested)?,
            Event::End(end) if end.name().as_ref() == tag => break,
            Event::Eof => return Err(CodecError::malformed("unexpected end of document")),
            _ => {}
        }
    }
    Ok(text)
}

/// Skip an element and everything below it.
fn skip_subtree(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<(), CodecError> {
    let end = start.to_end().into_owned();
    reader
        .read_to_end(end.name())
        .map(|_| ())
        .map_err(|e| CodecError::malformed(e.to_string()))
}

/// Accumulator for the four leaf values of a `User` element.
#[derive(Default)]
struct LeafSlots {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    rate: Option<String>,
}

impl LeafSlots {
    /// First occurrence of a leaf wins; later duplicates and unknown tags
    /// are ignored.
    fn store(&mut self, tag: &[u8], text: String) {
        let slot = match tag {
            b"first_name" => &mut self.first_name,
            b"last_name" => &mut self.last_name,
            b"email" => &mut self.email,
            b"rate" => &mut self.rate,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    fn finish(self) -> Result<UserRecord, CodecError> {
        let first_name = self.first_name.ok_or(CodecError::MissingField {
            field: "first_name",
        })?;
        let last_name = self
            .last_name
            .ok_or(CodecError::MissingField { field: "last_name" })?;
        let email = self
            .email
            .ok_or(CodecError::MissingField { field: "email" })?;
        let rate_text = self
            .rate
            .ok_or(CodecError::MissingField { field: "rate" })?;
        let rate = rate_text.trim().parse().map_err(|_| CodecError::InvalidRate {
            value: rate_text.clone(),
        })?;

        Ok(UserRecord {
            first_name,
            last_name,
            email,
            rate,
        })
    }
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), CodecError> {
    writer
        .write_event(event)
        .map_err(|e| CodecError::malformed(e.to_string()))
}

fn write_leaf<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &str,
) -> Result<(), CodecError> {
    emit(writer, Event::Start(BytesStart::new(tag)))?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    emit(writer, Event::End(BytesEnd::new(tag)))
}
