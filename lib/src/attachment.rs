use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use lettre::message::header::{ContentType, ContentTypeErr};

use crate::email::{Attachment, Disposition};
use crate::sendgrid;
use crate::Error;

const ANCHOR: &str = "message.attachments.content";

/// Decodes the attachment at `index` of the request's `attachments` list.
///
/// Bad base64 is the caller's fault (400); a MIME type that cannot be
/// attached is reported as a 500 carrying the underlying error text. Both
/// point at `attachments.<index>.content`.
pub fn decode(index: usize, spec: &sendgrid::Attachment) -> Result<Attachment, Error> {
    let field = format!("attachments.{}.content", index);

    // Line-wrapped payloads are common
    let content: String = spec
        .content
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    let data = STANDARD.decode(content.as_bytes()).map_err(|e| {
        log::debug!("{}: {}", field, e);
        Error::bad_request("The attachment content must be base64 encoded.", &field, ANCHOR)
    })?;

    let content_type =
        content_type(spec).map_err(|e| Error::internal(e.to_string(), &field, ANCHOR))?;

    let disposition = if spec.disposition == "inline" && !spec.content_id.is_empty() {
        Disposition::Inline(spec.content_id.clone())
    } else {
        Disposition::Attachment
    };

    Ok(Attachment {
        filename: spec.filename.clone(),
        content_type,
        disposition,
        data,
    })
}

/// Decodes every attachment, stopping at the first failure
pub fn decode_all(specs: &[sendgrid::Attachment]) -> Result<Vec<Attachment>, Error> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| decode(i, spec))
        .collect()
}

/// Declared type, or a guess from the filename when none was given
fn content_type(spec: &sendgrid::Attachment) -> Result<ContentType, ContentTypeErr> {
    if spec.type_.is_empty() {
        let guess = mime_guess::from_path(&spec.filename).first_or_octet_stream();
        ContentType::parse(guess.as_ref())
    } else {
        ContentType::parse(&spec.type_)
    }
}
