//! Provider-neutral outbound message.
//!
//! Request types are translated into this first; only then is it rendered
//! into a MIME [`Message`] for the SMTP transport.

use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::api::ErrorDetail;
use crate::Error;

#[derive(Debug, Clone)]
pub struct Email {
    pub from: Mailbox,
    pub reply_to: Option<Mailbox>,
    pub to: Vec<Mailbox>,
    pub cc: Vec<Mailbox>,
    pub bcc: Vec<Mailbox>,
    pub subject: String,

    /// Plaintext body, if any
    pub text: Option<String>,

    /// HTML body, if any
    pub html: Option<String>,

    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    Attachment,

    /// Inline part referenced from HTML as `cid:<id>`
    Inline(String),
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: ContentType,
    pub disposition: Disposition,
    pub data: Vec<u8>,
}

enum Body {
    Single(SinglePart),
    Multi(MultiPart),
}

impl Email {
    /// False when there is nobody to put on the SMTP envelope
    pub fn has_recipients(&self) -> bool {
        !(self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty())
    }

    /// Renders the MIME message, stamped with `message_id`.
    ///
    /// Text and HTML become `multipart/alternative`; attachments wrap the
    /// body in `multipart/mixed`.
    pub fn to_message(&self, message_id: String) -> Result<Message, Error> {
        let mut builder = Message::builder()
            .message_id(Some(message_id))
            .from(self.from.clone())
            .subject(self.subject.as_str());

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to.clone());
        }

        for to in &self.to {
            builder = builder.to(to.clone());
        }

        for cc in &self.cc {
            builder = builder.cc(cc.clone());
        }

        for bcc in &self.bcc {
            builder = builder.bcc(bcc.clone());
        }

        let body = match (&self.text, &self.html) {
            (Some(text), Some(html)) => {
                Body::Multi(MultiPart::alternative_plain_html(text.clone(), html.clone()))
            }
            (None, Some(html)) => Body::Single(SinglePart::html(html.clone())),
            (Some(text), None) => Body::Single(SinglePart::plain(text.clone())),
            (None, None) => Body::Single(SinglePart::plain(String::new())),
        };

        let result = if self.attachments.is_empty() {
            match body {
                Body::Single(part) => builder.singlepart(part),
                Body::Multi(parts) => builder.multipart(parts),
            }
        } else {
            let mut mixed = match body {
                Body::Single(part) => MultiPart::mixed().singlepart(part),
                Body::Multi(parts) => MultiPart::mixed().multipart(parts),
            };

            for attachment in &self.attachments {
                mixed = mixed.singlepart(attachment.to_part());
            }

            builder.multipart(mixed)
        };

        result.map_err(|e| Error::Internal(ErrorDetail::message(e.to_string())))
    }
}

impl Attachment {
    fn to_part(&self) -> SinglePart {
        let attachment = match &self.disposition {
            Disposition::Attachment => lettre::message::Attachment::new(self.filename.clone()),
            Disposition::Inline(content_id) => {
                lettre::message::Attachment::new_inline(content_id.clone())
            }
        };

        // Arbitrary bytes; base64 never rejects its input
        let body = lettre::message::Body::new_with_encoding(
            self.data.clone(),
            ContentTransferEncoding::Base64,
        )
        .unwrap_or_else(lettre::message::Body::new);

        attachment.body(body, self.content_type.clone())
    }
}
