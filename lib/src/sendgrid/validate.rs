//! Structural checks on a decoded request.
//!
//! Rules run in a fixed order and the first failing one decides the error,
//! so a request missing several fields always reports the same one.

use super::types::MailSendRequest;
use crate::Error;

struct Rule {
    field: &'static str,
    anchor: &'static str,
    message: &'static str,
    check: fn(&MailSendRequest) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        field: "personalizations",
        anchor: "-Personalizations-Errors",
        message: "The personalizations field is required and must have at least one personalization.",
        check: has_personalizations,
    },
    Rule {
        field: "from.email",
        anchor: "message.from",
        message: "The from object must be provided for every email send. It is an object that requires the email parameter, but may also contain a name parameter.  e.g. {\"email\" : \"example@example.com\"}  or {\"email\" : \"example@example.com\", \"name\" : \"Example Recipient\"}.",
        check: has_from_email,
    },
    Rule {
        field: "content",
        anchor: "message.content",
        message: "Unless a valid template_id is provided, the content parameter is required. There must be at least one defined content block. We typically suggest both text/plain and text/html blocks are included, but only one block is required.",
        check: has_content,
    },
];

fn has_personalizations(req: &MailSendRequest) -> bool {
    !req.personalizations.is_empty()
}

fn has_from_email(req: &MailSendRequest) -> bool {
    !req.from.email.is_empty()
}

fn has_content(req: &MailSendRequest) -> bool {
    !req.content.is_empty()
}

/// Returns the first violated required-field rule, if any
pub fn validate(req: &MailSendRequest) -> Result<(), Error> {
    match RULES.iter().find(|rule| !(rule.check)(req)) {
        Some(rule) => Err(Error::bad_request(rule.message, rule.field, rule.anchor)),
        None => Ok(()),
    }
}
