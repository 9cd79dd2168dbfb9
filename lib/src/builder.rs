use crate::email::Email;
use crate::sendgrid::{Content, MailSendRequest, Personalization};
use crate::substitution::Replacer;
use crate::{attachment, recipient, Error};

const SUBJECT_REQUIRED: &str = "The subject is required. You can get around this requirement if you use a template with a subject defined or if every personalization has a subject defined.";

/// Builds the outbound message for the personalization at `index`.
///
/// Nothing is sent here; the first problem found aborts the build.
pub fn build(req: &MailSendRequest, index: usize, p: &Personalization) -> Result<Email, Error> {
    let path = format!("personalizations.{}", index);

    let from = recipient::mailbox(&req.from, "from.email", "message.from")?;

    let reply_to = if req.reply_to.email.is_empty() {
        None
    } else {
        Some(recipient::mailbox(&req.reply_to, "reply_to.email", "message.reply_to")?)
    };

    let to = recipient::mailboxes(&p.to, &format!("{}.to", path))?;
    let cc = recipient::mailboxes(&p.cc, &format!("{}.cc", path))?;
    let bcc = recipient::mailboxes(&p.bcc, &format!("{}.bcc", path))?;

    let replacer = Replacer::new(&p.substitutions);

    let subject = if !p.subject.is_empty() {
        replacer.replace(&p.subject)
    } else if !req.subject.is_empty() {
        replacer.replace(&req.subject)
    } else {
        return Err(Error::bad_request(SUBJECT_REQUIRED, "subject", "message.subject"));
    };

    if req.wants_template(p) {
        // Dynamic templates are not rendered; the literal content blocks are
        // sent instead
        log::warn!(
            "{}: template {} requested with dynamic data, sending content blocks",
            path,
            req.template_id
        );
    }

    let (text, html) = render_content(&req.content, &replacer);

    let attachments = attachment::decode_all(&req.attachments)?;

    Ok(Email {
        from,
        reply_to,
        to,
        cc,
        bcc,
        subject,
        text,
        html,
        attachments,
    })
}

/// Substitutes each block into the HTML or plain body.
///
/// Later blocks of the same kind replace earlier ones.
fn render_content(content: &[Content], replacer: &Replacer) -> (Option<String>, Option<String>) {
    let mut text = None;
    let mut html = None;

    for block in content {
        let value = replacer.replace(&block.value);

        if block.type_ == "text/html" {
            html = Some(value);
        } else {
            text = Some(value);
        }
    }

    (text, html)
}
