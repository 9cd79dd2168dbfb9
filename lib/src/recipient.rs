use lettre::message::Mailbox;
use lettre::Address;

use crate::sendgrid::AddressWithName;
use crate::Error;

const INVALID_ADDRESS: &str = "Does not contain a valid address.";

/// Turns a `{email, name}` pair into a header mailbox.
///
/// Renders as `Name <email>`; an empty name is dropped rather than leaving a
/// dangling space. `field` is the dotted request path reported when the
/// address does not parse.
pub fn mailbox(addr: &AddressWithName, field: &str, anchor: &str) -> Result<Mailbox, Error> {
    let email: Address = addr
        .email
        .trim()
        .parse()
        .map_err(|_| Error::bad_request(INVALID_ADDRESS, field, anchor))?;

    let name = Some(addr.name.trim())
        .filter(|name| !name.is_empty())
        .map(String::from);

    Ok(Mailbox::new(name, email))
}

/// Formats every address of one recipient list, e.g. `personalizations.0.cc`
pub fn mailboxes(addrs: &[AddressWithName], path: &str) -> Result<Vec<Mailbox>, Error> {
    addrs
        .iter()
        .enumerate()
        .map(|(i, addr)| mailbox(addr, &format!("{}.{}.email", path, i), "message.personalizations"))
        .collect()
}
