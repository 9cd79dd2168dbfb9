pub mod types;
pub mod validate;

pub use types::{AddressWithName, Attachment, Content, MailSendRequest, Personalization};
pub use validate::validate;
