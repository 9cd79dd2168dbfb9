use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// A single v3 `/mail/send` request body.
///
/// Every field tolerates being absent or `null`; required-field checks are
/// left to [`super::validate`] so that they produce API-shaped errors.
#[derive(Deserialize, Debug, Default)]
pub struct MailSendRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personalizations: Vec<Personalization>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: AddressWithName,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reply_to: AddressWithName,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Content>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template_id: String,
}

/// One addressed variant of a send, producing one outbound message
#[derive(Deserialize, Debug, Default)]
pub struct Personalization {
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Vec<AddressWithName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc: Vec<AddressWithName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bcc: Vec<AddressWithName>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub substitutions: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dynamic_template_data: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AddressWithName {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct Content {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub type_: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct Attachment {
    /// Base64 encoded file content
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub type_: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disposition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content_id: String,
}

impl MailSendRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, crate::Error> {
        serde_json::from_slice(body).map_err(|e| e.into())
    }

    /// A template is only rendered for personalizations that carry
    /// dynamic data.
    pub fn wants_template(&self, personalization: &Personalization) -> bool {
        !self.template_id.is_empty() && !personalization.dynamic_template_data.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
