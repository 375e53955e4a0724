use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use crate::ClientError;

pub const FORM_FIELDS: [&'static str; 6] = ["name", "thurname", "email", "phone", "birthday", "notes"];

/// Source of the values typed into the creation form.
#[cfg_attr(test, automock)]
pub trait ContactForm {
    fn value(&self, field: &str) -> Result<String, ClientError>;

    fn reset(&self) -> Result<(), ClientError>;
}

/// Creation payload, sent as-is. The server is the only validating party.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewContact {
    pub name: String,
    pub thurname: String,
    pub email: String,
    pub phone: String,
    pub birthday: String,
    pub notes: String,
}

impl NewContact {
    pub fn read_from(form: &dyn ContactForm) -> Result<NewContact, ClientError> {
        Ok(NewContact {
            name: form.value("name")?,
            thurname: form.value("thurname")?,
            email: form.value("email")?,
            phone: form.value("phone")?,
            birthday: form.value("birthday")?,
            notes: form.value("notes")?,
        })
    }
}
