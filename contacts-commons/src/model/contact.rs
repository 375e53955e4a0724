use std::fmt;

use serde::{Deserialize, Serialize};

/// Server assigned identifier. Only ever displayed, never built client side.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Number(id) => write!(f, "{}", id),
            ContactId::Text(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default)]
    pub thurname: Option<String>,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        match self.thurname.as_deref() {
            Some(thurname) if !thurname.is_empty() => format!("{} {}", self.name, thurname),
            _ => self.name.clone(),
        }
    }
}

/// Display form of a single contact.
///
/// Split in three parts so that views can emphasise the full name without
/// interpreting any of the server supplied text as markup:
/// `ID: <id> Fullname: ` + `<name> <thurname>` + ` Email: ... Notes: <notes>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub lead: String,
    pub full_name: String,
    pub details: String,
}

impl ListItem {
    pub fn text(&self) -> String {
        format!("{}{}{}", self.lead, self.full_name, self.details)
    }
}

impl From<&Contact> for ListItem {
    fn from(contact: &Contact) -> Self {
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();

        ListItem {
            lead: format!("ID: {} Fullname: ", contact.id),
            full_name: contact.full_name(),
            details: format!(
                " Email: {} Phone: {} Birthday: {} Notes: {}",
                contact.email,
                contact.phone,
                optional(&contact.birthday),
                optional(&contact.notes)
            ),
        }
    }
}
