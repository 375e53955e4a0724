use std::rc::Rc;

use log::*;

use crate::model::{Contact, NewContact};
use crate::token::AuthToken;
use crate::ClientError;

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;

const CONTACTS_PATH: &'static str = "/api/contacts";
const NEXT_BIRTHDAYS_PATH: &'static str = "/api/contacts/next_birthdays";
const SEARCH_PATH: &'static str = "/api/contacts/advanced_search";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Outgoing request as handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Executes a single HTTP exchange. A non-success status is a regular
/// response, only a request that never completes is an error.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Thurname,
    Email,
}

impl SearchField {
    fn parameter(&self) -> &'static str {
        match self {
            SearchField::Name => "cont_name",
            SearchField::Thurname => "cont_thurname",
            SearchField::Email => "cont_email",
        }
    }

    pub fn parse(mode: &str) -> Option<SearchField> {
        match mode {
            "name" => Some(SearchField::Name),
            "thurname" => Some(SearchField::Thurname),
            "email" => Some(SearchField::Email),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Contacts,
    NextBirthdays,
    Search { field: SearchField, value: String },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Contacts => CONTACTS_PATH.to_string(),
            Endpoint::NextBirthdays => NEXT_BIRTHDAYS_PATH.to_string(),
            Endpoint::Search { value, .. } if value.is_empty() => SEARCH_PATH.to_string(),
            Endpoint::Search { field, value } => {
                format!("{}?{}={}", SEARCH_PATH, field.parameter(), urlencoding::encode(value))
            }
        }
    }
}

/// Result of reading a contact collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetched {
    Contacts(Vec<Contact>),
    Status(u16),
}

/// Talks to the contacts REST API on behalf of one bearer token.
pub struct ContactsClient {
    base_url: String,
    token: Option<AuthToken>,
    transport: Rc<dyn Transport>,
}

impl ContactsClient {
    pub fn new(base_url: &str, token: Option<AuthToken>, transport: Rc<dyn Transport>) -> Self {
        ContactsClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            transport,
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn authorised_headers(&self) -> Vec<(String, String)> {
        match &self.token {
            Some(token) => vec![("Authorization".to_string(), token.bearer())],
            None => vec![],
        }
    }

    /// GETs a contact collection. Only a `200` is decoded, every other status
    /// is handed back untouched.
    pub async fn fetch_contacts(&self, endpoint: &Endpoint) -> Result<Fetched, ClientError> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.url(endpoint),
            headers: self.authorised_headers(),
            body: None,
        };

        let response = self.transport.execute(request).await?;
        info!("{} {} {}", endpoint.path(), response.status, response.status_text);

        if response.status != STATUS_OK {
            return Ok(Fetched::Status(response.status));
        }

        let contacts: Vec<Contact> =
            serde_json::from_str(&response.body).map_err(|cause| ClientError::MalformedBody {
                message: format!("Contact list from {}", endpoint.path()),
                cause,
            })?;

        Ok(Fetched::Contacts(contacts))
    }

    /// POSTs a new contact and returns the response status.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<u16, ClientError> {
        let body = serde_json::to_string(contact).map_err(|cause| {
            ClientError::FailedSerialisation { message: "New contact".to_string(), cause }
        })?;

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(self.authorised_headers());

        let request = HttpRequest {
            method: Method::Post,
            url: self.url(&Endpoint::Contacts),
            headers,
            body: Some(body),
        };

        let response = self.transport.execute(request).await?;
        debug!("{} {} {}", CONTACTS_PATH, response.status, response.status_text);

        Ok(response.status)
    }
}
