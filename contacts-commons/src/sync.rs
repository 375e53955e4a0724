use std::rc::Rc;

use log::*;

#[cfg(test)]
use mockall::automock;

use crate::api::{ContactsClient, Endpoint, Fetched};
use crate::model::ListItem;
use crate::ClientError;

/// A render area holding one list of contacts.
#[cfg_attr(test, automock)]
pub trait ListView {
    fn clear(&self) -> Result<(), ClientError>;

    fn append(&self, item: &ListItem) -> Result<(), ClientError>;
}

/// The two areas kept in sync with the server.
#[derive(Clone)]
pub struct ListTargets {
    pub contacts: Rc<dyn ListView>,
    pub birthdays: Rc<dyn ListView>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The view now shows exactly this many items.
    Rendered(usize),
    /// Non-success status; the view was not touched.
    Skipped(u16),
}

#[derive(Clone)]
pub struct ContactListSync {
    client: Rc<ContactsClient>,
}

impl ContactListSync {
    pub fn new(client: Rc<ContactsClient>) -> Self {
        ContactListSync { client }
    }

    /// Replaces the content of `view` with the collection behind `endpoint`.
    ///
    /// The body is decoded before the view is cleared, so any failure leaves
    /// the last good content in place.
    pub async fn fetch_and_render(
        &self,
        endpoint: &Endpoint,
        view: &dyn ListView,
    ) -> Result<SyncOutcome, ClientError> {
        match self.client.fetch_contacts(endpoint).await? {
            Fetched::Status(status) => Ok(SyncOutcome::Skipped(status)),
            Fetched::Contacts(contacts) => {
                view.clear()?;
                for contact in contacts.iter() {
                    view.append(&ListItem::from(contact))?;
                }
                Ok(SyncOutcome::Rendered(contacts.len()))
            }
        }
    }

    /// Syncs the full list and the upcoming birthdays side by side. Neither
    /// waits for nor depends on the other.
    pub async fn refresh_all(
        &self,
        targets: &ListTargets,
    ) -> (Result<SyncOutcome, ClientError>, Result<SyncOutcome, ClientError>) {
        let contacts = self.sync_logged(Endpoint::Contacts, targets.contacts.as_ref());
        let birthdays = self.sync_logged(Endpoint::NextBirthdays, targets.birthdays.as_ref());

        futures::future::join(contacts, birthdays).await
    }

    async fn sync_logged(
        &self,
        endpoint: Endpoint,
        view: &dyn ListView,
    ) -> Result<SyncOutcome, ClientError> {
        let outcome = self.fetch_and_render(&endpoint, view).await;
        match &outcome {
            Ok(SyncOutcome::Rendered(count)) => debug!("Rendered {} contacts from {}", count, endpoint.path()),
            Ok(SyncOutcome::Skipped(status)) => debug!("Kept previous list for {} ({})", endpoint.path(), status),
            Err(error) => error!("Failed to sync {}: {}", endpoint.path(), error),
        }
        outcome
    }
}
