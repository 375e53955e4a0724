use std::rc::Rc;

use async_lock::Mutex;
use log::*;

use crate::api::{ContactsClient, Endpoint, SearchField, STATUS_CREATED};
use crate::model::{ContactForm, NewContact};
use crate::sync::{ContactListSync, ListTargets, ListView, SyncOutcome};
use crate::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    /// Any status other than `201`; nothing is refreshed.
    Rejected(u16),
    /// A previous submission is still in flight.
    Busy,
}

pub struct ContactFormSubmitter {
    client: Rc<ContactsClient>,
    sync: ContactListSync,
    targets: ListTargets,
    reset_on_create: bool,
    in_flight: Mutex<()>,
}

impl ContactFormSubmitter {
    pub fn new(
        client: Rc<ContactsClient>,
        sync: ContactListSync,
        targets: ListTargets,
        reset_on_create: bool,
    ) -> Self {
        ContactFormSubmitter { client, sync, targets, reset_on_create, in_flight: Mutex::new(()) }
    }

    /// Creates a contact from the form values and, once the server answered
    /// `201`, re-syncs both lists exactly once.
    pub async fn submit(&self, form: &dyn ContactForm) -> Result<SubmitOutcome, ClientError> {
        {
            let _guard = match self.in_flight.try_lock() {
                Some(guard) => guard,
                None => {
                    warn!("Contact creation already in progress, dropping submission");
                    return Ok(SubmitOutcome::Busy);
                }
            };

            let contact = NewContact::read_from(form)?;
            let status = self.client.create_contact(&contact).await?;

            if status != STATUS_CREATED {
                debug!("Contact creation rejected with {}", status);
                return Ok(SubmitOutcome::Rejected(status));
            }

            info!("Contact is created");

            if self.reset_on_create {
                form.reset()?;
            }
        }

        // each outcome is logged by the sync itself
        let (_contacts, _birthdays) = self.sync.refresh_all(&self.targets).await;

        Ok(SubmitOutcome::Created)
    }
}

/// Renders the result of an advanced search into a single view. The form
/// provides a `mode` (`name`, `thurname` or `email`) and the `query` text.
pub struct ContactSearchSubmitter {
    sync: ContactListSync,
    view: Rc<dyn ListView>,
}

impl ContactSearchSubmitter {
    pub fn new(sync: ContactListSync, view: Rc<dyn ListView>) -> Self {
        ContactSearchSubmitter { sync, view }
    }

    pub async fn submit(&self, form: &dyn ContactForm) -> Result<SyncOutcome, ClientError> {
        let mode = form.value("mode")?;
        let field = SearchField::parse(&mode).ok_or_else(|| ClientError::Message {
            message: format!("Unknown search mode '{}'", mode),
        })?;
        let value = form.value("query")?.trim().to_string();

        self.sync.fetch_and_render(&Endpoint::Search { field, value }, self.view.as_ref()).await
    }
}

#[cfg(test)]
mod submit_tests {
    use futures::executor::block_on;

    use crate::api::testing::*;
    use crate::api::{Method, Transport};
    use crate::model::MockContactForm;
    use crate::sync::testing::RecordingView;
    use crate::token::AuthToken;

    use super::*;

    struct Fixture {
        transport: Rc<ScriptedTransport>,
        contacts: Rc<RecordingView>,
        birthdays: Rc<RecordingView>,
        submitter: ContactFormSubmitter,
    }

    fn fixture(reset_on_create: bool) -> Fixture {
        let transport = Rc::new(ScriptedTransport::default());
        let dyn_transport: Rc<dyn Transport> = transport.clone();
        let client = Rc::new(ContactsClient::new("http://test", Some(AuthToken::new("t")), dyn_transport));

        let contacts = Rc::new(RecordingView::with_items(&["before"]));
        let birthdays = Rc::new(RecordingView::with_items(&["before"]));
        let targets = ListTargets { contacts: contacts.clone(), birthdays: birthdays.clone() };

        let submitter = ContactFormSubmitter::new(
            client.clone(),
            ContactListSync::new(client),
            targets,
            reset_on_create,
        );

        Fixture { transport, contacts, birthdays, submitter }
    }

    fn filled_form(resets: usize) -> MockContactForm {
        let mut form = MockContactForm::new();
        form.expect_value().returning(|field| Ok(format!("{}-input", field)));
        form.expect_reset().times(resets).returning(|| Ok(()));
        form
    }

    #[test]
    fn created_contact_refreshes_both_lists_once() {
        let fx = fixture(false);
        fx.transport.respond("/api/contacts", 201, "{}");
        fx.transport.respond("/api/contacts", 200, ANN_LEE);
        fx.transport.respond("/api/contacts/next_birthdays", 200, "[]");

        let outcome = block_on(fx.submitter.submit(&filled_form(0))).unwrap();

        assert_eq!(SubmitOutcome::Created, outcome);

        let requests = fx.transport.requests.borrow();
        let calls: Vec<(Method, String)> = requests
            .iter()
            .map(|r| (r.method, r.url.trim_start_matches("http://test").to_string()))
            .collect();
        assert_eq!(
            vec![
                (Method::Post, "/api/contacts".to_string()),
                (Method::Get, "/api/contacts".to_string()),
                (Method::Get, "/api/contacts/next_birthdays".to_string()),
            ],
            calls
        );

        let sent: NewContact = serde_json::from_str(requests[0].body.as_ref().unwrap()).unwrap();
        assert_eq!("thurname-input", sent.thurname);
        assert_eq!("notes-input", sent.notes);

        assert_eq!(1, fx.contacts.texts().len());
        assert!(fx.contacts.texts()[0].contains("Ann"));
        assert!(fx.birthdays.texts().is_empty());
    }

    #[test]
    fn rejected_contact_does_not_refresh() {
        let fx = fixture(true);
        fx.transport.respond("/api/contacts", 400, r#"{"detail":"invalid"}"#);

        let outcome = block_on(fx.submitter.submit(&filled_form(0))).unwrap();

        assert_eq!(SubmitOutcome::Rejected(400), outcome);
        assert_eq!(vec!["/api/contacts".to_string()], fx.transport.requested_paths());
        assert_eq!(vec!["before".to_string()], fx.contacts.texts());
        assert_eq!(vec!["before".to_string()], fx.birthdays.texts());
    }

    #[test]
    fn form_reset_after_creation_when_enabled() {
        let fx = fixture(true);
        fx.transport.respond("/api/contacts", 201, "{}");
        fx.transport.respond("/api/contacts", 200, "[]");
        fx.transport.respond("/api/contacts/next_birthdays", 200, "[]");

        let outcome = block_on(fx.submitter.submit(&filled_form(1))).unwrap();

        assert_eq!(SubmitOutcome::Created, outcome);
    }

    #[test]
    fn failed_refresh_still_reports_creation() {
        let fx = fixture(false);
        fx.transport.respond("/api/contacts", 201, "{}");
        fx.transport.respond("/api/contacts/next_birthdays", 200, ANN_LEE);

        let outcome = block_on(fx.submitter.submit(&filled_form(0))).unwrap();

        assert_eq!(SubmitOutcome::Created, outcome);
        assert_eq!(vec!["before".to_string()], fx.contacts.texts());
        assert_eq!(1, fx.birthdays.texts().len());
    }

    #[test]
    fn submission_in_flight_is_dropped() {
        let fx = fixture(false);
        let _held = fx.submitter.in_flight.try_lock().unwrap();

        let outcome = block_on(fx.submitter.submit(&filled_form(0))).unwrap();

        assert_eq!(SubmitOutcome::Busy, outcome);
        assert!(fx.transport.requests.borrow().is_empty());
    }

    #[test]
    fn transport_failure_on_create_is_propagated() {
        let fx = fixture(false);
        fx.transport.fail("/api/contacts", "offline");

        let result = block_on(fx.submitter.submit(&filled_form(0)));

        assert!(matches!(result, Err(ClientError::Transport { .. })));
        assert_eq!(1, fx.transport.requests.borrow().len());
    }

    #[test]
    fn search_renders_matches() {
        let transport = Rc::new(ScriptedTransport::default());
        transport.respond("/api/contacts/advanced_search?cont_thurname=Lee", 200, ANN_LEE);
        let dyn_transport: Rc<dyn Transport> = transport.clone();
        let client = Rc::new(ContactsClient::new("http://test", None, dyn_transport));
        let view = Rc::new(RecordingView::with_items(&["before"]));

        let search = ContactSearchSubmitter::new(ContactListSync::new(client), view.clone());

        let mut form = MockContactForm::new();
        form.expect_value().returning(|field| match field {
            "mode" => Ok("thurname".to_string()),
            _ => Ok(" Lee ".to_string()),
        });

        let outcome = block_on(search.submit(&form)).unwrap();

        assert_eq!(SyncOutcome::Rendered(1), outcome);
        assert!(view.texts()[0].contains("Ann Lee"));
    }

    #[test]
    fn search_with_unknown_mode_is_an_error() {
        let transport = Rc::new(ScriptedTransport::default());
        let dyn_transport: Rc<dyn Transport> = transport.clone();
        let client = Rc::new(ContactsClient::new("http://test", None, dyn_transport));
        let search = ContactSearchSubmitter::new(ContactListSync::new(client), Rc::new(RecordingView::default()));

        let mut form = MockContactForm::new();
        form.expect_value().returning(|_| Ok("phone".to_string()));

        let result = block_on(search.submit(&form));

        assert!(matches!(result, Err(ClientError::Message { .. })));
        assert!(transport.requests.borrow().is_empty());
    }
}
