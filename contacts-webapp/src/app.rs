use std::rc::Rc;

use log::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement};

use contacts_commons::api::{ContactsClient, Endpoint, Transport};
use contacts_commons::config::{load_config_from_json, ClientConfig};
use contacts_commons::submit::{ContactFormSubmitter, ContactSearchSubmitter, SubmitOutcome};
use contacts_commons::sync::{ContactListSync, ListTargets, ListView, SyncOutcome};
use contacts_commons::token::load_token;

use crate::error::{js_message, StartupError};
use crate::forms::DomForm;
use crate::storage::LocalStorage;
use crate::transport::FetchTransport;
use crate::views::DomListView;

const CONFIG_ELEMENT_ID: &'static str = "contacts-config";

pub fn start() -> Result<(), StartupError> {
    let window = web_sys::window()
        .ok_or_else(|| StartupError::Environment { message: "no window".to_string() })?;
    let document = window
        .document()
        .ok_or_else(|| StartupError::Environment { message: "no document".to_string() })?;

    let config = read_config(&document);

    info!("Initialising contacts client...");

    let token = match LocalStorage::new(&window) {
        Ok(storage) => load_token(&storage, &config.token_key),
        Err(error) => {
            error!("{}", error);
            None
        }
    };

    let transport: Rc<dyn Transport> = Rc::new(FetchTransport::new(window));
    let client = Rc::new(ContactsClient::new(&config.api_base, token, transport));
    let sync = ContactListSync::new(client.clone());

    let contacts = bind_list(&document, &config.contacts_container);
    let birthdays = bind_list(&document, &config.birthdays_container);
    start_initial_syncs(
        &sync,
        &[(Endpoint::Contacts, &contacts), (Endpoint::NextBirthdays, &birthdays)],
    );

    // creating refreshes both lists, so the form needs both of them
    let (contacts, birthdays) = match (contacts, birthdays) {
        (Ok(contacts), Ok(birthdays)) => (contacts, birthdays),
        _ => {
            warn!("Contact creation disabled, a list container is missing");
            return Ok(());
        }
    };
    let targets = ListTargets { contacts: contacts.clone(), birthdays };

    let create_form = form_element(&document, &config.form_id)?;
    let submitter =
        Rc::new(ContactFormSubmitter::new(client, sync.clone(), targets, config.reset_form_on_create));
    arm_create_form(create_form, submitter)?;

    match document.get_element_by_id(&config.search_form_id) {
        Some(_) => {
            let search_form = form_element(&document, &config.search_form_id)?;
            arm_search_form(search_form, Rc::new(ContactSearchSubmitter::new(sync, contacts)))?;
        }
        None => debug!("No search form '{}' on this page", config.search_form_id),
    }

    Ok(())
}

/// Configuration is optional; a broken one is reported and replaced by the defaults.
fn read_config(document: &Document) -> ClientConfig {
    let serialised = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .unwrap_or_default();

    match load_config_from_json(&serialised) {
        Ok(config) => {
            wasm_logger::init(wasm_logger::Config::new(config.log_level()));
            config
        }
        Err(error) => {
            wasm_logger::init(wasm_logger::Config::default());
            error!("Ignoring configuration in '{}': {}", CONFIG_ELEMENT_ID, error);
            ClientConfig::default()
        }
    }
}

fn required_element(document: &Document, id: &str) -> Result<Element, StartupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| StartupError::MissingElement { id: id.to_string() })
}

fn bind_list(document: &Document, id: &str) -> Result<Rc<dyn ListView>, StartupError> {
    let container = required_element(document, id)?;
    Ok(Rc::new(DomListView::new(document.clone(), container)))
}

/// Spawns one sync per bound list. A missing container is reported and
/// skipped without holding back the other list. Returns the started endpoints.
fn start_initial_syncs(
    sync: &ContactListSync,
    lists: &[(Endpoint, &Result<Rc<dyn ListView>, StartupError>)],
) -> Vec<Endpoint> {
    let mut started = vec![];
    for (endpoint, list) in lists.iter() {
        match list {
            Ok(view) => {
                spawn_sync(sync.clone(), endpoint.clone(), view.clone());
                started.push(endpoint.clone());
            }
            Err(error) => error!("Not rendering {}: {}", endpoint.path(), error),
        }
    }
    started
}

fn form_element(document: &Document, id: &str) -> Result<DomForm, StartupError> {
    let form: HtmlFormElement = required_element(document, id)?.dyn_into().map_err(|_| {
        StartupError::Binding { id: id.to_string(), message: "not a form".to_string() }
    })?;

    Ok(DomForm::new(form))
}

fn spawn_sync(sync: ContactListSync, endpoint: Endpoint, view: Rc<dyn ListView>) {
    spawn_local(async move {
        match sync.fetch_and_render(&endpoint, view.as_ref()).await {
            Ok(SyncOutcome::Rendered(count)) => debug!("Rendered {} contacts from {}", count, endpoint.path()),
            Ok(SyncOutcome::Skipped(status)) => debug!("Nothing rendered from {} ({})", endpoint.path(), status),
            Err(error) => error!("Failed to sync {}: {}", endpoint.path(), error),
        }
    });
}

fn on_submit<F>(form: &DomForm, handler: F) -> Result<(), StartupError>
where
    F: Fn() + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        handler();
    }) as Box<dyn FnMut(Event)>);

    form.element()
        .add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())
        .map_err(|cause| StartupError::Binding {
            id: form.element().id(),
            message: js_message(&cause, "submit listener rejected"),
        })?;

    // the listener lives as long as the page
    closure.forget();

    Ok(())
}

fn arm_create_form(form: DomForm, submitter: Rc<ContactFormSubmitter>) -> Result<(), StartupError> {
    let target = form.clone();
    on_submit(&target, move || {
        let form = form.clone();
        let submitter = submitter.clone();
        spawn_local(async move {
            match submitter.submit(&form).await {
                Ok(SubmitOutcome::Created) => {}
                Ok(SubmitOutcome::Rejected(status)) => info!("Contact not created ({})", status),
                Ok(SubmitOutcome::Busy) => {}
                Err(error) => error!("Failed to create contact: {}", error),
            }
        });
    })
}

fn arm_search_form(form: DomForm, search: Rc<ContactSearchSubmitter>) -> Result<(), StartupError> {
    let target = form.clone();
    on_submit(&target, move || {
        let form = form.clone();
        let search = search.clone();
        spawn_local(async move {
            if let Err(error) = search.submit(&form).await {
                error!("Search failed: {}", error);
            }
        });
    })
}
