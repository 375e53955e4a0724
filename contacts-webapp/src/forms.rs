use wasm_bindgen::JsCast;
use web_sys::{
    HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, RadioNodeList,
};

use contacts_commons::model::ContactForm;
use contacts_commons::ClientError;

/// Reads named controls of a page form.
#[derive(Clone)]
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        DomForm { form }
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }
}

impl ContactForm for DomForm {
    fn value(&self, field: &str) -> Result<String, ClientError> {
        let control = self
            .form
            .elements()
            .named_item(field)
            .ok_or_else(|| ClientError::MissingField { name: field.to_string() })?;

        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            Ok(input.value())
        } else if let Some(text) = control.dyn_ref::<HtmlTextAreaElement>() {
            Ok(text.value())
        } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
            Ok(select.value())
        } else if let Some(group) = control.dyn_ref::<RadioNodeList>() {
            // value of the checked radio button, empty if none is checked
            Ok(group.value())
        } else {
            Err(ClientError::Dom { message: format!("Field '{}' is not a value control", field) })
        }
    }

    fn reset(&self) -> Result<(), ClientError> {
        self.form.reset();
        Ok(())
    }
}
