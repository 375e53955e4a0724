use web_sys::{Document, Element};

use contacts_commons::model::ListItem;
use contacts_commons::sync::ListView;
use contacts_commons::ClientError;

use crate::error::dom_error;

const ITEM_CLASS: &'static str = "list-group-item";

/// A list container in the page, e.g. `<ul id="contacts">`.
pub struct DomListView {
    document: Document,
    container: Element,
}

impl DomListView {
    pub fn new(document: Document, container: Element) -> Self {
        DomListView { document, container }
    }

    fn build_item(&self, item: &ListItem) -> Result<Element, ClientError> {
        let li = self
            .document
            .create_element("li")
            .map_err(|e| dom_error(e, "Unable to create list item"))?;
        li.set_class_name(ITEM_CLASS);

        let bold = self
            .document
            .create_element("b")
            .map_err(|e| dom_error(e, "Unable to create list item"))?;
        bold.set_text_content(Some(&item.full_name));

        li.append_with_str_1(&item.lead)
            .and_then(|_| li.append_with_node_1(&bold))
            .and_then(|_| li.append_with_str_1(&item.details))
            .map_err(|e| dom_error(e, "Unable to fill list item"))?;

        Ok(li)
    }
}

impl ListView for DomListView {
    fn clear(&self) -> Result<(), ClientError> {
        self.container.set_inner_html("");
        Ok(())
    }

    fn append(&self, item: &ListItem) -> Result<(), ClientError> {
        let li = self.build_item(item)?;
        self.container
            .append_child(&li)
            .map(|_| ())
            .map_err(|e| dom_error(e, "Unable to append list item"))
    }
}
