use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use contacts_commons::api::{HttpRequest, HttpResponse, Transport};
use contacts_commons::ClientError;

use crate::error::js_message;

/// Executes requests through `window.fetch`.
pub struct FetchTransport {
    window: web_sys::Window,
}

impl FetchTransport {
    pub fn new(window: web_sys::Window) -> Self {
        FetchTransport { window }
    }

    fn build_request(&self, request: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (name, value) in request.headers.iter() {
            headers.set(name, value)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&request.url, &init)
    }
}

fn transport_error(cause: JsValue, fallback: &str) -> ClientError {
    ClientError::Transport { message: js_message(&cause, fallback) }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let js_request = self
            .build_request(&request)
            .map_err(|cause| transport_error(cause, "Unable to build request"))?;

        let value = JsFuture::from(self.window.fetch_with_request(&js_request))
            .await
            .map_err(|cause| transport_error(cause, &request.url))?;

        let response: Response = value
            .dyn_into()
            .map_err(|cause| transport_error(cause, "Unexpected fetch result"))?;

        let text_promise = response
            .text()
            .map_err(|cause| transport_error(cause, "Response body not readable"))?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(|cause| transport_error(cause, "Response body not readable"))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status: response.status(), status_text: response.status_text(), body })
    }
}
