use wasm_bindgen::JsCast as _;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use orrery_engine::{RequestId, TextRequest};
use crate::error::{describe, WebError};

/// GET `url` and return the response body as text.
pub async fn fetch_text(url: &str) -> Result<String, WebError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| WebError::Fetch(describe(&e)))?;

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| WebError::Fetch(describe(&e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| WebError::Fetch("response is not a Response".into()))?;

    if !resp.ok() {
        return Err(WebError::Http(resp.status()));
    }

    let text = JsFuture::from(resp.text().map_err(|e| WebError::Fetch(describe(&e)))?)
        .await
        .map_err(|e| WebError::Fetch(describe(&e)))?;

    Ok(text.as_string().unwrap_or_default())
}

/// Start one fetch per request. Each result is handed to `complete`
/// whenever it arrives; failures are logged and passed on as messages.
pub fn dispatch_requests<F>(requests: Vec<TextRequest>, complete: F)
where
    F: Fn(RequestId, Result<String, String>) + Clone + 'static,
{
    for request in requests {
        let complete = complete.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_text(&request.url).await.map_err(|e| {
                log::warn!("request {} ({}) failed: {}", request.id.0, request.url, e);
                e.to_string()
            });
            complete(request.id, result);
        });
    }
}
