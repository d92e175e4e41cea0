//! Export-to-file helper.
//!
//! Wraps the JSON document in a Blob and clicks a synthetic anchor so the
//! browser offers it as a download.

use wasm_bindgen::{JsCast, JsValue};
use widget_types::{Result, WidgetError};

pub fn save_json(file_name: &str, json: &str) -> Result<()> {
    let window = web_sys::window()
        .ok_or_else(|| WidgetError::JsInterop("No window object".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| WidgetError::JsInterop("No document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| WidgetError::JsInterop("No document body".to_string()))?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(json));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| WidgetError::JsInterop("Element is not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

    Ok(())
}

fn js_err(e: JsValue) -> WidgetError {
    WidgetError::JsInterop(format!("{:?}", e))
}
