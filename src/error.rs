use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser adapter. None of these are shown to visitors;
/// the feature that hit one is simply left disabled.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no {0}")]
    MissingElement(&'static str),
    #[error("session storage unavailable")]
    StorageUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
