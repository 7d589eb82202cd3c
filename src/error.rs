//! Crate error type.
//!
//! Browser failures are flattened into strings at the `web` boundary so the
//! core stays free of `wasm_bindgen` types.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("canvas #{id} has no 2d context")]
    ContextUnavailable { id: String },
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(feature = "web")]
impl From<Error> for wasm_bindgen::JsValue {
    fn from(err: Error) -> Self {
        Self::from_str(&err.to_string())
    }
}
