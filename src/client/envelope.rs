use serde::Deserialize;

/// Backend response wrapper: the payload lives under `responseResult`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub response_result: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Option<T> {
        self.response_result
    }
}

impl<T: Default> Envelope<T> {
    /// Missing or null payload reads as the empty value (an empty list for lists).
    pub fn into_result_or_default(self) -> T {
        self.response_result.unwrap_or_default()
    }
}
