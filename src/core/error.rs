use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("order has {found} entries but the track list has {expected}")]
    OrderLength { expected: usize, found: usize },

    #[error("order is not a permutation: position {0} is missing or repeated")]
    NotPermutation(usize),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference {key} holds malformed JSON")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference {key} holds unknown value {value:?}")]
    UnknownValue { key: &'static str, value: String },
}
