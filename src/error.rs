use thiserror::Error;

/// Errors raised while building a [`LocaleConfig`](crate::LocaleConfig).
///
/// These are construction-time defects in a locale bundle. Input text that
/// simply does not contain a temporal expression is never an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern `{name}`: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("missing entry `{key}` in table `{table}`")]
    MissingTableEntry { table: &'static str, key: String },

    #[error("table `{0}` is empty")]
    EmptyTable(&'static str),
}
