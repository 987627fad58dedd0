use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The meal table could not be located. The only error that fails a whole parse.
    TableNotFound(String),
    Price(String),
    Interval(String),
    Nutrition(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TableNotFound(msg) => write!(f, "Meal table not found: {msg}"),
            Self::Price(msg) => write!(f, "Price Parse Error: {msg}"),
            Self::Interval(msg) => write!(f, "Validity Parse Error: {msg}"),
            Self::Nutrition(msg) => write!(f, "Nutrition Parse Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
