use std::fmt;
use std::io;

pub(crate) type CurlsResult<T> = Result<T, Error>;

/// Errors that can occur during curls usage
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred when reading a theme file
    Io(io::Error),

    /// JSON parsing failed when loading a theme.
    Json(serde_json::Error),

    /// The theme is missing one of the global keys every theme must carry,
    /// eg `breakpoints`.
    MissingRequiredThemeKey(String),

    /// A theme value could not be used, eg the theme itself is not an object or a component
    /// entry has a `kinds` value that is not an object.
    InvalidTheme(String),

    /// A breakpoint descriptor is not a number, a string, an object or an array of objects.
    #[allow(missing_docs)]
    InvalidBreakpoint { name: String, reason: String },

    /// A prop value was not found among the keys of an enum style producer.
    /// `valid` is sorted.
    #[allow(missing_docs)]
    UnknownEnumValue {
        prop: String,
        value: String,
        valid: Vec<String>,
    },

    /// A prop value used a breakpoint the theme doesn't declare.
    /// `valid` is in theme order.
    #[allow(missing_docs)]
    UnknownBreakpoint {
        breakpoint: String,
        valid: Vec<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON parsing error: {}", err),
            Error::MissingRequiredThemeKey(key) => {
                write!(f, "Themes must include a global '{}' property.", key)
            }
            Error::InvalidTheme(reason) => write!(f, "invalid theme: {}", reason),
            Error::InvalidBreakpoint { name, reason } => {
                write!(f, "invalid breakpoint '{}': {}", name, reason)
            }
            Error::UnknownEnumValue { prop, value, valid } => write!(
                f,
                "Error in enum prop '{}'. Value '{}' not found in: {}.",
                prop,
                value,
                valid.join(", ")
            ),
            Error::UnknownBreakpoint { breakpoint, valid } => write!(
                f,
                "A breakpoint for '{}' was not found in: {}",
                breakpoint,
                valid.join(", ")
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::MissingRequiredThemeKey(_)
            | Error::InvalidTheme(_)
            | Error::InvalidBreakpoint { .. }
            | Error::UnknownEnumValue { .. }
            | Error::UnknownBreakpoint { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_developer_errors() {
        let err = Error::UnknownEnumValue {
            prop: "display".to_string(),
            value: "throws".to_string(),
            valid: vec!["block".to_string(), "multi".to_string(), "none".to_string()],
        };
        insta::assert_snapshot!(err.to_string(), @"Error in enum prop 'display'. Value 'throws' not found in: block, multi, none.");

        let err = Error::UnknownBreakpoint {
            breakpoint: "does-not-exist".to_string(),
            valid: vec![
                "phone".to_string(),
                "tablet".to_string(),
                "desktop".to_string(),
            ],
        };
        insta::assert_snapshot!(err.to_string(), @"A breakpoint for 'does-not-exist' was not found in: phone, tablet, desktop");

        let err = Error::MissingRequiredThemeKey("breakpoints".to_string());
        insta::assert_snapshot!(err.to_string(), @"Themes must include a global 'breakpoints' property.");
    }
}
