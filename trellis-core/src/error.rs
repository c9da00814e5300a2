// Error types for the Trellis framework

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A resource expected to declare a path annotation did not.
    #[error("Missing annotation: {0}")]
    MissingAnnotation(String),

    /// A path template is syntactically invalid.
    #[error("Illegal path: {0}")]
    IllegalPath(String),

    #[error("Illegal path on resource {resource}: {message}")]
    IllegalPathOnClass { resource: String, message: String },

    #[error("Illegal path on operation {operation}: {message}")]
    IllegalPathOnMethod { operation: String, message: String },

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// An HTTP-verb marker names a verb the method enumeration does not know.
    #[error("Unknown HTTP verb: {0}")]
    UnknownVerb(String),

    #[error("Dispatch unavailable: {0}")]
    DispatchUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::UnknownVerb(_) => 405,
            Error::DispatchUnavailable(_) => 503,
            Error::Io(_) => 400,

            // Registration failures are server-side defects
            Error::MissingAnnotation(_)
            | Error::IllegalPath(_)
            | Error::IllegalPathOnClass { .. }
            | Error::IllegalPathOnMethod { .. }
            | Error::IllegalArgument(_) => 500,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code())
    }

    /// Whether the error reports a malformed path template, whatever its site.
    pub fn is_illegal_path(&self) -> bool {
        matches!(
            self,
            Error::IllegalPath(_) | Error::IllegalPathOnClass { .. } | Error::IllegalPathOnMethod { .. }
        )
    }

    /// Attach a resource name to an [`Error::IllegalPath`].
    pub(crate) fn on_class(self, resource: &str) -> Self {
        match self {
            Error::IllegalPath(message) => Error::IllegalPathOnClass {
                resource: resource.to_string(),
                message,
            },
            other => other,
        }
    }

    /// Attach an operation name to an [`Error::IllegalPath`].
    pub(crate) fn on_method(self, operation: &str) -> Self {
        match self {
            Error::IllegalPath(message) => Error::IllegalPathOnMethod {
                operation: operation.to_string(),
                message,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::UnknownVerb("BREW".into()).status_code(), 405);
        assert_eq!(Error::DispatchUnavailable("riap".into()).status_code(), 503);
        assert_eq!(Error::IllegalPath("{".into()).status_code(), 500);
        assert!(Error::UnknownVerb("BREW".into()).is_client_error());
        assert!(Error::MissingAnnotation("Foo".into()).is_server_error());
    }

    #[test]
    fn test_localizing_illegal_path() {
        let err = Error::IllegalPath("unclosed variable".into()).on_class("app::Users");
        assert!(err.is_illegal_path());
        assert_eq!(
            err.to_string(),
            "Illegal path on resource app::Users: unclosed variable"
        );

        let err = Error::IllegalPath("empty variable name".into()).on_method("get_user");
        assert!(matches!(err, Error::IllegalPathOnMethod { ref operation, .. } if operation == "get_user"));

        // Other kinds pass through untouched
        let err = Error::UnknownVerb("BREW".into()).on_method("brew");
        assert!(matches!(err, Error::UnknownVerb(_)));
    }
}
