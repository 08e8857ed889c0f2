use std::fmt;

/// Fallback shown when the backend rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Fallback for an ownership rejection that carries no backend message.
pub const NOT_YOUR_SIGNUP: &str = "That signup belongs to a different email.";

/// The four things the signup client can be asked to do; used to phrase
/// network failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Remove,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "submit your signup",
            Operation::List => "load the volunteer roster",
            Operation::Update => "update your signup",
            Operation::Remove => "remove your signup",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Every failure a signup operation can surface. `Display` is the message
/// rendered inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    /// A required field was blank after trimming; no request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered non-2xx (or `success: false`) with a JSON body.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The backend answered with something other than JSON.
    #[error("The server returned an unexpected response.")]
    Protocol { status: u16 },

    /// The request never completed.
    #[error("Unable to {operation} right now.")]
    Network { operation: Operation, detail: String },

    /// The backend refused an update/delete because the email did not match
    /// the original submitter.
    #[error("{0}")]
    OwnershipMismatch(String),
}

impl SignupError {
    pub fn validation(message: impl Into<String>) -> Self {
        SignupError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_displays_backend_message_verbatim() {
        let err = SignupError::Remote {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn network_error_names_the_operation() {
        let err = SignupError::Network {
            operation: Operation::Create,
            detail: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Unable to submit your signup right now.");
    }

    #[test]
    fn protocol_error_hides_the_body() {
        let err = SignupError::Protocol { status: 502 };
        assert_eq!(err.to_string(), "The server returned an unexpected response.");
    }
}
