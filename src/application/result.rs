use serde::Serialize;

/// Classification of a use-case outcome, used by the HTTP boundary to pick a
/// status code without matching on message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    Created,
    InvalidInput,
    Conflict,
    NotFound,
    Internal,
}

/// Uniform envelope wrapping every use-case outcome
///
/// Expected failure modes (validation, conflict, not-found) travel inside
/// this envelope rather than as errors, so nothing expected ever crosses the
/// use-case boundary as a raw fault. Every operation returns this one shape;
/// only the payload type varies.
///
/// # Example
/// ```
/// use userdeck_api::application::result::OperationResult;
///
/// let result: OperationResult<&str> = OperationResult::ok("done", "payload");
/// assert!(result.success);
/// assert!(result.errors.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
    pub data: Option<T>,
    #[serde(skip)]
    pub kind: OutcomeKind,
}

impl<T> OperationResult<T> {
    /// Success carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
            data: Some(data),
            kind: OutcomeKind::Ok,
        }
    }

    /// Success without a payload (e.g. deletion)
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
            data: None,
            kind: OutcomeKind::Ok,
        }
    }

    /// Success for a freshly created resource
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: Vec::new(),
            data: Some(data),
            kind: OutcomeKind::Created,
        }
    }

    /// Field or domain validation failure with the full list of violations
    pub fn invalid_input(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
            data: None,
            kind: OutcomeKind::InvalidInput,
        }
    }

    /// Duplicate-email conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
            data: None,
            kind: OutcomeKind::Conflict,
        }
    }

    /// No row matched the requested identifier or email
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
            data: None,
            kind: OutcomeKind::NotFound,
        }
    }

    /// Unexpected failure, downgraded to a generic message
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
            data: None,
            kind: OutcomeKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_has_no_errors() {
        let result = OperationResult::ok("done", 42);
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(result.data, Some(42));
        assert_eq!(result.kind, OutcomeKind::Ok);
    }

    #[test]
    fn invalid_input_keeps_every_violation() {
        let errors = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let result: OperationResult<()> = OperationResult::invalid_input("Invalid input", errors);

        assert!(!result.success);
        assert_eq!(result.errors.len(), 3);
        assert!(result.data.is_none());
    }

    #[test]
    fn kind_is_not_serialized() {
        let result: OperationResult<i32> = OperationResult::not_found("missing");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert!(json.get("kind").is_none());
    }
}
