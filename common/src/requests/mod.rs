//! Request payloads sent to the volunteer endpoints.
//!
//! Constructors trim every field and refuse blanks, so a payload that exists
//! has already passed client-side validation.

use serde::Serialize;

use crate::error::SignupError;

const MISSING_CONTACT: &str = "Please fill in your name and email.";
const MISSING_ROLE: &str = "Please choose a volunteer role.";

/// Body of `POST /api/event-volunteer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignupRequest {
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateSignupRequest {
    pub fn new(
        event_id: &str,
        name: &str,
        email: &str,
        role: &str,
        note: Option<&str>,
    ) -> Result<Self, SignupError> {
        let (name, email) = contact(name, email)?;
        let role = role.trim();
        if role.is_empty() {
            return Err(SignupError::validation(MISSING_ROLE));
        }
        let notes = note
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string);

        Ok(Self {
            event_id: event_id.trim().to_string(),
            name,
            email,
            role: role.to_string(),
            notes,
        })
    }
}

/// Body of `PUT /api/event-volunteer/{id}`. The email is the identity the
/// backend checks against the original submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSignupRequest {
    pub name: String,
    pub email: String,
}

impl UpdateSignupRequest {
    pub fn new(name: &str, email: &str) -> Result<Self, SignupError> {
        let (name, email) = contact(name, email)?;
        Ok(Self { name, email })
    }
}

fn contact(name: &str, email: &str) -> Result<(String, String), SignupError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(SignupError::validation(MISSING_CONTACT));
    }
    Ok((name.to_string(), email.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn create_trims_every_field() {
        let request =
            CreateSignupRequest::new("evt", "Lee ", " Lee@X.com ", " Pacers – Fast", Some("  "))
                .unwrap();
        assert_eq!(request.name, "Lee");
        assert_eq!(request.email, "Lee@X.com");
        assert_eq!(request.role, "Pacers – Fast");
        assert_eq!(request.notes, None);
    }

    #[test]
    fn create_rejects_blank_contact() {
        assert_matches!(
            CreateSignupRequest::new("evt", "   ", "a@b.c", "Role", None),
            Err(SignupError::Validation(_))
        );
        assert_matches!(
            CreateSignupRequest::new("evt", "Ana", "", "Role", None),
            Err(SignupError::Validation(_))
        );
    }

    #[test]
    fn create_rejects_blank_role() {
        let err = CreateSignupRequest::new("evt", "Ana", "a@b.c", " ", None).unwrap_err();
        assert_eq!(err.to_string(), MISSING_ROLE);
    }

    #[test]
    fn create_omits_blank_notes_from_json() {
        let request = CreateSignupRequest::new("evt", "Ana", "a@b.c", "Role", None).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("notes").is_none());
        assert_eq!(json["eventId"], "evt");
    }

    #[test]
    fn create_keeps_trimmed_notes() {
        let request =
            CreateSignupRequest::new("evt", "Ana", "a@b.c", "Role", Some(" early ")).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["notes"], "early");
    }

    #[test]
    fn update_requires_name_and_email() {
        assert!(UpdateSignupRequest::new("Ana", "a@b.c").is_ok());
        assert_matches!(
            UpdateSignupRequest::new("Ana", "  "),
            Err(SignupError::Validation(_))
        );
    }
}
