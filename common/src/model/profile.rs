use serde::{Deserialize, Serialize};

/// Applicant identity typed into the form. Both fields are required to be
/// non-blank (after trimming) at submit time, nothing else is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub name: String,
    pub email: String,
}

impl ApplicantProfile {
    /// Pre-fills the form from the signed-in user, if any.
    pub fn prefilled_from(user: Option<&StoredUser>) -> Self {
        match user {
            Some(user) if user.role == Role::Applicant => Self {
                name: user.name.clone(),
                email: user.email.clone(),
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Applicant,
}

/// The `user` entry written by the login screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefills_only_for_applicants() {
        let raw = r#"{"id":"2","email":"jane@x.com","role":"applicant","name":"Jane Applicant"}"#;
        let user: StoredUser = serde_json::from_str(raw).expect("stored user");
        let profile = ApplicantProfile::prefilled_from(Some(&user));
        assert_eq!(profile.name, "Jane Applicant");
        assert_eq!(profile.email, "jane@x.com");

        let hr = StoredUser {
            role: Role::Hr,
            ..user
        };
        assert_eq!(ApplicantProfile::prefilled_from(Some(&hr)), ApplicantProfile::default());
        assert_eq!(ApplicantProfile::prefilled_from(None), ApplicantProfile::default());
    }
}
