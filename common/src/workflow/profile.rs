use crate::model::profile::{ApplicantProfile, StoredUser};

/// Who is signed in, as far as the apply page is concerned.
///
/// Sign-in itself lives elsewhere; the page only reads the result to
/// pre-fill the form.
pub trait ProfileLookup {
    fn current_user(&self) -> Option<StoredUser>;

    fn applicant_profile(&self) -> ApplicantProfile {
        ApplicantProfile::prefilled_from(self.current_user().as_ref())
    }
}

impl<T: ProfileLookup + ?Sized> ProfileLookup for &T {
    fn current_user(&self) -> Option<StoredUser> {
        (**self).current_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::profile::Role;

    struct Fixed(Option<StoredUser>);

    impl ProfileLookup for Fixed {
        fn current_user(&self) -> Option<StoredUser> {
            self.0.clone()
        }
    }

    #[test]
    fn default_profile_comes_from_current_user() {
        let lookup = Fixed(Some(StoredUser {
            id: "2".to_string(),
            email: "jane@x.com".to_string(),
            role: Role::Applicant,
            name: "Jane Doe".to_string(),
        }));
        assert_eq!(lookup.applicant_profile().email, "jane@x.com");
        assert_eq!(Fixed(None).applicant_profile(), ApplicantProfile::default());
    }
}
