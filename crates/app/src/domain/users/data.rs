//! Users Data

/// Profile fields carried by identity-provider user events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub subject: String,
    /// Display name built from the first and last names. Empty when the provider sent neither.
    pub name: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

/// A user lifecycle event received from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    Created(IdentityProfile),
    Updated(IdentityProfile),
    Deleted { subject: String },
    /// Event types this service does not consume.
    Ignored { kind: String },
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Validated data for inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub subject: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl TryFrom<IdentityProfile> for NewUser {
    type Error = super::UsersServiceError;

    fn try_from(profile: IdentityProfile) -> Result<Self, Self::Error> {
        let email = profile
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(super::UsersServiceError::MissingEmail)?;

        let username = profile
            .username
            .filter(|username| !username.trim().is_empty())
            .ok_or(super::UsersServiceError::MissingUsername)?;

        Ok(Self {
            subject: profile.subject,
            name: profile.name,
            email,
            username,
            avatar_url: profile.avatar_url,
        })
    }
}
