//! Account Entity
//!
//! Public marketplace account: identity, profile and audit fields.
//! Sensitive protection state lives in the Credential entity.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, email::Email, user_role::UserRole, username::Username,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned numeric id
    pub account_id: AccountId,
    /// Unique public handle
    pub username: Username,
    /// Unique login identity
    pub email: Email,
    /// Full display name
    pub display_name: String,
    /// Contact phone number
    pub phone: String,
    /// Free-form location / locale
    pub location: String,
    /// Role tag (buyer, seller, both)
    pub role: UserRole,
    /// Aggregate seller rating (read-only here, written by reviews)
    pub rating: f64,
    /// Number of reviews behind the rating
    pub total_reviews: i32,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Account fields supplied at registration, before the store assigns an id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub display_name: String,
    pub phone: String,
    pub location: String,
    pub role: UserRole,
}

/// Partial profile update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.phone.is_none() && self.location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());

        let update = ProfileUpdate {
            phone: Some("+2348012345678".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
