use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace role tag
///
/// Every account buys; sellers additionally list products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum UserRole {
    Buyer = 0,
    Seller = 1,
    #[default]
    Both = 2,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Buyer => "buyer",
            Seller => "seller",
            Both => "both",
        }
    }

    /// Whether this role may list products for sale
    #[inline]
    pub const fn can_sell(&self) -> bool {
        use UserRole::*;
        matches!(self, Seller | Both)
    }

    /// Whether this role may add items to a cart and order
    #[inline]
    pub const fn can_buy(&self) -> bool {
        use UserRole::*;
        matches!(self, Buyer | Both)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(Buyer),
            1 => Some(Seller),
            2 => Some(Both),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "buyer" => Some(Buyer),
            "seller" => Some(Seller),
            "both" => Some(Both),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Seller));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Both));
        assert_eq!(UserRole::from_id(9), None);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("buyer"), Some(UserRole::Buyer));
        assert_eq!(UserRole::from_code("seller"), Some(UserRole::Seller));
        assert_eq!(UserRole::from_code("both"), Some(UserRole::Both));
        assert_eq!(UserRole::from_code("admin"), None);
    }

    #[test]
    fn test_unknown_role_defaults_to_both() {
        // Request parsing falls back to the default when the code is unknown
        let role = UserRole::from_code("nonsense").unwrap_or_default();
        assert_eq!(role, UserRole::Both);
    }

    #[test]
    fn test_role_capabilities() {
        assert!(!UserRole::Buyer.can_sell());
        assert!(UserRole::Seller.can_sell());
        assert!(UserRole::Both.can_sell());
        assert!(UserRole::Buyer.can_buy());
        assert!(!UserRole::Seller.can_buy());
        assert!(UserRole::Both.can_buy());
    }
}
