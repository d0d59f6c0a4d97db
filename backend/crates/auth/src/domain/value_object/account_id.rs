use kernel::id::Id;

pub struct AccountMarker;
pub type AccountId = Id<AccountMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_roundtrip() {
        let account_id = AccountId::from_i64(17);
        assert_eq!(account_id.as_i64(), 17);
        assert_eq!(account_id.to_string(), "17");
    }
}
