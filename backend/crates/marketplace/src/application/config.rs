//! Application Configuration

/// Marketplace application configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Catalog page size
    pub products_per_page: u32,
    /// Conversation page size
    pub messages_per_page: u32,
    /// Default number of featured listings
    pub featured_limit: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            products_per_page: 12,
            messages_per_page: 20,
            featured_limit: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_sizes() {
        let config = MarketConfig::default();
        assert_eq!(config.products_per_page, 12);
        assert_eq!(config.messages_per_page, 20);
        assert_eq!(config.featured_limit, 8);
    }
}
