//! Stats Records

/// Row counts across the marketplace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsRecord {
    pub total_orders: u64,
    /// Live products only.
    pub total_products: u64,
    pub total_users: u64,
}
