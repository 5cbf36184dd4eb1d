//! Orders Data

use smallvec::SmallVec;

use crate::domain::products::records::ProductUuid;

/// One requested line of a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u32,
}

/// New Order Data
///
/// Items are processed in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub items: SmallVec<[NewOrderItem; 4]>,
}
