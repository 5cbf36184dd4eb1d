//! Product Records

use jiff::Timestamp;

use crate::{domain::stores::records::StoreUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Unit price in minor currency units.
    pub price: u64,
    pub currency: String,
    pub stock: u32,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
