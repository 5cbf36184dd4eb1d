//! Products Data

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: u64,
    pub currency: String,
    pub stock: u32,
    pub category: Option<String>,
}

/// Product Update Data
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<u64>,
    pub currency: Option<String>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}
