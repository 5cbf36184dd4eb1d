//! Vendors Data

use crate::domain::vendors::records::VendorUuid;

/// New Vendor Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendor {
    pub uuid: VendorUuid,
    pub display_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Vendor Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorUpdate {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
