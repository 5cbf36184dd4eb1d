//! Store Records

use jiff::Timestamp;

use crate::{
    domain::{
        products::records::ProductRecord, services::records::ServiceRecord,
        vendors::records::VendorUuid,
    },
    uuids::TypedUuid,
};

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub vendor_uuid: VendorUuid,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    /// Globally unique slug among live stores.
    pub url: String,
    pub address: String,
    /// E.164 formatted `WhatsApp` number.
    pub whatsapp_contact: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A store with its live catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreDetails {
    pub store: StoreRecord,
    pub products: Vec<ProductRecord>,
    pub services: Vec<ServiceRecord>,
}
