//! Service Records

use jiff::Timestamp;

use crate::{domain::stores::records::StoreUuid, uuids::TypedUuid};

/// Service UUID
pub type ServiceUuid = TypedUuid<ServiceRecord>;

/// Service Record
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub uuid: ServiceUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Rate in minor currency units.
    pub rate: u64,
    pub currency: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
