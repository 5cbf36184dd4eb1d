//! Vendor Records

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

/// Vendor UUID
pub type VendorUuid = TypedUuid<VendorRecord>;

/// Vendor Record
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRecord {
    pub uuid: VendorUuid,
    /// `None` once the owning user has been deleted.
    pub user_uuid: Option<UserUuid>,
    pub display_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// True while the vendor owns at least one live store.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
