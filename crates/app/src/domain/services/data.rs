//! Services Data

use crate::domain::services::records::ServiceUuid;

/// New Service Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
    pub uuid: ServiceUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rate: u64,
    pub currency: String,
}

/// Service Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub rate: Option<u64>,
    pub currency: Option<String>,
}
