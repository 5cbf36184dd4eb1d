//! Stores Data

use crate::domain::stores::records::StoreUuid;

/// New Store Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub url: String,
    pub address: String,
    pub whatsapp_contact: String,
}

/// Store Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}
