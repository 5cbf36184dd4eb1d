//! Service Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod search;
pub(crate) mod store_index;
pub(crate) mod update;
