//! Store Handlers

pub(crate) mod availability;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod orders;
pub(crate) mod update;
