//! User Handlers

pub(crate) mod me;
pub(crate) mod update;
