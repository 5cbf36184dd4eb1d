//! Inbound Webhooks

pub(crate) mod identity;
