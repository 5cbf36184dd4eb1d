//! Marketplace domain services and persistence.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

pub mod uuids;
