//! Admin
//!
//! Every route here sits behind [`crate::auth::admin::require_admin`].

pub(crate) mod orders;
pub(crate) mod stats;
pub(crate) mod status;
