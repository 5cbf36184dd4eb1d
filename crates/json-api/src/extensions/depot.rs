//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use marketplace_app::{auth::AuthenticatedUser, domain::vendors::records::VendorUuid};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the caller resolved by the auth middleware.
    fn insert_current_user(&mut self, user: AuthenticatedUser);

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;

    /// The caller's vendor profile. Callers without one get 403.
    fn current_vendor_or_403(&self) -> Result<VendorUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.inject(user);
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn current_vendor_or_403(&self) -> Result<VendorUuid, StatusError> {
        self.current_user_or_401()?
            .vendor
            .ok_or_else(|| StatusError::forbidden().brief("A vendor profile is required"))
    }
}
