//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use marketplace_app::domain::accounts::records::UserUuid;

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        let result = depot.user_uuid_or_401();

        assert!(
            result.is_err_and(|error| error.code == salvo::http::StatusCode::UNAUTHORIZED),
            "expected 401 without an authenticated user"
        );
    }

    #[test]
    fn inserted_user_is_returned() -> Result<(), StatusError> {
        let mut depot = Depot::new();
        let user = UserUuid::new();

        depot.insert_user_uuid(user);

        assert_eq!(depot.user_uuid_or_401()?, user);

        Ok(())
    }
}
