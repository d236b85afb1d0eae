//! Response helpers shared by the create handlers.

use salvo::{
    http::{StatusCode, header::LOCATION},
    prelude::{Response, StatusError},
};
use tracing::error;

pub(crate) trait ResponseCreatedExt {
    /// Answer `201 Created` pointing at the new resource.
    fn created(&mut self, location: &str) -> Result<(), StatusError>;
}

impl ResponseCreatedExt for Response {
    fn created(&mut self, location: &str) -> Result<(), StatusError> {
        self.add_header(LOCATION, location, true).map_err(|source| {
            error!(location, "failed to set location header: {source}");

            StatusError::internal_server_error()
        })?;

        self.status_code(StatusCode::CREATED);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn created_sets_status_and_location() -> TestResult {
        let mut res = Response::new();

        res.created("/orders/0198c1de-0000-7000-8000-000000000000")?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            res.headers().get(LOCATION).and_then(|value| value.to_str().ok()),
            Some("/orders/0198c1de-0000-7000-8000-000000000000")
        );

        Ok(())
    }

    #[test]
    fn unencodable_location_is_an_internal_error() {
        let mut res = Response::new();

        let result = res.created("/orders/\n");

        assert_eq!(
            result.map_err(|error| error.code),
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_ne!(res.status_code, Some(StatusCode::CREATED));
    }
}
