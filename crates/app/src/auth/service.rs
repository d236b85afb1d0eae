//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenSecret, ApiTokenUuid, ApiTokenVersion, AuthServiceError,
        IssuedApiToken, format_api_token, models::NewApiToken, parse_api_token,
        repository::PgAuthRepository, token_verifier, verifiers_match,
    },
    domain::accounts::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// The raw token is only ever returned here; storage keeps its verifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] when the user does not exist,
    /// or a storage error when the insert fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash: token_verifier(token_uuid, version, user_uuid, &secret),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: format_api_token(token_uuid, version, &secret),
            metadata,
        })
    }

    /// List all tokens for the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(user_uuid).await?)
    }

    /// Revoke a token. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token).await?.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed bearer token");

            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = token_verifier(
            parsed.token_uuid,
            parsed.version,
            token.user_uuid,
            &parsed.secret,
        );

        if !verifiers_match(&expected, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Authentication does not depend on this write.
        if let Err(error) = self.repository.touch_api_token(parsed.token_uuid).await {
            warn!(%error, token_uuid = %parsed.token_uuid, "failed to record token use");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("buyer@example.com").await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(user, None).await?;

        assert!(issued.token.starts_with("mk_v1_"), "unexpected token format");
        assert_eq!(issued.metadata.user_uuid, user);

        let authenticated = auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, user);

        let listed = auth.list_api_tokens(user).await?;

        assert_eq!(listed.len(), 1);
        assert!(
            listed.first().is_some_and(|token| token.last_used_at.is_some()),
            "authentication should record last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("buyer@example.com").await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(user, None).await?;

        let (id, secret) = issued.token.split_once('.').ok_or("token has a secret")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{}", &secret[1..]);

        let result = auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_and_expired_tokens_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("buyer@example.com").await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let revoked = auth.issue_api_token(user, None).await?;

        assert!(auth.revoke_api_token(revoked.metadata.uuid).await?);
        assert!(
            !auth.revoke_api_token(revoked.metadata.uuid).await?,
            "second revoke should report an inactive token"
        );

        let expired = auth
            .issue_api_token(
                user,
                Some(Timestamp::now().checked_sub(SignedDuration::from_secs(60))?),
            )
            .await?;

        for token in [revoked.token, expired.token] {
            let result = auth.authenticate_bearer(&token).await;

            assert!(
                matches!(result, Err(AuthServiceError::NotFound)),
                "expected NotFound, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let result = auth.issue_api_token(UserUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }
}
