use clap::Args;
use jiff::Timestamp;
use marketplace_app::{auth::PgAuthService, domain::accounts::records::UserUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// User the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<String>,
}

impl CreateTokenArgs {
    /// Checked before connecting so a bad timestamp fails fast.
    pub(crate) fn validate(&self) -> Result<(), String> {
        self.expires_at().map(|_| ())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, String> {
        let Some(raw) = self.token_expires_at.as_deref() else {
            return Ok(None);
        };

        let expires_at = raw
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))?;

        if expires_at <= Timestamp::now() {
            return Err("token-expires-at must be in the future".to_string());
        }

        Ok(Some(expires_at))
    }
}

pub(crate) async fn run(auth: &PgAuthService, args: CreateTokenArgs) -> Result<(), String> {
    let issued = auth
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.expires_at()?)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_uuid: {}", issued.metadata.user_uuid);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
