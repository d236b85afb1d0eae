use clap::Args;
use marketplace_app::auth::{ApiTokenUuid, PgAuthService};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(auth: &PgAuthService, args: RevokeTokenArgs) -> Result<(), String> {
    let revoked = auth
        .revoke_api_token(ApiTokenUuid::from_uuid(args.token_uuid))
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was not active", args.token_uuid);
    }

    Ok(())
}
