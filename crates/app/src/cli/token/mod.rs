//! `token` commands: issue, inspect and revoke bearer API tokens.
//!
//! Every subcommand talks to the same database, so the connection string is
//! taken once at the group level and the auth service is opened before
//! dispatching.

use clap::{Args, Subcommand};
use marketplace_app::auth::PgAuthService;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a token for a user and print it once
    Create(create::CreateTokenArgs),

    /// Show a user's tokens without their secrets
    List(list::ListTokensArgs),

    /// Stop a token from authenticating
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    if let TokenSubcommand::Create(args) = &command.command {
        args.validate()?;
    }

    let db = crate::cli::connect(&command.database_url).await?;
    let auth = PgAuthService::new(db.pool().clone());

    match command.command {
        TokenSubcommand::Create(args) => create::run(&auth, args).await,
        TokenSubcommand::List(args) => list::run(&auth, args).await,
        TokenSubcommand::Revoke(args) => revoke::run(&auth, args).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cli::Cli;

    #[test]
    fn database_url_is_shared_by_the_group() {
        let parsed = Cli::try_parse_from([
            "marketplace-app",
            "token",
            "--database-url",
            "postgres://localhost/marketplace",
            "revoke",
            "--token-uuid",
            "0198c1de-0000-7000-8000-000000000000",
        ]);

        assert!(parsed.is_ok(), "expected revoke to parse: {parsed:?}");
    }

    #[test]
    fn create_requires_a_user() {
        let parsed = Cli::try_parse_from([
            "marketplace-app",
            "token",
            "--database-url",
            "postgres://localhost/marketplace",
            "create",
        ]);

        assert!(parsed.is_err(), "create without --user-uuid should fail");
    }
}
