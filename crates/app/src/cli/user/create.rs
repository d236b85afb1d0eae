use clap::Args;
use marketplace_app::domain::accounts::{
    AccountsService, PgAccountsService, data::NewUser, records::UserUuid,
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unique email address
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let user = PgAccountsService::new(db)
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: args.name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("user_email: {}", user.email);

    Ok(())
}
