use clap::Args;
use marketplace_app::domain::accounts::{
    AccountsService, PgAccountsService,
    data::NewStore,
    records::{StoreUuid, UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateStoreArgs {
    /// User who will own the store
    #[arg(long)]
    user_uuid: Uuid,

    /// Store display name
    #[arg(long)]
    name: String,

    /// Optional store photo URL
    #[arg(long)]
    photo_url: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateStoreArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let store = PgAccountsService::new(db)
        .create_store(
            UserUuid::from_uuid(args.user_uuid),
            NewStore {
                uuid: StoreUuid::new(),
                name: args.name,
                photo_url: args.photo_url,
            },
        )
        .await
        .map_err(|error| format!("failed to create store: {error}"))?;

    println!("store_uuid: {}", store.uuid);
    println!("store_name: {}", store.name);
    println!("owner_uuid: {}", store.user_uuid);

    Ok(())
}
