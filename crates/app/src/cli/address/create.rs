use clap::Args;
use marketplace_app::domain::accounts::{
    AccountsService, PgAccountsService,
    data::NewAddress,
    records::{AddressUuid, UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateAddressArgs {
    /// User the address belongs to
    #[arg(long)]
    user_uuid: Uuid,

    /// Short label, e.g. "Home"
    #[arg(long)]
    title: String,

    #[arg(long)]
    recipient_name: String,

    #[arg(long)]
    phone: String,

    /// Street, city and postal code
    #[arg(long)]
    details: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAddressArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let address = PgAccountsService::new(db)
        .create_address(
            UserUuid::from_uuid(args.user_uuid),
            NewAddress {
                uuid: AddressUuid::new(),
                title: args.title,
                recipient_name: args.recipient_name,
                phone: args.phone,
                details: args.details,
            },
        )
        .await
        .map_err(|error| format!("failed to create address: {error}"))?;

    println!("address_uuid: {}", address.uuid);
    println!("address_title: {}", address.title);

    Ok(())
}
