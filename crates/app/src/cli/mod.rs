use clap::{Parser, Subcommand};
use marketplace_app::database::{self, Db};

mod address;
mod category;
mod store;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "marketplace-app", about = "Marketplace admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Store(store::StoreCommand),
    Address(address::AddressCommand),
    Category(category::CategoryCommand),
    Token(token::TokenCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Store(command) => store::run(command).await,
            Commands::Address(command) => address::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Token(command) => token::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
