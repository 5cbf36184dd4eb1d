use clap::{Args, Subcommand};

mod admin;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Give a user access to the admin endpoints
    GrantAdmin(admin::AdminArgs),
    /// Remove a user's admin access
    RevokeAdmin(admin::AdminArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::GrantAdmin(args) => admin::run(args, true).await,
        UserSubcommand::RevokeAdmin(args) => admin::run(args, false).await,
    }
}
