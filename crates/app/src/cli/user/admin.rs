use clap::Args;
use marketplace_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService},
};

#[derive(Debug, Args)]
pub(crate) struct AdminArgs {
    /// Identity-provider subject of the user
    #[arg(long)]
    subject: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: AdminArgs, is_admin: bool) -> Result<(), String> {
    if args.subject.trim().is_empty() {
        return Err("subject cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .set_admin(&args.subject, is_admin)
        .await
        .map_err(|error| format!("failed to update user '{}': {error}", args.subject))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_admin: {}", user.is_admin);

    Ok(())
}
