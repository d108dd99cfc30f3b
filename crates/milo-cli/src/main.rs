use anyhow::Result;

use milo_cli::cli::{Cli, Command};
use milo_db::{schema, Connection};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    let conn = Connection::open(&cli.database).await?;
    match cli.command {
        Command::Init => {
            schema::install(&conn).await?;
            println!("database schema installed");
            Ok(())
        }
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Plans(cmd) => cmd.run(&conn).await,
        Command::Payments(cmd) => cmd.run(&conn).await,
        Command::CheckIns(cmd) => cmd.run(&conn).await,
        Command::Expenses(cmd) => cmd.run(&conn).await,
        Command::Reports(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
