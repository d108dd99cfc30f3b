use clap::{Parser, Subcommand};

use crate::commands::{CheckIns, Expenses, Members, Payments, Plans, Reports};

#[derive(Parser, Debug)]
#[clap(name = "milo", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, env = "MILO_DB", default_value = "gym.sqlite3")]
    pub database: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the database
    #[clap(name = "init")]
    Init,

    /// Manage members
    #[clap(subcommand)]
    Members(Members),

    /// Manage membership plans
    #[clap(subcommand)]
    Plans(Plans),

    /// Record and list payments
    #[clap(subcommand)]
    Payments(Payments),

    /// Log gym visits
    #[clap(name = "checkins", subcommand)]
    CheckIns(CheckIns),

    /// Track expenses
    #[clap(subcommand)]
    Expenses(Expenses),

    /// Reporting views
    #[clap(subcommand)]
    Reports(Reports),
}
