//! `cargo run -p migration -- up` applies the catalog schema; reads
//! `DATABASE_URL` like the service does.

use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
