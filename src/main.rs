use anyhow::Result;
use clap::Parser as _;

use sismika_core::{entities::Timestamp, usecases};
use sismika_db_sqlite::{run_embedded_database_migrations, Connections};

mod cli;
mod config;
mod import;

use crate::{
    cli::{Cli, Command, ImportDataset},
    config::Config,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::try_load_from_file_or_default(cli.config.as_deref())?;
    log::debug!(
        "Sessions expire after {:?}; the first sign-in grants {} permission",
        config.sessions.ttl,
        config.sessions.first_login_permission
    );

    let connections = Connections::init(&config.db.conn_sqlite, config.db.conn_pool_size.into())?;
    run_embedded_database_migrations(connections.exclusive()?)?;

    match cli.command {
        Command::Import { dataset } => run_import(&connections, dataset)?,
        Command::BackfillTitles => {
            let rewritten = usecases::backfill_titles(&connections.exclusive()?)?;
            println!("Rewrote {rewritten} event titles");
        }
        Command::PurgeSessions => {
            let purged =
                usecases::purge_expired_sessions(&connections.exclusive()?, Timestamp::now())?;
            println!("Purged {purged} expired sessions");
        }
        Command::Stats => print_stats(&connections)?,
    }
    Ok(())
}

fn run_import(connections: &Connections, dataset: ImportDataset) -> Result<()> {
    let conn = connections.exclusive()?;
    match dataset {
        ImportDataset::Locations { csv } => {
            let count = usecases::import_locations(&conn, import::read_locations(&csv)?)?;
            println!("Imported {count} gazetteer entries");
        }
        ImportDataset::Earthquakes { csv } => {
            let reports = import::read_earthquakes(&csv)?;
            let total = reports.len();
            let imported = usecases::import_earthquakes(&conn, reports)?;
            println!("Imported {imported} of {total} earthquake reports");
        }
        ImportDataset::Stations { csv } => {
            let stations = import::read_stations(&csv)?;
            let total = stations.len();
            let created = usecases::import_stations(&conn, stations)?;
            println!("Imported {created} of {total} stations");
        }
    }
    Ok(())
}

fn print_stats(connections: &Connections) -> Result<()> {
    use sismika_core::repositories::*;

    let conn = connections.shared()?;
    println!("earthquakes   {}", conn.count_earthquakes()?);
    println!("locations     {}", conn.count_locations()?);
    println!("stations      {}", conn.count_stations()?);
    println!("evac centers  {}", conn.count_evac_centers()?);
    println!("users         {}", conn.count_users()?);
    Ok(())
}
