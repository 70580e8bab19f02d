//! Bookwatch - book price tracker
//!
//! Manages tracked book listings and runs the scrape/aggregate/report
//! batch, once or on a schedule.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use bookwatch::{batch, database, fetch, LogNotifier};

/// Book price tracker - scrapes bookstore listings and reports price trends
#[derive(Parser, Debug)]
#[command(name = "bookwatch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a book listing to be tracked
    Add {
        /// The ISBN-13 of the book
        #[arg(long)]
        isbn: u64,
        /// The name of the bookstore
        #[arg(long)]
        bookstore: String,
        /// The listing URL to watch
        #[arg(long)]
        url: String,
    },
    /// List all tracked book listings
    List,
    /// Stop watching a listing's price
    Pause {
        #[arg(long)]
        isbn: u64,
        #[arg(long)]
        bookstore: String,
    },
    /// Resume watching a listing's price
    Resume {
        #[arg(long)]
        isbn: u64,
        #[arg(long)]
        bookstore: String,
    },
    /// Delete a listing from tracking (its history stays)
    Remove {
        #[arg(long)]
        isbn: u64,
        #[arg(long)]
        bookstore: String,
    },
    /// Run one scrape/aggregate/report batch and exit
    Run,
    /// Run batches on a fixed schedule
    Watch {
        /// Hours between batch runs
        #[arg(long, default_value_t = 24)]
        interval_hours: u64,
    },
}

/// Default database path: ~/.local/share/bookwatch/bookwatch.db (or the
/// platform equivalent)
fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookwatch")
        .join("bookwatch.db")
        .to_string_lossy()
        .to_string()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);

    if let Some(parent) = db_path.parent() {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create database directory: {}", e);
                std::process::exit(1);
            }
        }
    }

    let conn = match Connection::open(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("Failed to open database {}: {}", db_path.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database::init_schema(&conn) {
        log::error!("Failed to initialize database schema: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = dispatch(&conn, args.command) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(conn: &Connection, command: Command) -> bookwatch::Result<()> {
    match command {
        Command::Add {
            isbn,
            bookstore,
            url,
        } => {
            database::add_tracked(conn, isbn, &bookstore, &url)?;
            println!("Book with ISBN {} from {} is now tracked", isbn, bookstore);
        }
        Command::List => {
            let items = database::list_tracked(conn)?;
            if items.is_empty() {
                println!("No tracked books");
            }
            for item in items {
                let status = if item.watch_status { "watching" } else { "paused" };
                println!("{}  {:<16} {:<8} {}", item.isbn, item.bookstore, status, item.url);
            }
        }
        Command::Pause { isbn, bookstore } => {
            report_toggle(database::set_watch_status(conn, isbn, &bookstore, false)?, isbn, &bookstore, "paused");
        }
        Command::Resume { isbn, bookstore } => {
            report_toggle(database::set_watch_status(conn, isbn, &bookstore, true)?, isbn, &bookstore, "resumed");
        }
        Command::Remove { isbn, bookstore } => {
            report_toggle(database::remove_tracked(conn, isbn, &bookstore)?, isbn, &bookstore, "removed");
        }
        Command::Run => {
            let client = fetch::client()?;
            batch::run(conn, &client, &LogNotifier)?;
        }
        Command::Watch { interval_hours } => {
            let client = fetch::client()?;
            log::info!("Watching, one batch every {} hour(s)", interval_hours);
            loop {
                if let Err(e) = batch::run(conn, &client, &LogNotifier) {
                    log::error!("Batch run failed: {}", e);
                }
                std::thread::sleep(Duration::from_secs(interval_hours * 3600));
            }
        }
    }
    Ok(())
}

fn report_toggle(changed: bool, isbn: u64, bookstore: &str, verb: &str) {
    if changed {
        println!("Book with ISBN {} from {} {}", isbn, bookstore, verb);
    } else {
        println!("No tracked book with ISBN {} from {}", isbn, bookstore);
    }
}
