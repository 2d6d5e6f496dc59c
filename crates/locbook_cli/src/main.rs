//! Command-line front end for the location catalog.
//!
//! Prints JSON so output can be piped into other tools.

use clap::{Parser, Subcommand, ValueEnum};
use locbook_core::db::open_db;
use locbook_core::{
    default_log_level, init_logging, CatalogOptions, FilterPatch, GeoPoint, Location,
    LocationCatalog, LocationQuery, LocationSort, PageRequest, SortDirection, SortKey,
    SqliteDocumentRepository, DEFAULT_PAGE_SIZE,
};
use log::error;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// locbook - keep track of places worth returning to
#[derive(Parser)]
#[command(name = "locbook")]
#[command(version)]
struct Cli {
    /// Database file
    #[arg(long, global = true, default_value = "./locbook.db")]
    db: PathBuf,

    /// Absolute directory for log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Do not write demo locations into an empty database
    #[arg(long, global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List locations
    List {
        /// Case-insensitive pattern matched against names
        #[arg(long)]
        text: Option<String>,

        /// Minimum rating (inclusive); non-numeric values are ignored
        #[arg(long)]
        min_rate: Option<String>,

        #[arg(long, value_enum, default_value_t = SortField::Rate)]
        sort: SortField,

        #[arg(long, value_enum, default_value_t = Order::Desc)]
        order: Order,

        /// Zero-based page index; all rows are returned when omitted
        #[arg(long)]
        page: Option<usize>,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Show one location
    Show { id: String },
    /// Add a location
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        rate: i32,
        #[arg(long)]
        address: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value_t = 12)]
        zoom: u8,
    },
    /// Change the rating of a location
    Rate { id: String, rate: i32 },
    /// Remove a location
    Remove { id: String },
    /// Print rating and recency statistics
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortField {
    Rate,
    Name,
    Date,
}

impl From<SortField> for SortKey {
    fn from(value: SortField) -> Self {
        match value {
            SortField::Rate => SortKey::Rate,
            SortField::Name => SortKey::Name,
            SortField::Date => SortKey::Date,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Asc,
    Desc,
}

impl From<Order> for SortDirection {
    fn from(value: Order) -> Self {
        match value {
            Order::Asc => SortDirection::Ascending,
            Order::Desc => SortDirection::Descending,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let catalog = LocationCatalog::new(SqliteDocumentRepository::new(&conn));
    catalog.init(&CatalogOptions {
        seed_demo_data: !cli.no_seed,
    })?;

    let output = match cli.command {
        Command::List {
            text,
            min_rate,
            sort,
            order,
            page,
            page_size,
        } => {
            let mut query = LocationQuery::default();
            query.set_filter_by(FilterPatch { text, min_rate });
            query.set_sort_by(LocationSort::new(sort.into(), order.into()));
            query.set_page(page.map(|index| PageRequest::with_size(index, page_size)));
            serde_json::to_value(catalog.query(&query)?)?
        }
        Command::Show { id } => serde_json::to_value(catalog.get_by_id(&id)?)?,
        Command::Add {
            name,
            rate,
            address,
            lat,
            lng,
            zoom,
        } => {
            let location = Location::new(name, rate, GeoPoint::new(address, lat, lng, zoom));
            serde_json::to_value(catalog.save(location)?)?
        }
        Command::Rate { id, rate } => {
            let mut location = catalog.get_by_id(&id)?;
            location.rate = rate;
            serde_json::to_value(catalog.save(location)?)?
        }
        Command::Remove { id } => {
            catalog.remove(&id)?;
            json!({ "removed": id })
        }
        Command::Stats => json!({
            "byRate": catalog.loc_count_by_rate()?,
            "byUpdateTime": catalog.loc_count_by_update_time()?,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
