// ==========================================
// 公交线路目录 - 命令行入口
// ==========================================
// 职责: clap 命令面 → AppState / RouteApi / CSV 编解码
// 输出: 结果写 stdout，日志写 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use transport_routes::api::ValidationError;
use transport_routes::app::AppState;
use transport_routes::config::get_default_db_path;
use transport_routes::domain::{Route, RoutePoint};
use transport_routes::importer::{export_to_path, import_from_path};
use transport_routes::{logging, RouteApi, APP_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "transport-routes",
    author,
    version,
    about = "Public transport route catalog",
    long_about = "Manages a catalog of bus routes between depots: add, edit, delete, \
                  sort and search routes, manage depots, and exchange the catalog \
                  as CSV.\n\n\
                  The database path defaults to the user data directory and can be \
                  overridden with --db or TRANSPORT_ROUTES_DB_PATH."
)]
struct Args {
    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<String>,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List routes in load order
    List {
        /// Sort by route number (stable) before listing
        #[arg(long)]
        sorted: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the first route with the given number
    Search { number: i32 },

    /// Add a route
    Add {
        /// Route number (1..=999)
        number: String,
        /// Start depot id
        #[arg(long)]
        start: i64,
        /// End depot id
        #[arg(long)]
        end: i64,
        /// Category codes, comma separated (e.g. "K,M")
        #[arg(long, default_value = "")]
        categories: String,
    },

    /// Replace an existing route
    Update {
        id: i64,
        number: String,
        #[arg(long)]
        start: i64,
        #[arg(long)]
        end: i64,
        #[arg(long, default_value = "")]
        categories: String,
    },

    /// Delete a route by id
    Delete { id: i64 },

    /// List depots
    Points,

    /// Add a depot
    AddPoint {
        description: String,
        #[arg(long, default_value = "")]
        locality: String,
        #[arg(long, default_value = "")]
        district: String,
    },

    /// Delete a depot that no route references
    DeletePoint { id: i64 },

    /// List special categories
    Categories,

    /// Export routes to CSV
    Export {
        file: PathBuf,
        /// Sort by route number before exporting
        #[arg(long)]
        sorted: bool,
    },

    /// Import routes from CSV (bad rows are skipped)
    Import { file: PathBuf },

    /// Show settings, or set one with KEY VALUE
    Config { key: Option<String>, value: Option<String> },
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logging::init_json();
    } else {
        logging::init(args.verbose);
    }

    tracing::debug!("{} v{}", APP_NAME, VERSION);

    let db_path = args.db.clone().unwrap_or_else(get_default_db_path);
    let mut state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    run(args.command, &mut state)
}

fn run(command: Command, state: &mut AppState) -> Result<()> {
    let api = &mut state.route_api;

    match command {
        Command::List { sorted, json } => {
            if sorted {
                api.sort_by_route_number();
            }
            if json {
                println!("{}", serde_json::to_string_pretty(api.routes().as_slice())?);
            } else {
                for route in api.routes() {
                    print_route(route, api);
                }
            }
        }

        Command::Search { number } => match api.search_by_route_number(number) {
            Some(route) => print_route(route, api),
            None => bail!("Route {} not found", number),
        },

        Command::Add { number, start, end, categories } => {
            let id = save_route(api, &number, start, end, &categories, None)?;
            println!("Added route {} (id {})", number.trim(), id);
        }

        Command::Update { id, number, start, end, categories } => {
            save_route(api, &number, start, end, &categories, Some(id))?;
            println!("Updated route id {}", id);
        }

        Command::Delete { id } => {
            if !api.delete_route(id)? {
                bail!("Route id {} not found", id);
            }
            println!("Deleted route id {}", id);
        }

        Command::Points => {
            for point in api.route_points()? {
                println!("{:>4}  {}", point.id(), point);
            }
        }

        Command::AddPoint { description, locality, district } => {
            let point = api.add_route_point(&RoutePoint::new(0, locality, district, description))?;
            println!("Added depot {} (id {})", point, point.id());
        }

        Command::DeletePoint { id } => {
            if !api.delete_route_point(id)? {
                bail!("Depot id {} not found", id);
            }
            println!("Deleted depot id {}", id);
        }

        Command::Categories => {
            for category in api.categories().categories() {
                println!(
                    "{}  {:<12} {} / {}",
                    category.code(),
                    category.name(),
                    category.bg_color(),
                    category.text_color()
                );
            }
        }

        Command::Export { file, sorted } => {
            if sorted {
                api.sort_by_route_number();
            }
            let rows = export_to_path(api.routes(), &file)
                .with_context(|| format!("Failed to export to {}", file.display()))?;
            println!("Exported {} routes to {}", rows, file.display());
        }

        Command::Import { file } => {
            let summary = import_from_path(&file, api)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!(
                "Imported {} of {} rows ({} skipped, {} depots created)",
                summary.imported, summary.total_rows, summary.skipped, summary.created_points
            );
        }

        Command::Config { key, value } => match (key, value) {
            (None, _) => {
                let snapshot = state
                    .config
                    .get_config_snapshot()
                    .map_err(|e| anyhow!(e.to_string()))?;
                println!("{}", snapshot);
            }
            (Some(key), None) => {
                let value = state.config.get_value(&key).map_err(|e| anyhow!(e.to_string()))?;
                println!("{}", value.unwrap_or_default());
            }
            (Some(key), Some(value)) => {
                state
                    .config
                    .set_value(&key, &value)
                    .map_err(|e| anyhow!(e.to_string()))?;
                println!("{}={}", key, value);
            }
        },
    }

    Ok(())
}

/// 按 id 取场站，解析类别后交给 RouteApi 校验保存
fn save_route(
    api: &mut RouteApi,
    number: &str,
    start: i64,
    end: i64,
    categories: &str,
    existing_id: Option<i64>,
) -> Result<i64> {
    let points = api.route_points()?;
    let start_point = points.iter().find(|p| p.id() == start);
    let end_point = points.iter().find(|p| p.id() == end);

    let codes = Route::parse_category_string(categories)
        .ok_or_else(|| ValidationError::InvalidCategoryCode(categories.to_string()))?;

    Ok(api.validate_and_save_route(number, start_point, end_point, &codes, existing_id)?)
}

fn print_route(route: &Route, api: &RouteApi) {
    let categories: Vec<String> = route
        .special_categories()
        .iter()
        .map(|&code| api.categories().resolve(code).name().to_string())
        .collect();

    println!(
        "{:>4}  {:>3}  {:<9} {} -> {}  [{}]",
        route.id(),
        route.route_number(),
        route.route_type().display_name(),
        route.start_point(),
        route.end_point(),
        categories.join(", ")
    );
}
