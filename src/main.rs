// src/main.rs - panel-admin command line entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};

use panel_admin::api::{ApiClient, ApiResponse, FileUpload};
use panel_admin::config::{AppConfig, ConfigLoader};
use panel_admin::controllers::{
    AnalyticsController, CustomerController, DashboardController, Filter, MediaController,
    OrderController, ProductController, ProductSortKey, SortOrder,
};
use panel_admin::error::Result;
use panel_admin::models::{
    AnalyticsPeriod, CustomerStatus, ExportFormat, ExportType, OrderStatus, SearchType,
    UploadedFile,
};
use panel_admin::platform::create_network;

#[derive(Parser)]
#[command(
    name = "panel-admin",
    version = panel_admin::VERSION,
    about = "Back-office client for the storefront REST API",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the configured and environment base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the backend answers
    Health,
    Products {
        #[command(subcommand)]
        action: ProductCommand,
    },
    Orders {
        #[command(subcommand)]
        action: OrderCommand,
    },
    Customers {
        #[command(subcommand)]
        action: CustomerCommand,
    },
    Pages {
        #[command(subcommand)]
        action: ListCommand,
    },
    Media {
        #[command(subcommand)]
        action: MediaCommand,
    },
    Settings {
        #[command(subcommand)]
        action: ShowCommand,
    },
    Social {
        #[command(subcommand)]
        action: ShowCommand,
    },
    /// Dashboard figures
    Stats,
    Analytics {
        #[arg(long, default_value = "30d")]
        period: AnalyticsPeriod,
    },
    Search {
        query: String,
        #[arg(long = "type", value_name = "TYPE")]
        kind: SearchType,
    },
    /// Print a collection export to stdout
    Export {
        kind: ExportType,
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },
    /// Upload a file through the generic upload endpoint
    Upload {
        path: PathBuf,
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
    /// Validate configuration
    ValidateConfig,
}

#[derive(Subcommand)]
enum ProductCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "name")]
        sort: ProductSortKey,
        #[arg(long)]
        desc: bool,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Move an order to a new status
    Status {
        id: String,
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum CustomerCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<CustomerStatus>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    List,
}

#[derive(Subcommand)]
enum MediaCommand {
    List,
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ShowCommand {
    Show,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::with_config_file(cli.config.as_ref())?.load()?;
    config.logging.level = config.logging.level.raised(cli.verbose, cli.debug);
    let _logging = panel_admin::logging::init(&config.logging)?;

    let network = create_network();
    let client = match &cli.api_url {
        Some(url) => ApiClient::with_base_url(network, url),
        None => ApiClient::from_config(network, &config.api),
    };
    tracing::debug!(base_url = client.base_url(), "Starting panel-admin v{}", panel_admin::VERSION);

    // Returning instead of exiting lets the log writers flush on drop
    let success = run(cli.command, client, &config).await?;
    Ok(if success { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run(command: Commands, client: ApiClient, config: &AppConfig) -> Result<bool> {
    match command {
        Commands::Health => emit(&client.health_check().await),
        Commands::Products { action } => products(action, client, config).await,
        Commands::Orders { action } => orders(action, client).await,
        Commands::Customers { action } => customers(action, client).await,
        Commands::Pages { action: ListCommand::List } => emit(&client.get_pages().await),
        Commands::Media { action } => media(action, client).await,
        Commands::Settings { action: ShowCommand::Show } => emit(&client.get_settings().await),
        Commands::Social { action: ShowCommand::Show } => emit(&client.get_social_media().await),
        Commands::Stats => {
            let mut dashboard = DashboardController::new(client);
            let loaded = dashboard.refresh().await;
            let rows = json!({
                "backendOnline": dashboard.backend_online(),
                "stats": dashboard.stats(),
            });
            emit(&listing(loaded, rows, dashboard.last_error()))
        }
        Commands::Analytics { period } => {
            let mut analytics = AnalyticsController::new(client);
            let loaded = analytics.select_period(period).await;
            let rows = json!({
                "period": analytics.period(),
                "data": analytics.data(),
                "monthlySalesTrend": analytics.data().and_then(|d| d.monthly_sales_trend()),
            });
            emit(&listing(loaded, rows, analytics.last_error()))
        }
        Commands::Search { query, kind } => emit(&client.search(&query, kind).await),
        Commands::Export { kind, format } => match client.export_data(kind, format).await {
            ApiResponse::Success { data } => {
                print!("{}", data);
                Ok(true)
            }
            failure => emit(&failure),
        },
        Commands::Upload { path, kind } => {
            let file = FileUpload::from_path(&path).await?;
            emit(&client.upload_file(file, kind.as_deref()).await)
        }
        Commands::ValidateConfig => validate_config(config),
    }
}

async fn products(action: ProductCommand, client: ApiClient, config: &AppConfig) -> Result<bool> {
    match action {
        ProductCommand::List {
            search,
            category,
            sort,
            desc,
        } => {
            let mut controller = ProductController::new(client, &config.dashboard);
            let loaded = controller.load().await;
            controller.search = search.unwrap_or_default();
            controller.category = category.map_or(Filter::All, Filter::Only);
            controller.sort_key = sort;
            controller.sort_order = if desc { SortOrder::Desc } else { SortOrder::Asc };

            let rows: Vec<_> = controller
                .visible()
                .into_iter()
                .map(|product| {
                    json!({
                        "id": product.id,
                        "name": product.name,
                        "category": product.category,
                        "price": product.price,
                        "priceLabel": controller.price_label(product),
                        "stock": product.stock,
                        "stockLevel": controller.stock_level(product),
                    })
                })
                .collect();
            emit(&listing(loaded, rows, controller.list().last_error()))
        }
        ProductCommand::Get { id } => emit(&client.get_product(&id).await),
        ProductCommand::Delete { id } => emit(&client.delete_product(&id).await),
    }
}

async fn orders(action: OrderCommand, client: ApiClient) -> Result<bool> {
    match action {
        OrderCommand::List { search, status } => {
            let mut controller = OrderController::new(client);
            let loaded = controller.load().await;
            controller.search = search.unwrap_or_default();
            controller.status = status.map_or(Filter::All, Filter::Only);

            let rows: Vec<_> = controller
                .visible()
                .into_iter()
                .map(|order| {
                    json!({
                        "id": order.id,
                        "customer": order.customer_name,
                        "total": order.total,
                        "items": order.item_count(),
                        "status": order.status,
                        "statusLabel": order.status.label_fr(),
                        "createdAt": order.created_at,
                    })
                })
                .collect();
            emit(&listing(loaded, rows, controller.list().last_error()))
        }
        OrderCommand::Status { id, status } => emit(&client.update_order_status(&id, status).await),
    }
}

async fn customers(action: CustomerCommand, client: ApiClient) -> Result<bool> {
    match action {
        CustomerCommand::List { search, status } => {
            let mut controller = CustomerController::new(client);
            let loaded = controller.load().await;
            controller.search = search.unwrap_or_default();
            controller.status = status.map_or(Filter::All, Filter::Only);

            let rows: Vec<_> = controller.visible().into_iter().cloned().collect();
            emit(&listing(loaded, rows, controller.list().last_error()))
        }
        CustomerCommand::Delete { id } => emit(&client.delete_customer(&id).await),
    }
}

async fn media(action: MediaCommand, client: ApiClient) -> Result<bool> {
    match action {
        MediaCommand::List => emit(&client.get_media().await),
        MediaCommand::Upload { paths } => {
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(FileUpload::from_path(path).await?);
            }

            let requested = files.len();
            let mut controller = MediaController::new(client);
            let uploaded = controller.upload_files(files).await;

            let report = upload_report(requested, controller.uploaded_files());
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(uploaded == requested)
        }
    }
}

fn listing<T>(loaded: bool, rows: T, error: Option<&str>) -> ApiResponse<T> {
    if loaded {
        ApiResponse::success(rows)
    } else {
        ApiResponse::failure(error.unwrap_or_default())
    }
}

fn emit<T: Serialize>(envelope: &ApiResponse<T>) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.is_success())
}

/// Envelope for a batch upload. A partial batch still lists the files that
/// made it so they are not uploaded twice.
fn upload_report(requested: usize, uploaded: &[UploadedFile]) -> Value {
    if uploaded.len() == requested {
        return json!({ "success": true, "data": uploaded });
    }
    json!({
        "success": false,
        "error": format!("{} of {} uploads failed", requested - uploaded.len(), requested),
        "uploaded": uploaded,
    })
}

fn validate_config(config: &AppConfig) -> Result<bool> {
    println!("Validating configuration...");

    let errors = config.validate();
    if errors.is_empty() {
        println!("✅ Configuration is valid");
        println!("   API: {}", config.api.base_url);
        println!("   Log level: {}", config.logging.level.as_str());
        println!("   Version: {}", panel_admin::VERSION);
        return Ok(true);
    }

    for error in &errors {
        println!("❌ {}", error);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(filename: &str) -> UploadedFile {
        UploadedFile {
            file_url: format!("/uploads/{}", filename),
            filename: filename.to_string(),
            original_name: filename.to_string(),
            size: 1024,
        }
    }

    #[test]
    fn test_complete_upload_report() {
        let files = vec![uploaded("a.png"), uploaded("b.png")];
        let report = upload_report(2, &files);

        assert_eq!(report["success"], json!(true));
        assert_eq!(report["data"].as_array().unwrap().len(), 2);
        assert!(report.get("error").is_none());
    }

    #[test]
    fn test_partial_upload_report_lists_stored_files() {
        let files = vec![uploaded("a.png")];
        let report = upload_report(3, &files);

        assert_eq!(report["success"], json!(false));
        assert_eq!(report["error"], json!("2 of 3 uploads failed"));
        assert_eq!(report["uploaded"][0]["filename"], json!("a.png"));
        assert_eq!(report["uploaded"][0]["fileUrl"], json!("/uploads/a.png"));
    }

    #[test]
    fn test_invalid_config_reports_failure_without_exiting() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();

        assert!(!validate_config(&config).unwrap());
        assert!(validate_config(&AppConfig::default()).unwrap());
    }
}
