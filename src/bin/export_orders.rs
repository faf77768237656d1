//! Downloads the orders spreadsheet for a search and saves it to disk.
//!
//! Search inputs come from the environment:
//! `EXPORT_SEARCH` (free text), `EXPORT_DATE_FROM` / `EXPORT_DATE_TO`
//! (`YYYY-MM-DD`) and `EXPORT_DIR` (defaults to the working directory).

use std::env;

use dotenvy::dotenv;

use backoffice_client::domain::order::OrderFilters;
use backoffice_client::forms::filters::{DateRange, DateRangeForm};
use backoffice_client::models::config::ClientConfig;
use backoffice_client::repository::HttpRepository;
use backoffice_client::search::request::build_request;
use backoffice_client::search::state::FilterState;
use backoffice_client::services::export::{DOWNLOAD, DirectorySaver, save_download};
use backoffice_client::services::notifications::{LogNotifier, Notifier};
use backoffice_client::services::orders::download_orders;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let client_config = match ClientConfig::load(&app_env) {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let range = match DateRange::try_from(DateRangeForm {
        date_from: env::var("EXPORT_DATE_FROM").ok(),
        date_to: env::var("EXPORT_DATE_TO").ok(),
    }) {
        Ok(range) => range,
        Err(err) => {
            log::error!("Invalid export dates: {err}");
            std::process::exit(1);
        }
    };
    if !range.is_valid() {
        log::warn!("Date range is inverted; the export will likely be empty");
    }

    let repo = match HttpRepository::from_config(&client_config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Failed to build HTTP client: {err}");
            std::process::exit(1);
        }
    };

    let state = FilterState::new(client_config.page_size)
        .with_search_text(env::var("EXPORT_SEARCH").unwrap_or_default())
        .with_filters(OrderFilters {
            date_from: range.from,
            date_to: range.to,
            ..OrderFilters::default()
        });
    let request = build_request(&state);

    log::info!("Exporting orders from {}", client_config.api_url);

    let saver = DirectorySaver::new(env::var("EXPORT_DIR").unwrap_or_else(|_| ".".into()));
    let result = match download_orders(&repo, &request).await {
        Ok(download) => save_download(&saver, download).await,
        Err(err) => Err(err),
    };

    LogNotifier.notify(DOWNLOAD.notification(&result));
    if let Err(err) = result {
        log::error!("Export failed: {err}");
        std::process::exit(1);
    }
}
