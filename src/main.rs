use sticker_crawler::{CrawlRequest, CrawlerConfig, CrawlerService};
use tower::Service;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // ログ設定
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match CrawlerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut service = CrawlerService::new();
    match service.call(CrawlRequest::from(config)).await {
        Ok(report) => {
            if let Some(path) = report.label_path {
                info!("Labels written to {:?}", path);
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
