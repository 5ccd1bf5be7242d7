use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use aq3d_api::api::{HttpTransport, Transport};
use aq3d_api::config::{CollectionOptions, ExportFormat};
use aq3d_api::{Collection, Config, Dialog, Entity, Item, Map, RefreshOutcome, Server};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() {
    // 로깅 초기화: 콘솔 + 일별 로테이션 파일
    let file_appender = match tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("aq3d-export")
        .filename_suffix("log")
        .build("logs")
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("initializing rolling file appender failed: {}", e);
            return;
        }
    };

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(true)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = if args.is_empty() {
        Cow::from("./config.toml")
    } else {
        Cow::from(args.remove(0))
    };

    let config = match get_config(&*config_path).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return;
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Export failed: {}", e);
        tracing::error!("  {:?}", e);
    }
}

async fn get_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let mut f = File::open(path)
        .await
        .context("could not open config file")?;
    let mut toml = String::new();
    f.read_to_string(&mut toml)
        .await
        .context("could not read config file")?;
    let config = toml::from_str(&toml).context("could not parse config file")?;

    Ok(config)
}

async fn run(config: Config) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("aq3d-export/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()
        .context("could not build HTTP client")?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_client(http));

    tokio::fs::create_dir_all(&config.export.directory)
        .await
        .with_context(|| format!("could not create {}", config.export.directory.display()))?;

    if let Some(options) = config.servers.clone() {
        let servers = fetch::<Server>(&transport, &config, options).await?;
        tracing::info!("{}", servers.summary());
        write(&servers, &config, "servers")?;
    }

    if let Some(options) = config.items.clone() {
        let items = fetch::<Item>(&transport, &config, options).await?;
        write(&items, &config, "items")?;
    }

    if let Some(options) = config.maps.clone() {
        let maps = fetch::<Map>(&transport, &config, options).await?;
        tracing::info!("{} dungeons among {} maps", maps.dungeons().count(), maps.len());
        write(&maps, &config, "maps")?;
    }

    if let Some(options) = config.dialogs.clone() {
        let dialogs = fetch::<Dialog>(&transport, &config, options).await?;
        write(&dialogs, &config, "dialogs")?;
    }

    Ok(())
}

async fn fetch<E: Entity>(
    transport: &Arc<dyn Transport>,
    config: &Config,
    options: CollectionOptions,
) -> anyhow::Result<Collection<E>> {
    let name = E::ENDPOINT.name();
    let mut collection = Collection::<E>::new(Arc::clone(transport), config.api.base_url.clone(), options)
        .with_context(|| format!("invalid {} options", name))?;

    if let Some(range) = collection.range() {
        tracing::info!(
            "[{}] ids {}..={} in {} page(s) of up to {}",
            name,
            range.min_index(),
            range.max_index(),
            range.total_pages(),
            range.bulk_max()
        );
    }

    match collection
        .refresh()
        .await
        .with_context(|| format!("could not fetch {}", name))?
    {
        RefreshOutcome::Refreshed(report) if report.is_partial() => {
            let failed: Vec<String> = report
                .failed_pages
                .iter()
                .map(|p| format!("{}..={}", p.start, p.end))
                .collect();
            tracing::warn!("[{}] incomplete, missing pages: {}", name, failed.join(", "));
        }
        RefreshOutcome::Refreshed(_) => {}
        RefreshOutcome::Skipped => tracing::debug!("[{}] nothing to refresh", name),
    }

    Ok(collection)
}

fn write<E: Entity>(collection: &Collection<E>, config: &Config, stem: &str) -> anyhow::Result<()> {
    for format in &config.export.formats {
        let path = config
            .export
            .directory
            .join(format!("{}.{}", stem, format.extension()));

        match format {
            ExportFormat::Csv => collection.to_csv(&path),
            ExportFormat::Json => collection.to_json_file(&path),
        }
        .with_context(|| format!("could not write {}", path.display()))?;

        tracing::info!("wrote {} {} to {}", collection.len(), stem, path.display());
    }

    Ok(())
}
