//! jukebox - catalog maintenance tool
//!
//! Opens the catalog database under the resolved root folder, wires the
//! services, dispatch tables and indexers together, and runs one command.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jukebox_common::config::{database_path, resolve_root_folder, TomlConfig};
use jukebox_common::db::init_database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jukebox_portlet::clp::{
    AlbumLocalServiceClpInvoker, AlbumServiceClpInvoker, ArtistLocalServiceClpInvoker,
    DispatchTable, SongLocalServiceClpInvoker,
};
use jukebox_portlet::search::{
    AlbumIndexer, InMemorySearchEngine, Indexer, IndexerRegistry, SearchEngine, SongIndexer,
};
use jukebox_portlet::service::{
    AlbumLocalService, AlbumLocalServiceImpl, AlbumServiceImpl, ArtistLocalService,
    ArtistLocalServiceImpl, SongLocalService, SongLocalServiceImpl,
};

/// Command-line arguments for jukebox
#[derive(Parser, Debug)]
#[command(name = "jukebox")]
#[command(about = "Jukebox catalog maintenance")]
#[command(version)]
struct Args {
    /// Root folder containing the catalog database
    #[arg(short, long)]
    root_folder: Option<String>,

    /// User id the remote album service acts as
    #[arg(long, default_value_t = 0)]
    principal_user_id: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the search documents of a company
    Reindex {
        #[arg(long)]
        company_id: i64,
    },
    /// Reindex a company and list the entries matching keywords
    Search {
        #[arg(long)]
        company_id: i64,

        /// Include entries in the trash
        #[arg(long)]
        include_trash: bool,

        keywords: String,
    },
    /// List every registered dispatch key
    Methods {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

struct Services {
    artists: Arc<dyn ArtistLocalService>,
    albums: Arc<dyn AlbumLocalService>,
    songs: Arc<dyn SongLocalService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_source) = TomlConfig::load_platform();

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting jukebox v{}", env!("CARGO_PKG_VERSION"));
    config_source.log();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let artists: Arc<dyn ArtistLocalService> = Arc::new(ArtistLocalServiceImpl::new(pool.clone()));
    let albums: Arc<dyn AlbumLocalService> =
        Arc::new(AlbumLocalServiceImpl::new(pool.clone(), Arc::clone(&artists)));
    let songs: Arc<dyn SongLocalService> =
        Arc::new(SongLocalServiceImpl::new(pool.clone(), Arc::clone(&albums)));
    let services = Services {
        artists,
        albums,
        songs,
    };

    match args.command {
        Command::Reindex { company_id } => {
            let registry = build_registry(&services, &config, Arc::new(InMemorySearchEngine::new()))?;
            let total = registry.reindex_all(company_id).await?;
            println!("Indexed {} documents for company {}", total, company_id);
        }
        Command::Search {
            company_id,
            include_trash,
            keywords,
        } => {
            let registry = build_registry(&services, &config, Arc::new(InMemorySearchEngine::new()))?;
            registry.reindex_all(company_id).await?;

            for class_name in registry.class_names() {
                let Some(indexer) = registry.get(class_name) else {
                    continue;
                };
                let query = indexer.query(&keywords).include_trash(include_trash);
                for document in indexer.search(company_id, &query).await? {
                    let summary = indexer.summary(&document);
                    println!("{}\t{}", class_name, summary.title);
                }
            }
        }
        Command::Methods { json } => {
            let tables = dispatch_tables(&services, args.principal_user_id)?;
            print_methods(&tables, json)?;
        }
    }

    pool.close().await;
    Ok(())
}

fn build_registry(
    services: &Services,
    config: &TomlConfig,
    engine: Arc<dyn SearchEngine>,
) -> Result<IndexerRegistry> {
    let mut registry = IndexerRegistry::new();
    registry.register(Arc::new(AlbumIndexer::new(
        Arc::clone(&services.albums),
        Arc::clone(&services.artists),
        Arc::clone(&engine),
        config.search.clone(),
    )))?;
    registry.register(Arc::new(SongIndexer::new(
        Arc::clone(&services.songs),
        Arc::clone(&services.albums),
        Arc::clone(&services.artists),
        engine,
        config.search.clone(),
    )))?;
    Ok(registry)
}

/// Build every invoker and return its table under the service's name
fn dispatch_tables(services: &Services, principal_user_id: i64) -> Result<Vec<(&'static str, DispatchTable)>> {
    let remote = Arc::new(AlbumServiceImpl::new(
        Arc::clone(&services.albums),
        principal_user_id,
    ));

    Ok(vec![
        (
            "AlbumLocalService",
            AlbumLocalServiceClpInvoker::new(Arc::clone(&services.albums))?.into_table(),
        ),
        ("AlbumService", AlbumServiceClpInvoker::new(remote)?.into_table()),
        (
            "ArtistLocalService",
            ArtistLocalServiceClpInvoker::new(Arc::clone(&services.artists))?.into_table(),
        ),
        (
            "SongLocalService",
            SongLocalServiceClpInvoker::new(Arc::clone(&services.songs))?.into_table(),
        ),
    ])
}

fn print_methods(tables: &[(&'static str, DispatchTable)], json: bool) -> Result<()> {
    if json {
        let listing: Vec<serde_json::Value> = tables
            .iter()
            .flat_map(|(service, table)| {
                table.entries().map(move |entry| {
                    serde_json::json!({
                        "service": service,
                        "name": entry.name(),
                        "parameterTypes": entry.parameter_types(),
                    })
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for (service, table) in tables {
        println!("{} ({} methods)", service, table.len());
        for entry in table.entries() {
            println!("  {}", entry);
        }
    }
    Ok(())
}
