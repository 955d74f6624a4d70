//! routegen: compile OpenAPI specs into RESTful route tables.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openapi_routegen::emit::RouteTable;
use openapi_routegen::spec::Document;
use openapi_routegen::tree::RouteTree;
use openapi_routegen::{build_lookup, classify, mount};

#[derive(Parser)]
#[command(name = "routegen")]
#[command(about = "Compile OpenAPI specs into RESTful route tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the expanded route table
    Routes {
        /// OpenAPI document (.json, .yaml or .yml)
        file: PathBuf,
    },
    /// Print the routing tree with modes and synthesized actions
    Tree {
        file: PathBuf,
        /// Plain endpoint dump instead of the classified view
        #[arg(long)]
        plain: bool,
    },
    /// Serve a stub implementation of the compiled API
    Serve {
        file: PathBuf,
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openapi_routegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Routes { file } => {
            let (_, table) = compile(&file)?;
            for row in table.rows() {
                println!(
                    "{:6} {:40} {} [{}]",
                    row.verb.to_string(),
                    row.path,
                    row.handler(),
                    row.name
                );
            }
        }
        Commands::Tree { file, plain } => {
            let document = load(&file)?;
            let tree = RouteTree::from_endpoints(document.endpoints()?);
            if plain {
                print!("{}", tree.dump());
            } else {
                print!("{}", classify::describe(&tree));
            }
        }
        Commands::Serve { file, bind } => {
            let document = load(&file)?;
            let endpoints = document.endpoints()?;
            let tree = RouteTree::from_endpoints(endpoints);
            let table = RouteTable::from_tree(&tree);
            let lookup = build_lookup(
                tree.endpoints().iter().map(|(_, e)| *e),
                &table,
            );

            tracing::info!(
                routes = table.rows().len(),
                handlers = lookup.len(),
                "Compiled spec"
            );

            let app = mount::with_schema(mount::stub_router(&table), &document)
                .layer(TraceLayer::new_for_http());

            let listener = TcpListener::bind(&bind).await?;
            tracing::info!(address = %listener.local_addr()?, "Serving stub API");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);
    let document = if by_extension {
        Document::from_yaml(&source)?
    } else {
        Document::from_json(&source)?
    };
    Ok(document)
}

fn compile(path: &Path) -> Result<(RouteTree, RouteTable), Box<dyn std::error::Error>> {
    let document = load(path)?;
    let tree = RouteTree::from_endpoints(document.endpoints()?);
    let table = RouteTable::from_tree(&tree);
    Ok((tree, table))
}
