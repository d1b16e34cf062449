use std::env;
use std::path::{Path, PathBuf};

use rowkit_core::config::Config;
use rowkit_core::registry::{DescriptorProvider, DescriptorRegistry};
use rowkit_core::traits::Transformer;
use rowkit_core::types::{ComponentKind, InputColumn, InputRow};
use rowkit_search::{SearchDocument, SearchIndex, SearchTransformer};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <index|lookup> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

/// Field layout of the documents the CLI indexes.
fn document_fields() -> Vec<String> {
    vec!["doc_path".to_string(), "title".to_string(), "body".to_string()]
}

fn collect_documents(data_dir: &Path) -> anyhow::Result<Vec<SearchDocument>> {
    let mut documents = Vec::new();
    for entry in walkdir::WalkDir::new(data_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }
        let body = std::fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        documents.push(vec![
            ("doc_path".to_string(), path.to_string_lossy().to_string()),
            ("title".to_string(), title),
            ("body".to_string(), body),
        ]);
    }
    Ok(documents)
}

fn index_dir_from(config: &Config) -> PathBuf {
    let dir: String = config
        .get("search.index_dir")
        .unwrap_or_else(|_| "./data/index".to_string());
    PathBuf::from(dir)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "index" => {
            let data_dir = args.get(0).map(PathBuf::from).unwrap_or_else(|| {
                let dir: String = config
                    .get("search.data_dir")
                    .unwrap_or_else(|_| "./data/txt".to_string());
                PathBuf::from(dir)
            });
            let index_dir = index_dir_from(&config);
            println!("Indexing .txt files from {}", data_dir.display());
            let documents = collect_documents(&data_dir)?;
            if documents.is_empty() {
                println!("No .txt files found under {}.", data_dir.display());
                return Ok(());
            }
            let index = SearchIndex::create(&index_dir, &document_fields())?;
            let count = index.add_documents(&documents)?;
            println!("Indexed {} documents into {}", count, index_dir.display());
        }
        "lookup" => {
            let query_text = args.get(0).cloned().unwrap_or_else(|| {
                eprintln!("Usage: rowkit lookup \"<query>\"");
                std::process::exit(1)
            });

            // Resolve the transformer through the registry the way a job
            // reader would, rather than constructing it directly.
            let mut registry = DescriptorRegistry::new();
            registry.register(SearchTransformer::descriptor());
            let descriptor = registry
                .descriptor_by_display_name(
                    ComponentKind::Transformer,
                    rowkit_search::transformer::DISPLAY_NAME,
                )
                .ok_or_else(|| {
                    rowkit_core::error::Error::UnknownComponent(
                        rowkit_search::transformer::DISPLAY_NAME.to_string(),
                    )
                })?;
            tracing::info!(component = %descriptor.display_name, "resolved component");

            let index_dir = index_dir_from(&config);
            let index = SearchIndex::open(&index_dir)?;
            let transformer =
                SearchTransformer::new(InputColumn::text("query"), index.searcher()?);

            let row = InputRow::new().with_cell("query", serde_json::Value::from(query_text));
            let cells = transformer.transform(&row)?;

            let mut output = serde_json::Map::new();
            for (name, cell) in transformer.output_columns().names().iter().zip(cells) {
                output.insert((*name).to_string(), cell);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
