//! CLI: inspect and edit file-backed treeflow workspaces.
//!
//! Each invocation loads the workspace snapshot, applies one command, and
//! saves it back synchronously.
//!
//! Usage: `treeflow [OPTIONS] <COMMAND>`
//! Example: treeflow --workspace career add-children root 3
//!
//! Set RUST_LOG=treeflow=trace for TRACE-level span enter/exit and events.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use treeflow::generation::GeneratedTree;
use treeflow::types::tree_id_for;
use treeflow::{
  BuildOutcome, ConnectionType, EngineConfig, LayeredLayout, PersistenceAdapter, TreeLayout,
  WorkspaceStore, build_from_tree,
};

/// Inspect and edit file-backed treeflow workspaces.
#[derive(Parser, Debug)]
#[command(name = "treeflow")]
#[command(
  after_help = r#"Environment variables:
  TREEFLOW_STORAGE_DIR      Directory of saved snapshots (default: .treeflow).
  TREEFLOW_NODE_DELAY_MS    Pause before each revealed node during `build`.
  TREEFLOW_EDGE_DELAY_MS    Pause before each revealed edge during `build`.

Examples:
  treeflow show
  treeflow --workspace career build --instant
  treeflow connect node-1 node-2 --kind dependency --label needs"#
)]
struct Args {
  /// Directory of saved snapshots. Falls back to TREEFLOW_STORAGE_DIR, then .treeflow
  #[arg(long, value_name = "DIR", env = "TREEFLOW_STORAGE_DIR")]
  storage_dir: Option<PathBuf>,

  /// Workspace id to operate on
  #[arg(long, short, default_value = "body")]
  workspace: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List tree ids with saved snapshots
  List,
  /// Print nodes and edges of the workspace
  Show,
  /// Replace the graph with a laid-out tree, revealed progressively
  Build {
    /// JSON file with `nodes` and `edges`; the starter tree when omitted
    #[arg(long, value_name = "FILE")]
    from: Option<PathBuf>,
    /// Reveal without pauses
    #[arg(long)]
    instant: bool,
  },
  /// Add up to 10 children under a node
  AddChildren { parent: String, count: usize },
  /// Delete a node and its whole subtree
  DeleteNode { id: String },
  /// Copy a node's subtree next to it
  Duplicate { id: String },
  /// Connect two nodes
  Connect {
    source: String,
    target: String,
    #[arg(long, default_value = "child")]
    kind: ConnectionType,
    #[arg(long)]
    label: Option<String>,
  },
  /// Write the workspace as a standalone JSON file into DIR
  Export { dir: PathBuf },
  /// Replace the workspace with an exported JSON file
  Import { path: PathBuf },
  /// Clear the saved snapshot and start over
  Reset,
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
  eprintln!("Error {context}: {err}");
  process::exit(1);
}

fn print_graph(store: &WorkspaceStore) {
  println!("Workspace {} ({})", store.meta().name, store.tree_id());
  println!("  Nodes: {}", store.nodes().len());
  for n in store.nodes() {
    println!(
      "    {} [{}] {:?} @ ({}, {})",
      n.id, n.kind, n.data.title, n.position.x, n.position.y
    );
  }
  println!("  Edges: {}", store.edges().len());
  for e in store.edges() {
    match &e.label {
      Some(label) => println!("    {} -> {} ({}, {:?})", e.source, e.target, e.connection_type, label),
      None => println!("    {} -> {} ({})", e.source, e.target, e.connection_type),
    }
  }
}

fn load_tree_file(path: &PathBuf) -> GeneratedTree {
  let text = match std::fs::read_to_string(path) {
    Ok(s) => s,
    Err(e) => fail(&format!("reading {}", path.display()), e),
  };
  let tree: GeneratedTree = match serde_json::from_str(&text) {
    Ok(t) => t,
    Err(e) => fail(&format!("parsing {}", path.display()), e),
  };
  if let Err(e) = tree.validate() {
    fail(&format!("validating {}", path.display()), e);
  }
  tree
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let mut config = EngineConfig::from_env();
  if let Some(dir) = args.storage_dir.clone() {
    config.storage_dir = dir;
  }
  info!(storage_dir = %config.storage_dir.display(), workspace = %args.workspace, "options (env or flags)");

  let adapter = PersistenceAdapter::file(config.storage_dir.clone());
  let tree_id = tree_id_for(&args.workspace);

  let mut store = WorkspaceStore::new(tree_id.clone(), args.workspace.clone());
  if !matches!(args.command, Command::List) {
    store.load_tree(&adapter, &tree_id);
  }

  match args.command {
    Command::List => {
      match adapter.tree_ids() {
        Ok(ids) => ids.iter().for_each(|id| println!("{id}")),
        Err(e) => fail("listing snapshots", e),
      }
      return;
    }
    Command::Show => {
      print_graph(&store);
      return;
    }
    Command::Build { from, instant } => {
      let tree = from.as_ref().map(load_tree_file).unwrap_or_else(GeneratedTree::fallback);
      let (nodes, edges) = tree.into_graph();
      let (nodes, edges) = LayeredLayout::default().layout(nodes, edges);
      let mut options = config.build_options();
      if instant {
        options = options.with_delays(Duration::ZERO, Duration::ZERO);
      }
      let shared = store.into_shared();
      let outcome = build_from_tree(shared.clone(), nodes, edges, options).await;
      info!(?outcome, "build finished");
      if let BuildOutcome::Completed { revealed } = outcome {
        println!("Built {revealed} nodes.");
      }
      store = shared.lock().await.clone();
    }
    Command::AddChildren { parent, count } => {
      let ids = store.add_multiple_children(&parent, count);
      if ids.is_empty() {
        fail("adding children", format!("no children added under {parent:?}"));
      }
      ids.iter().for_each(|id| println!("{id}"));
    }
    Command::DeleteNode { id } => {
      if !store.delete_node(&id) {
        fail("deleting node", format!("nothing removed for {id:?}"));
      }
    }
    Command::Duplicate { id } => match store.duplicate_subtree(&id) {
      Some(copy) => println!("{copy}"),
      None => fail("duplicating", format!("cannot duplicate {id:?}")),
    },
    Command::Connect {
      source,
      target,
      kind,
      label,
    } => match store.create_connection(&source, &target, kind, label.as_deref()) {
      Some(edge_id) => println!("{edge_id}"),
      None => fail("connecting", format!("{source:?} -> {target:?} rejected")),
    },
    Command::Export { dir } => {
      match store.export_tree(&dir) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => fail("exporting", e),
      }
      return;
    }
    Command::Import { path } => {
      if let Err(e) = store.import_tree(&adapter, &tree_id, &path) {
        fail(&format!("importing {}", path.display()), e);
      }
      print_graph(&store);
      return;
    }
    Command::Reset => {
      if let Err(e) = store.reset_tree(&adapter, &tree_id) {
        fail("resetting", e);
      }
      return;
    }
  }

  if let Err(e) = store.save_tree(&adapter, &tree_id) {
    fail("saving", e);
  }
}
