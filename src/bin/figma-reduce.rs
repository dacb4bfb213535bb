use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use figma_reduce::{
    DocumentRef, FetchConfig, FigmaClient, Profile, RawNode, ReducedNode, ServerConfig,
    config::{self, DEFAULT_API_BASE, DEFAULT_PORT},
    locate, logging,
};

#[derive(Parser, Debug)]
#[command(name = "figma-reduce", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one node from the Figma API and save the raw entry as JSON.
    Fetch(FetchArgs),
    /// Reduce a saved node entry to compact JSON.
    Reduce(ReduceArgs),
    /// Fetch a node by its Figma link and save the reduced JSON.
    Pull(PullArgs),
    /// Serve `POST /api/reduce` and a static directory.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// Figma personal access token.
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Figma REST API base URL.
    #[arg(long, env = "FIGMA_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl ApiArgs {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn client(&self) -> anyhow::Result<FigmaClient> {
        let token = config::require_token(self.token.clone())?;
        Ok(FigmaClient::new(&self.fetch_config(), token)?)
    }
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Figma link containing the file key and `node-id`.
    #[arg(long, conflicts_with_all = ["file_key", "node_id"])]
    url: Option<String>,

    /// File key (the segment after `/design/` or `/file/`).
    #[arg(long, requires = "node_id")]
    file_key: Option<String>,

    /// Node id, `123:456` or `123-456`.
    #[arg(long, requires = "file_key")]
    node_id: Option<String>,

    /// Output JSON path.
    #[arg(long, default_value = "frame.json")]
    out: PathBuf,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Args, Debug)]
struct ReduceArgs {
    /// Input node entry JSON (as written by `fetch`).
    #[arg(long = "in", default_value = "frame.json")]
    in_path: PathBuf,

    /// Output JSON path.
    #[arg(long, default_value = "frame.reduced.json")]
    out: PathBuf,

    /// Output schema.
    #[arg(long, value_enum, default_value_t = ProfileChoice::Compact)]
    profile: ProfileChoice,
}

#[derive(Args, Debug)]
struct PullArgs {
    /// Figma link containing the file key and `node-id`.
    #[arg(long)]
    url: String,

    /// Output JSON path.
    #[arg(long, default_value = "frame.reduced.json")]
    out: PathBuf,

    #[command(flatten)]
    api: ApiArgs,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory served for non-API paths.
    #[arg(long, default_value = "public")]
    static_dir: PathBuf,

    /// Figma REST API base URL.
    #[arg(long, env = "FIGMA_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Upstream request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileChoice {
    Compact,
    Verbose,
}

fn main() -> anyhow::Result<()> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));

    match cli.cmd {
        Command::Reduce(args) => cmd_reduce(args),
        Command::Fetch(args) => runtime()?.block_on(cmd_fetch(args)),
        Command::Pull(args) => runtime()?.block_on(cmd_pull(args)),
        Command::Serve(args) => runtime()?.block_on(cmd_serve(args)),
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")
}

fn read_entry_json(path: &Path) -> anyhow::Result<RawNode> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open node entry '{}'", path.display()))?;
    RawNode::from_entry_str(&s).with_context(|| "parse node entry JSON")
}

fn write_json_pretty(path: &Path, value: &impl serde::Serialize) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    serde_json::to_writer_pretty(f, value)
        .with_context(|| format!("write json '{}'", path.display()))?;
    Ok(())
}

fn resolve_doc(args: &FetchArgs) -> anyhow::Result<DocumentRef> {
    match (&args.url, &args.file_key, &args.node_id) {
        (Some(url), _, _) => Ok(locate(url)?),
        (None, Some(key), Some(node_id)) => Ok(DocumentRef::new(key.as_str(), node_id)?),
        _ => anyhow::bail!("pass --url, or both --file-key and --node-id"),
    }
}

async fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let doc = resolve_doc(&args)?;
    let client = args.api.client()?;

    println!("Fetching node {} from file {}...", doc.node_id, doc.document_id);
    let entry = client.fetch_entry(&doc).await?;

    write_json_pretty(&args.out, &entry)?;
    println!("Saved {}", args.out.display());
    Ok(())
}

fn cmd_reduce(args: ReduceArgs) -> anyhow::Result<()> {
    let node = read_entry_json(&args.in_path)?;
    let profile = match args.profile {
        ProfileChoice::Compact => Profile::Compact,
        ProfileChoice::Verbose => Profile::Verbose,
    };

    let reduced = profile.reduce(Some(&node)).unwrap_or_default();
    write_json_pretty(&args.out, &reduced)?;
    report_reduced(&reduced, &args.out);
    Ok(())
}

async fn cmd_pull(args: PullArgs) -> anyhow::Result<()> {
    let doc = locate(&args.url)?;
    let client = args.api.client()?;

    println!("Fetching node {} from file {}...", doc.node_id, doc.document_id);
    let node = client.fetch_node(&doc).await?;

    let reduced = figma_reduce::reduce(Some(&node)).unwrap_or_default();
    write_json_pretty(&args.out, &reduced)?;
    report_reduced(&reduced, &args.out);
    Ok(())
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        static_dir: args.static_dir,
        fetch: FetchConfig {
            api_base: args.api_base,
            timeout: Duration::from_secs(args.timeout_secs),
        },
    };
    figma_reduce::server::serve(config).await
}

fn report_reduced(reduced: &ReducedNode, out: &Path) {
    println!(
        "Reduced JSON saved → {} ({} nodes)",
        out.display(),
        reduced.node_count()
    );
}
