//! ActiveRDF CLI: command-line access to a Yars triple store
//!
//! Terms are written in N3: `<http://example.org/alice>` for resources and
//! `"Alice"` for literals.

use activerdf::n3::{parse_term, triple_to_n3};
use activerdf::{Adapter, Node, Resource, Triple, YarsAdapter, YarsConfig};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "activerdf", version, about = "ActiveRDF Yars store CLI")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "ACTIVERDF_CONFIG")]
    config: Option<PathBuf>,

    /// Store host (overrides the config file)
    #[arg(long, global = true, env = "ACTIVERDF_HOST")]
    host: Option<String>,

    /// Store port
    #[arg(long, global = true, env = "ACTIVERDF_PORT")]
    port: Option<u16>,

    /// Store context (named graph path segment)
    #[arg(long, global = true, env = "ACTIVERDF_CONTEXT")]
    context: Option<String>,

    /// HTTP proxy URL
    #[arg(long, global = true, env = "ACTIVERDF_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    N3,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one triple
    Add {
        /// Subject resource, e.g. <http://example.org/alice>
        subject: String,
        /// Predicate resource
        predicate: String,
        /// Object resource or literal
        object: String,
    },
    /// Remove triples matching a pattern; omitted positions are wildcards
    Remove {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        predicate: Option<String>,
        #[arg(long)]
        object: Option<String>,
    },
    /// Run an N3 query and print the triples
    Query {
        /// The N3 query string
        query: String,
    },
    /// Count the results of an N3 query
    Count {
        /// The N3 query string
        query: String,

        /// Count parsed triples instead of response lines
        #[arg(long)]
        semantic: bool,
    },
    /// Start an interactive query shell
    Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match build_adapter(&cli) {
        Ok(adapter) => run(&adapter, cli.command, &cli.format).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn build_adapter(cli: &Cli) -> Result<YarsAdapter> {
    let mut config = match &cli.config {
        Some(path) => YarsConfig::from_file(path)?,
        None => YarsConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(context) = &cli.context {
        config.context = context.clone();
    }
    if let Some(proxy) = &cli.proxy {
        config.proxy = Some(proxy.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }

    Ok(YarsAdapter::new(config)?)
}

async fn run(adapter: &YarsAdapter, command: Commands, format: &OutputFormat) -> Result<()> {
    match command {
        Commands::Add {
            subject,
            predicate,
            object,
        } => {
            let subject = parse_resource("subject", &subject)?;
            let predicate = parse_resource("predicate", &predicate)?;
            let object = parse_node("object", &object)?;

            if adapter.add(&subject, &predicate, &object).await? {
                println!("added");
                Ok(())
            } else {
                Err(anyhow!("store did not accept the triple"))
            }
        }
        Commands::Remove {
            subject,
            predicate,
            object,
        } => {
            let subject = subject.map(|s| parse_node("subject", &s)).transpose()?;
            let predicate = predicate.map(|p| parse_node("predicate", &p)).transpose()?;
            let object = object.map(|o| parse_node("object", &o)).transpose()?;

            if adapter
                .remove(subject.as_ref(), predicate.as_ref(), object.as_ref())
                .await?
            {
                println!("removed");
                Ok(())
            } else {
                Err(anyhow!("store did not accept the deletion"))
            }
        }
        Commands::Query { query } => run_query(adapter, &query, format).await,
        Commands::Count { query, semantic } => run_count(adapter, &query, semantic).await,
        Commands::Shell => run_shell(adapter, format).await,
    }
}

fn parse_node(position: &str, input: &str) -> Result<Node> {
    parse_term(input).with_context(|| format!("invalid {} term {}", position, input))
}

fn parse_resource(position: &str, input: &str) -> Result<Resource> {
    let node = parse_node(position, input)?;
    Resource::try_from(node).with_context(|| format!("{} must be a resource", position))
}

async fn run_query(adapter: &YarsAdapter, query: &str, format: &OutputFormat) -> Result<()> {
    let triples = adapter.query(query).await?;
    print_triples(&triples, format)
}

async fn run_count(adapter: &YarsAdapter, query: &str, semantic: bool) -> Result<()> {
    let count = if semantic {
        adapter.count_triples(query).await?
    } else {
        adapter.query_count(query).await?
    };
    println!("{}", count);
    Ok(())
}

fn print_triples(triples: &[Triple], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(triples)?);
        }
        OutputFormat::N3 => {
            for triple in triples {
                println!("{}", triple_to_n3(triple));
            }
        }
        OutputFormat::Table => {
            if triples.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["subject", "predicate", "object"]);

            for triple in triples {
                table.add_row(vec![
                    triple.subject.uri().to_string(),
                    triple.predicate.uri().to_string(),
                    format_object(&triple.object),
                ]);
            }

            println!("{}", table);
            println!("{} triple(s)", triples.len());
        }
    }

    Ok(())
}

fn format_object(node: &Node) -> String {
    match node {
        Node::Resource(r) => r.uri().to_string(),
        Node::Literal(l) => format!("\"{}\"", l.value()),
    }
}

async fn run_shell(adapter: &YarsAdapter, format: &OutputFormat) -> Result<()> {
    println!("ActiveRDF Interactive Shell");
    println!(
        "Connected to {}:{}/{}",
        adapter.host(),
        adapter.port(),
        adapter.context()
    );
    println!("Type N3 queries, or :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("activerdf> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        match ShellCommand::parse(&line) {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("Commands:");
                println!("  :count <query>  count result lines");
                println!("  :quit           exit shell");
                println!("  <query>         execute an N3 query");
            }
            ShellCommand::Usage(usage) => println!("Usage: {}", usage),
            ShellCommand::Count(query) => {
                if let Err(e) = run_count(adapter, query, false).await {
                    eprintln!("Error: {:#}", e);
                }
            }
            ShellCommand::Query(query) => {
                if let Err(e) = run_query(adapter, query, format).await {
                    eprintln!("Error: {:#}", e);
                }
            }
        }
    }

    println!("Bye!");
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Empty,
    Quit,
    Help,
    Usage(&'static str),
    Count(&'a str),
    Query(&'a str),
}

impl<'a> ShellCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ShellCommand::Empty;
        }

        let (command, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        let rest = rest.trim();
        match command {
            ":quit" | ":exit" | ":q" => ShellCommand::Quit,
            ":help" | ":h" => ShellCommand::Help,
            ":count" if rest.is_empty() => ShellCommand::Usage(":count <query>"),
            ":count" => ShellCommand::Count(rest),
            _ => ShellCommand::Query(trimmed),
        }
    }
}
