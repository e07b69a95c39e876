// ABOUTME: CLI binary for scribe: fetches articles and saves them as Markdown with front matter.
// ABOUTME: Also converts a local HTML file when given --html with the page's --url.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use scribe::{
    CleanupOptions, Client, MediumReader, Pipeline, ReaderRegistry, SavedArticle,
    SequentialPipeline,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(about = "Save web articles as Markdown files with front matter")]
struct Args {
    /// Article URLs to fetch and save
    #[arg()]
    urls: Vec<String>,

    /// HTML file to convert (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Address of the page in --html; selects the reader and fills `source`
    #[arg(long = "url")]
    url: Option<String>,

    /// Output file for --html mode (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Directory for saved articles
    #[arg(long = "output-dir", default_value = scribe::options::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Session cookie sent with every request
    #[arg(long = "cookie", env = "MEDIUM_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Extra publication domain served by Medium (repeatable)
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// Also run the Markdown cleaner over each article
    #[arg(long = "tidy")]
    tidy: bool,

    /// Print JSON instead of plain output
    #[arg(long = "json")]
    json_output: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(args: &Args) -> Result<Client, scribe::ScribeError> {
    let mut reader = MediumReader::new();
    for domain in &args.domains {
        reader = reader.with_domain(domain);
    }
    let mut registry = ReaderRegistry::new();
    registry.register(reader);

    let mut builder = Client::builder()
        .registry(registry)
        .output_dir(&args.output_dir);
    if let Some(ref cookie) = args.cookie {
        builder = builder.cookie(cookie);
    }
    if args.tidy {
        builder = builder.cleanup(CleanupOptions::default());
    }
    builder.build()
}

fn format_saved(saved: &[SavedArticle], json_output: bool) -> Result<String, serde_json::Error> {
    if json_output {
        serde_json::to_string_pretty(saved)
    } else {
        Ok(saved
            .iter()
            .map(|s| s.file_path.as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Convert one local HTML file. Returns false on failure.
fn run_html(client: &Client, args: &Args, html_path: &Path, url: &str) -> bool {
    let html = match fs::read_to_string(html_path) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("error reading file {:?}: {}", html_path, e);
            return false;
        }
    };

    let article = match client.parse_html(&html, url) {
        Ok(article) => article,
        Err(e) => {
            eprintln!("error parsing HTML: {}", e);
            return false;
        }
    };

    let output = if args.json_output {
        match serde_json::to_string_pretty(&article) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error encoding JSON: {}", e);
                return false;
            }
        }
    } else {
        article.format_document()
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("error writing to {:?}: {}", path, e);
                return false;
            }
            true
        }
        None => {
            println!("{}", output);
            true
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html with --url");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let client = match build_client(&args) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        return if run_html(&client, &args, html_path, url) {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        };
    }

    if args.cookie.is_none() {
        warn!("no cookie set (--cookie or MEDIUM_COOKIE); member-only articles may be truncated");
    }

    let pipeline = SequentialPipeline::new(client);
    let results = pipeline.process_all(&args.urls).await;

    let mut had_error = false;
    let mut saved = Vec::new();
    for result in results {
        match result.outcome {
            Ok(article) => saved.push(article),
            Err(e) => {
                eprintln!("error saving {}: {}", result.url, e);
                had_error = true;
            }
        }
    }
    debug!(saved = saved.len(), "done");

    if !saved.is_empty() {
        match format_saved(&saved, args.json_output) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("error encoding JSON: {}", e);
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
