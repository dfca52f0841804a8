use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use precis_core::{
    API_KEY_ENV, ArticleTextResponse, Document, ExportConfig, ExportFormat, ExtractConfig, FetchConfig, GeminiClient,
    INSUFFICIENT_TEXT_MESSAGE, RESTRICTED_PAGE_MESSAGE, Settings, SummaryConfig, SummaryType, extract_article_text,
    fetch_file, fetch_stdin, fetch_url, has_enough_text, is_restricted_url, mask_api_key, write_export,
};
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

use echo::{format_size, print_banner, print_detail, print_info, print_step, print_success, print_timing, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract readable article text from web pages and summarize it
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(author = "Precis Contributors")]
#[command(version)]
#[command(about = "Extract and summarize article text from web pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (default: <config dir>/precis/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the article text of a page
    Extract {
        #[command(flatten)]
        input: InputArgs,

        /// Print the `{"text": ...}` response instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Summarize the article text of a page
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        /// Summary type (brief, detailed, bullets, key-insights)
        #[arg(short = 't', long = "type", default_value = "brief", value_name = "TYPE")]
        summary_type: SummaryType,

        /// Model to use instead of the configured one
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,

        /// Also export the summary. `txt` or `md` (the default is `txt`) writes
        /// summary.txt or summary.md; any other value is a path, Markdown for .md
        #[arg(long, value_name = "FORMAT|FILE", num_args = 0..=1, default_missing_value = "txt")]
        export: Option<String>,
    },

    /// Manage the Gemini API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum KeyAction {
    /// Validate and store an API key
    Set {
        /// Gemini API key (starts with "AIza")
        key: String,
    },
    /// Show which API key would be used
    Show,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Page URL for file or stdin input, used for site and PDF detection
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Declared content type of the page
    #[arg(long, value_name = "MIME")]
    content_type: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// HTML plus where it came from.
struct Page {
    html: String,
    url: Option<String>,
    content_type: Option<String>,
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn check_not_restricted(input: &InputArgs) -> anyhow::Result<()> {
    let candidates = [Some(input.input.as_str()), input.url.as_deref()];
    if candidates.into_iter().flatten().any(is_restricted_url) {
        bail!(RESTRICTED_PAGE_MESSAGE);
    }
    Ok(())
}

async fn load_page(input: &InputArgs, verbose: bool) -> anyhow::Result<Page> {
    let started = Instant::now();

    let page = if input.input == "-" {
        if verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let html = fetch_stdin().context("Failed to read from stdin")?;
        Page { html, url: input.url.clone(), content_type: input.content_type.clone() }
    } else if is_remote(&input.input) {
        if verbose {
            print_step(1, 3, &format!("Fetching from {}", input.input.bright_white().underline()));
        }

        let mut config = FetchConfig { timeout: input.timeout, ..Default::default() };
        if let Some(user_agent) = &input.user_agent {
            config.user_agent.clone_from(user_agent);
        }

        let fetched = fetch_url(&input.input, &config).await.context("Failed to fetch URL")?;
        Page {
            html: fetched.body,
            url: Some(input.url.clone().unwrap_or(fetched.url)),
            content_type: input.content_type.clone().or(fetched.content_type),
        }
    } else {
        if verbose {
            print_step(1, 3, &format!("Reading from file {}", input.input.bright_white()));
        }
        let html = fetch_file(&input.input).with_context(|| format!("Failed to read file: {}", input.input))?;
        Page { html, url: input.url.clone(), content_type: input.content_type.clone() }
    };

    if verbose {
        print_detail("Size", &format_size(page.html.len()));
        if let Some(url) = &page.url {
            print_detail("URL", url);
        }
        if let Some(content_type) = &page.content_type {
            print_detail("Content type", content_type);
        }
        print_timing("Load", started.elapsed());
        eprintln!();
    }

    Ok(page)
}

fn extract(page: Page, verbose: bool) -> anyhow::Result<String> {
    if verbose {
        print_step(2, 3, "Extracting article text");
    }

    if let Some(url) = &page.url {
        Url::parse(url).with_context(|| format!("Invalid page URL: {}", url))?;
    }

    let started = Instant::now();
    let mut doc = Document::parse(&page.html).context("Failed to parse HTML")?;
    if let Some(url) = page.url {
        doc = doc.with_url(url);
    }
    if let Some(content_type) = page.content_type {
        doc = doc.with_content_type(content_type);
    }

    let text = extract_article_text(&doc, &ExtractConfig::default());

    if verbose {
        if let Some(title) = doc.title() {
            print_detail("Title", &title);
        }
        print_detail("Characters", &text.chars().count().to_string());
        print_timing("Extract", started.elapsed());
        eprintln!();
    }

    Ok(text)
}

fn write_output(output: Option<&Path>, content: &str, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        print_step(3, 3, "Writing output");
    }

    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", content),
    }

    Ok(())
}

/// A format name selects the default file name, anything else is a path.
fn export_target(target: &str) -> (PathBuf, ExportFormat) {
    match ExportFormat::from_name(target) {
        Some(format) => (PathBuf::from(ExportConfig::default().filename(format)), format),
        None => {
            let path = PathBuf::from(target);
            let format = ExportFormat::from_path(&path);
            (path, format)
        }
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path).with_context(|| format!("Failed to load settings: {}", path.display())),
        None => Settings::load().context("Failed to load settings"),
    }
}

async fn run_extract(input: &InputArgs, json: bool, verbose: bool) -> anyhow::Result<()> {
    check_not_restricted(input)?;
    let page = load_page(input, verbose).await?;
    let text = extract(page, verbose)?;

    let output = if json {
        serde_json::to_string_pretty(&ArticleTextResponse { text }).context("Failed to encode response")?
    } else {
        text
    };

    write_output(input.output.as_deref(), &output, verbose)
}

async fn run_summarize(
    input: &InputArgs, summary_type: &SummaryType, model: Option<String>, export: Option<&str>,
    settings_path: Option<&Path>, verbose: bool,
) -> anyhow::Result<()> {
    let settings = load_settings(settings_path)?;
    let api_key = settings.resolve_api_key()?;

    check_not_restricted(input)?;
    let page = load_page(input, verbose).await?;
    let source = page.url.clone().unwrap_or_else(|| input.input.clone());
    let text = extract(page, verbose)?;

    if !has_enough_text(&text) {
        bail!(INSUFFICIENT_TEXT_MESSAGE);
    }

    let mut config = settings.apply(SummaryConfig { timeout: input.timeout, ..Default::default() });
    if let Some(model) = model {
        config.model = model;
    }

    let client = GeminiClient::new(config).context("Failed to build API client")?;

    if verbose {
        print_info(&format!(
            "Generating {} summary with {}",
            summary_type.label().replace('-', " "),
            client.config().model
        ));
    }

    let started = Instant::now();
    let summary = client
        .summarize(&text, summary_type, &api_key)
        .await
        .context("Failed to generate summary")?;

    if verbose {
        print_timing("Summarize", started.elapsed());
        eprintln!();
    }

    write_output(input.output.as_deref(), &summary, verbose)?;

    if let Some(target) = export {
        let (path, format) = export_target(target);
        write_export(&path, &summary, format, summary_type, Some(&source))
            .with_context(|| format!("Failed to export summary to {}", path.display()))?;
        print_success(&format!("Summary exported to {}", path.display().bright_white()));
    }

    Ok(())
}

fn run_key(action: &KeyAction, settings_path: Option<&Path>) -> anyhow::Result<()> {
    let mut settings = load_settings(settings_path)?;

    match action {
        KeyAction::Set { key } => {
            settings.set_api_key(key)?;
            let path = match settings_path {
                Some(path) => {
                    settings.save_to(path)?;
                    path.to_path_buf()
                }
                None => settings.save()?,
            };
            print_success(&format!("API key saved to {}", path.display().bright_white()));
        }
        KeyAction::Show => {
            let env_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty());
            let key = settings.api_key(env_key.as_deref())?;
            if env_key.is_some() {
                print_info(&format!("Using {} from the environment", API_KEY_ENV));
            }
            println!("{}", mask_api_key(&key));
        }
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("precis_core=debug"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        print_banner();
        init_logging();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let settings_path = cli.settings.as_deref();

    match cli.command {
        Command::Extract { input, json } => run_extract(&input, json, cli.verbose).await,
        Command::Summarize { input, summary_type, model, export } => {
            if matches!(summary_type, SummaryType::Custom(_)) {
                print_warning(&format!("Unknown summary type '{}', using a general summary", summary_type));
            }
            run_summarize(&input, &summary_type, model, export.as_deref(), settings_path, cli.verbose).await
        }
        Command::Key { action } => run_key(&action, settings_path),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "precis", &mut std::io::stdout());
            Ok(())
        }
    }
}
