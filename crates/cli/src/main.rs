use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use stackscope_core::{
    AnalyticsConfig, Analyzer, ContentAnalytics, InputKind, JsonConfig, JsonFormatter, MarkdownConfig,
    MarkdownFormatter, PostSource, TextConfig, TextFormatter, fetch_file, fetch_stdin, load_history, load_posts,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

use echo::{
    format_size, print_analytics_details, print_banner, print_field, print_info, print_step, print_success,
    print_timing_summary, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const STDIN_URL: &str = "file:///dev/stdin";

/// Output format for analytics reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Digest,
    Text,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "digest" => Ok(Self::Digest),
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Invalid format: {}. Valid options: json, digest, text, markdown", s)),
        }
    }
}

/// How to interpret the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Auto,
    Kind(InputKind),
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        InputKind::from_str(s).map(Self::Kind).map_err(|e| e.to_string())
    }
}

impl InputFormat {
    fn resolve(self, path: Option<&Path>, raw: &str) -> InputKind {
        match self {
            Self::Auto => InputKind::detect(path, raw),
            Self::Kind(kind) => kind,
        }
    }
}

fn parse_timestamp(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

/// Compute sentiment, readability, keyword and cadence analytics for posts
#[derive(Parser, Debug)]
#[command(name = "stackscope")]
#[command(author = "Stackscope Contributors")]
#[command(version)]
#[command(about = "Content analytics for newsletter posts", long_about = None)]
struct Args {
    /// Post file (JSON, HTML or text), or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// JSON array of post summaries used for publishing cadence
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Title for HTML or text input
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Canonical URL for HTML or text input
    #[arg(long, value_name = "URL")]
    url: Option<Url>,

    /// Publication timestamp (RFC 3339) for HTML or text input
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_timestamp)]
    published: Option<OffsetDateTime>,

    /// Input format (auto, json, html, text)
    #[arg(long, default_value = "auto", value_name = "FORMAT")]
    input_format: InputFormat,

    /// Output format (json, digest, text, markdown)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Number of keywords to keep
    #[arg(long, default_value = "12", value_name = "NUM")]
    top: usize,

    /// Minimum keyword length in characters
    #[arg(long, default_value = "3", value_name = "NUM")]
    min_keyword_length: usize,

    /// Skip sentiment scoring
    #[arg(long)]
    no_sentiment: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    fn source(&self, path: Option<&Path>) -> anyhow::Result<PostSource> {
        let mut source = match (&self.url, path) {
            (Some(url), _) => PostSource::new(url.clone()),
            (None, Some(path)) => PostSource::from_path(path)
                .with_context(|| format!("Failed to resolve path: {}", path.display()))?,
            (None, None) => PostSource::new(Url::parse(STDIN_URL)?),
        };
        if let Some(title) = &self.title {
            source = source.title(title.clone());
        }
        if let Some(at) = self.published {
            source = source.published_at(at);
        }
        Ok(source)
    }

    fn analytics_config(&self) -> AnalyticsConfig {
        AnalyticsConfig::builder()
            .top_keywords(self.top)
            .min_keyword_length(self.min_keyword_length)
            .sentiment(!self.no_sentiment)
            .build()
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stackscope_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `batch` keeps JSON output an array whenever the input was one.
fn render(results: &[ContentAnalytics], batch: bool, args: &Args) -> anyhow::Result<String> {
    let output = match args.format {
        OutputFormat::Json | OutputFormat::Digest => {
            let config =
                JsonConfig { pretty: args.pretty, digest: args.format == OutputFormat::Digest, ..Default::default() };
            let formatter = JsonFormatter::new(config);
            let json = match results {
                [single] if !batch => formatter.convert(single),
                _ => formatter.convert_all(results),
            };
            json.context("Failed to serialize analytics")?
        }
        OutputFormat::Text => TextFormatter::new(TextConfig::default()).convert_all(results),
        OutputFormat::Markdown => {
            MarkdownFormatter::new(MarkdownConfig { include_frontmatter: args.frontmatter }).convert_all(results)
        }
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "stackscope", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);
    let started = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let input = args.input.as_deref().context("An INPUT argument is required")?;
    let path = (input != "-").then_some(Path::new(input));

    let step = Instant::now();
    let raw = match path {
        None => {
            if args.verbose {
                print_step(1, 4, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        }
        Some(path) => {
            if args.verbose {
                print_step(1, 4, &format!("Reading from file {}", path.display().bright_white()));
            }
            fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?
        }
    };

    let kind = args.input_format.resolve(path, &raw);
    let source = args.source(path)?;
    let mut posts = load_posts(&raw, kind, &source).context("Failed to load posts")?;
    for post in &mut posts {
        post.fill_text_from_html();
    }
    timings.push(("Load", step.elapsed()));

    if args.verbose {
        print_field("Size", &format_size(raw.len()));
        print_field("Format", &format!("{:?}", kind));
        print_field("Posts", &posts.len().to_string());
        eprintln!();
    }

    let history = match &args.history {
        Some(history_path) => {
            if args.verbose {
                print_step(2, 4, &format!("Reading history {}", history_path.display().bright_white()));
            }
            let raw = fetch_file(history_path)
                .with_context(|| format!("Failed to read history: {}", history_path.display()))?;
            let history = load_history(&raw).context("Failed to parse history")?;
            if args.verbose {
                let dated = history.iter().filter(|s| s.published_at.is_some()).count();
                print_field("Entries", &history.len().to_string());
                if dated < 2 {
                    print_warning("Fewer than two dated posts; cadence will be unavailable");
                }
                eprintln!();
            }
            Some(history)
        }
        None => {
            if args.verbose {
                print_step(2, 4, "No history given");
                eprintln!();
            }
            None
        }
    };

    if args.verbose {
        print_step(3, 4, "Analysing content");
    }

    let step = Instant::now();
    let analyzer = Analyzer::with_config(args.analytics_config());
    let results = match posts.as_slice() {
        [single] => vec![analyzer.analyse(single, history.as_deref())],
        _ => analyzer.analyse_all(&posts, history.as_deref()),
    };
    timings.push(("Analyse", step.elapsed()));

    if args.verbose {
        print_analytics_details(&results);
        print_step(4, 4, "Writing output");
        print_field("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    let step = Instant::now();
    let output = render(&results, kind.is_batch(&raw), &args)?;
    timings.push(("Render", step.elapsed()));

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    if args.verbose {
        eprintln!();
        print_timing_summary(started.elapsed(), &timings);
    }

    Ok(())
}
