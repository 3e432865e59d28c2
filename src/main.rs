use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use cdn_url_filters::logging::init_logging;
use cdn_url_filters::versioning::rewrite_rule;
use cdn_url_filters::{Filter, Mode, SiteConfig, UrlRewriter};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Apply the site URL filters from the command line.
#[derive(Debug, Parser)]
#[command(name = "cdn-url-filters", version, about)]
struct Cli {
    /// Site configuration file (YAML, or JSON by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory searched for `_config.yml` when `--config` is not given.
    #[arg(long, global = true, default_value = ".")]
    site_dir: PathBuf,
    /// Build date used when no release is configured (YYYY-MM-DD).
    #[arg(long, global = true)]
    build_date: Option<NaiveDate>,
    /// Override `app.mode` (development or production).
    #[arg(long, global = true)]
    mode: Option<String>,
    /// Log every CDN host decision to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one named filter on a value (`-` reads the value from stdin).
    Apply {
        filter: Filter,
        input: String,
        /// Positional filter arguments, e.g. `300x300 true` for sub_imgurl.
        args: Vec<String>,
    },
    /// List the filter names.
    List,
    /// Print the Apache rewrite rule that strips the release segment at the origin.
    RewriteRule,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("cdn-url-filters error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Apply {
            filter,
            input,
            args,
        } => {
            let input = read_input(input)?;
            let output = UrlRewriter::new(&config)
                .apply(filter, &input, args.as_slice())
                .with_context(|| format!("filter `{filter}` failed"))?;
            println!("{output}");
        }
        Command::List => {
            for filter in Filter::ALL {
                println!("{filter}");
            }
        }
        Command::RewriteRule => println!("{}", rewrite_rule(config.prefix())),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::from_path(path)
            .with_context(|| format!("failed to load site configuration {}", path.display()))?,
        None => SiteConfig::discover(&cli.site_dir).with_context(|| {
            format!("failed to load site configuration from {}", cli.site_dir.display())
        })?,
    };

    if let Some(date) = cli.build_date {
        config = config.with_build_date(date);
    }
    if let Some(mode) = cli.mode.as_deref() {
        config = config.with_mode(Mode::from(mode));
    }
    Ok(config)
}

fn read_input(input: String) -> Result<String> {
    if input != "-" {
        return Ok(input);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read filter input from stdin")?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}
