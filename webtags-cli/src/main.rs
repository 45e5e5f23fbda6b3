//! Command-line interface for webtags
//! Generates JSON describing all elements, attributes and predefined attribute values from the
//! given web browser specifications, as crawled by webref.
//!
//! Usage:
//!   webtags [--specs `<name>`...] [--pretty-print] [--webref-index `<url>`] [--loglevel `<level>`]
//!           [--config `<file>`] [--keep-going]
//!
//! Flags override the config file, which overrides the built-in defaults.

mod fetch;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use fetch::Fetcher;
use futures::future::{join_all, try_join_all};
use std::process::ExitCode;
use tracing::{debug, error, info};
use url::Url;
use webtags_config::{Loader, LogLevel, WebtagsConfig};
use webtags_core::crawl::{CrawlResult, Dfns, Elements, Index};
use webtags_core::transform::select_results;
use webtags_core::{CrawlResultTransformer, GlobalScope, SpecResult};

fn cli() -> Command {
    Command::new("webtags")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Element definitions from web specifications")
        .long_about(
            "Generates JSON output describing all elements, attributes and predefined attribute \
             values from the given web browser specifications.",
        )
        .arg(
            Arg::new("specs")
                .long("specs")
                .help("Short names of the specs to parse and output [default: html SVG2 svg-animations mathml-core]")
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("pretty-print")
                .long("pretty-print")
                .help("Pretty print the JSON output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("webref-index")
                .long("webref-index")
                .help("URL to the webref data index, file:// URLs and local paths are supported"),
        )
        .arg(
            Arg::new("loglevel")
                .long("loglevel")
                .help("Log level to use [default: warning]")
                .value_parser(clap::builder::PossibleValuesParser::new(LogLevel::NAMES.iter().copied())),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .help("Skip specs that fail to transform and still output the others")
                .action(ArgAction::SetTrue),
        )
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.level);
    info!(
        log_level = ?config.logging.level,
        webref_index = %config.webref.index,
        specs = %config.output.specs.join(","),
        "Started run."
    );

    match run(&config).await {
        Ok(outcome) => {
            println!("{}", outcome.json);
            if outcome.failed > 0 {
                error!(failed = outcome.failed, "Some specs failed to transform.");
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the user file, then flags.
fn load_config(matches: &ArgMatches) -> Result<WebtagsConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(specs) = matches.get_many::<String>("specs") {
        loader = loader.set_override("output.specs", specs.cloned().collect::<Vec<_>>())?;
    }
    if matches.get_flag("pretty-print") {
        loader = loader.set_override("output.pretty_print", true)?;
    }
    if let Some(index) = matches.get_one::<String>("webref-index") {
        loader = loader.set_override("webref.index", index.as_str())?;
    }
    if let Some(level) = matches.get_one::<String>("loglevel") {
        loader = loader.set_override("logging.level", level.as_str())?;
    }
    if matches.get_flag("keep-going") {
        loader = loader.set_override("run.keep_going", true)?;
    }
    Ok(loader.build()?)
}

struct RunOutcome {
    json: String,
    failed: usize,
}

async fn run(config: &WebtagsConfig) -> Result<RunOutcome> {
    debug!("Parsing URL to webref index...");
    let index_url = fetch::parse_location(&config.webref.index)
        .with_context(|| format!("Invalid URL to webref index '{}'", config.webref.index))?;
    info!(url = %index_url, "URL to webref index parsed.");

    let fetcher = Fetcher::new()?;
    let index: Index = fetcher
        .fetch_json(&index_url)
        .await
        .context("Failed to load webref index")?;
    info!(
        results = index.results.len(),
        crawled = index.stats.crawled,
        crawl_errors = index.stats.errors,
        "Webref index loaded."
    );

    let selected = select_results(&index, &config.output.specs);
    debug!(specs = selected.len(), "Parsing specs...");
    let tasks = selected.into_iter().map(|result| {
        let scope = config.scopes.scope_for(&result.shortname);
        transform_spec(&fetcher, result, &index_url, scope)
    });

    let (specs, failed) = if config.run.keep_going {
        let mut specs = Vec::new();
        let mut failed = 0;
        for outcome in join_all(tasks).await {
            match outcome {
                Ok(spec) => specs.push(spec),
                Err(e) => {
                    error!("{:#}", e);
                    failed += 1;
                }
            }
        }
        (specs, failed)
    } else {
        (try_join_all(tasks).await?, 0)
    };
    info!(specs = specs.len(), "Specs parsed.");

    debug!("Generating JSON...");
    let json = output::render(&specs, config.output.pretty_print)
        .context("Failed to encode JSON output")?;
    info!(length = json.len(), "Generated JSON.");

    Ok(RunOutcome { json, failed })
}

async fn transform_spec(
    fetcher: &Fetcher,
    result: &CrawlResult,
    index_url: &Url,
    scope: GlobalScope,
) -> Result<SpecResult> {
    let shortname = result.shortname.clone();
    let transformer = CrawlResultTransformer::new(result.clone(), index_url, scope)
        .with_context(|| format!("Cannot transform spec '{}'", shortname))?;

    let (elements, dfns) = tokio::try_join!(
        fetcher.fetch_json::<Elements>(transformer.elements_url()),
        fetcher.fetch_json::<Dfns>(transformer.dfns_url()),
    )
    .with_context(|| format!("Failed to load extracts of spec '{}'", shortname))?;
    info!(
        spec = %shortname,
        elements = elements.elements.len(),
        dfns = dfns.dfns.len(),
        "Extracts loaded."
    );

    transformer
        .transform(&elements, &dfns)
        .with_context(|| format!("Failed to build spec '{}'", shortname))
}
