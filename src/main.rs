use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod git;

use config::Config;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The path to the configuration file [default: docmerge.yaml]
    #[arg(short, long = "config", global = true)]
    config_file: Option<PathBuf>,

    /// Log more detail (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    command: DocmergeCommand,
}

#[derive(Parser, Default)]
struct ConcatArgs {
    /// Directory holding the Markdown files to merge [default: ./]
    input_dir: Option<PathBuf>,

    /// The merged Markdown file to write [default: index.md]
    output: Option<PathBuf>,

    /// Literal placed on its own line between merged files
    pagebreak: Option<String>,
}

#[derive(Parser, Default)]
struct HtmlArgs {
    /// The Markdown file to convert [default: index.md]
    input: Option<PathBuf>,

    /// The HTML page to write [default: index.html]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct InitArgs {
    /// The directory to write docmerge.yaml into
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(long, default_value = "false")]
    create: bool,

    /// Overwrite an existing docmerge.yaml
    #[arg(short, long, default_value = "false")]
    force: bool,
}

#[derive(Subcommand)]
enum DocmergeCommand {
    /// Merge a directory of Markdown files into one document
    Concat(ConcatArgs),

    /// Convert a Markdown document into an HTML page
    Html(HtmlArgs),

    /// Merge the chapters, then convert the result to HTML
    Build,

    /// Write a default docmerge.yaml
    Init(InitArgs),
}

/// Initialize tracing, logging to stdout.
///
/// `verbose` raises the level from INFO to DEBUG (1) or TRACE (2+);
/// `quiet` lowers it to WARN. `RUST_LOG` directives are honoured as well.
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::WARN,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time(),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    let config_file = args.config_file.as_deref();

    match args.command {
        DocmergeCommand::Concat(concat_args) => {
            let config = Config::load_from_arg(config_file)?;
            commands::concat::run(&concat_args, &config).await?;
        }
        DocmergeCommand::Html(html_args) => {
            let config = Config::load_from_arg(config_file)?;
            commands::html::run(&html_args, &config).await?;
        }
        DocmergeCommand::Build => {
            let config = Config::load_from_arg(config_file)?;
            commands::build::run(&config).await?;
        }
        DocmergeCommand::Init(init_args) => {
            commands::init::run(&init_args).await?;
        }
    }

    Ok(())
}
