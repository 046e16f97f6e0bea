use tracing::info;

use crate::{
    ConcatArgs, HtmlArgs,
    build::current_version,
    commands::{concat, html},
    config::Config,
};

pub async fn run(config: &Config) -> Result<(), anyhow::Error> {
    // Resolve the revision first so a missing repository fails before any file is written
    let version = current_version(&std::env::current_dir()?)?;
    build(config, &version).await
}

async fn build(config: &Config, version: &str) -> Result<(), anyhow::Error> {
    let merged = concat::merge(&ConcatArgs::default(), config).await?;

    let html_args = HtmlArgs {
        input: Some(merged.output),
        output: None,
    };
    html::render(&html_args, config, version)?;

    info!(
        "Built {} from {} file(s)",
        config.html.output.display(),
        merged.files.len()
    );

    Ok(())
}
