use tracing::info;

use crate::{
    HtmlArgs,
    build::{PageOptions, Placeholders, VERSION_TOKEN, convert, current_version},
    config::Config,
};

pub async fn run(args: &HtmlArgs, config: &Config) -> Result<(), anyhow::Error> {
    let version = current_version(&std::env::current_dir()?)?;
    render(args, config, &version)
}

/// Convert one document, stamping it with `version`.
pub(crate) fn render(args: &HtmlArgs, config: &Config, version: &str) -> Result<(), anyhow::Error> {
    let options = PageOptions {
        input: args
            .input
            .clone()
            .unwrap_or_else(|| config.html.input.clone()),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| config.html.output.clone()),
        header: config.html.header.clone(),
        footer: config.html.footer.clone(),
        markdown: config.markdown.clone(),
    };

    info!("Replacing {} with {}", VERSION_TOKEN, version);
    let mut placeholders = Placeholders::with_version(version);
    placeholders.extend(config.html.placeholders.iter().cloned());

    convert(&options, &placeholders)?;
    Ok(())
}
