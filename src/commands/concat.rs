use crate::{
    ConcatArgs,
    build::{ConcatOptions, ConcatResult, concat},
    config::Config,
};

pub async fn run(args: &ConcatArgs, config: &Config) -> Result<(), anyhow::Error> {
    merge(args, config).await?;
    Ok(())
}

/// Merge the chapters, with command line arguments taking precedence over
/// the config file.
pub(crate) async fn merge(args: &ConcatArgs, config: &Config) -> Result<ConcatResult, anyhow::Error> {
    let options = ConcatOptions {
        input_dir: args
            .input_dir
            .clone()
            .unwrap_or_else(|| config.concat.input_dir.clone()),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| config.concat.output.clone()),
        pagebreak: args
            .pagebreak
            .clone()
            .or_else(|| config.concat.pagebreak.clone())
            .filter(|pagebreak| !pagebreak.is_empty()),
        reserved: config.concat.reserved.clone(),
        sort: config.concat.sort,
    };

    Ok(concat(&options).await?)
}
