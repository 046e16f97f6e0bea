use tracing::info;

use crate::{
    InitArgs,
    config::{Config, DEFAULT_CONFIG_FILE},
};

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            info!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config file already exists: {config_file}. Use --force to overwrite.",
            config_file = config_file.display()
        ));
    }

    info!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&Config::default())?;
    tokio::fs::write(&config_file, config_text).await?;

    info!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_args(path: &std::path::Path, force: bool) -> InitArgs {
        InitArgs {
            path: path.to_path_buf(),
            create: false,
            force,
        }
    }

    #[tokio::test]
    async fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();

        run(&init_args(dir.path(), false)).await.unwrap();

        let config = Config::load_from_file(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config.concat.output, std::path::PathBuf::from("index.md"));
        assert_eq!(config.html.output, std::path::PathBuf::from("index.html"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&config_file, "concat:\n  sort: false\n").unwrap();

        assert!(run(&init_args(dir.path(), false)).await.is_err());
        assert_eq!(
            std::fs::read_to_string(&config_file).unwrap(),
            "concat:\n  sort: false\n"
        );

        run(&init_args(dir.path(), true)).await.unwrap();
        let config = Config::load_from_file(&config_file).unwrap();
        assert!(config.concat.sort);
    }

    #[tokio::test]
    async fn test_init_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("site");

        assert!(run(&init_args(&missing, false)).await.is_err());

        let args = InitArgs {
            create: true,
            ..init_args(&missing, false)
        };
        run(&args).await.unwrap();
        assert!(missing.join(DEFAULT_CONFIG_FILE).exists());
    }
}
