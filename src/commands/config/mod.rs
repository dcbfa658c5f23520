use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,

    /// Print the effective configuration path
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
            }
            Self::Path => match crate::shared::dirs::app_config_dir() {
                Some(dir) => println!("{}", dir.join("config.yaml").display()),
                None => anyhow::bail!("Cannot determine config directory: HOME is not set"),
            },
        }
        Ok(())
    }
}
