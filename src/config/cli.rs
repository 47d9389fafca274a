use crate::config::toml_config::TomlConfig;
use crate::config::ReduceConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::ffi::OsString;

#[derive(Debug, Clone, Parser)]
#[command(name = "lang-reduce")]
#[command(about = "Cap each repository's language list, folding the rest into \"Other\"")]
pub struct CliConfig {
    /// Input JSON file with the repository records (also accepted as `-in`)
    #[arg(long = "in", value_name = "PATH")]
    pub input: String,

    /// Optional TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Maximum number of language entries per repository, including "Other"
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Output file name, written next to the input file
    #[arg(long)]
    pub output_name: Option<String>,

    /// Write indented JSON instead of compact output
    #[arg(long)]
    pub pretty: bool,

    /// Reduce in memory and print a summary without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log per-phase CPU and memory usage
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 解析命令列，並接受單一破折號的 `-in`
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// 命令列參數優先，其次是 TOML 設定檔，最後是預設值
    pub fn resolve(&self) -> Result<ReduceConfig> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let mut config = ReduceConfig::new(self.input.clone());

        if let Some(max_items) = self.max_items.or(file_config.reduce.max_items) {
            config.max_items = max_items;
        }
        if let Some(name) = self.output_name.clone().or(file_config.output.file_name) {
            config.output_file_name = name;
        }
        config.pretty = self.pretty || file_config.output.pretty.unwrap_or(false);

        Ok(config)
    }
}

/// clap 不支援單一破折號的長參數，先把 `-in` 改寫成 `--in`
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-in") => OsString::from("--in"),
            Some(text) if text.starts_with("-in=") => OsString::from(format!("-{}", text)),
            _ => arg,
        })
        .collect()
}
