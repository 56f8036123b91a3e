// src/cli/mod.rs
use clap::Parser;
use crate::tools::dialect::EngineId;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search engine dork builder", long_about = None)]
pub struct Args {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Target search engine (google, bing, yahoo, duckduckgo, startpage, brave)
    #[arg(long, short, global = true, env = "DORK_ENGINE")]
    pub engine: Option<EngineId>,

    /// Curated dork dataset, as a URL or file path
    #[arg(long, env = "DORKS_DATASET")]
    pub dataset: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// API server port
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Run in API-only mode (no CLI)
    #[arg(long)]
    pub api_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::content::ContentType;
    use crate::tools::search_url::ExportFormat;

    #[test]
    fn parses_build_flags() {
        let args = Args::try_parse_from([
            "rust_dorkforge",
            "--engine",
            "bing",
            "build",
            "--content-type",
            "documents",
            "--site",
            "example.com",
            "--download-focus",
        ])
        .unwrap();

        assert_eq!(args.engine, Some(EngineId::Bing));
        match args.command {
            Some(CliCommand::Build { content_type, site, download_focus, .. }) => {
                assert_eq!(content_type, Some(ContentType::Documents));
                assert_eq!(site.as_deref(), Some("example.com"));
                assert!(download_focus);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["rust_dorkforge", "export", "site:example.com", "--format", "md", "--json"]).unwrap();
        assert!(args.json);
        match args.command {
            Some(CliCommand::Export { query, format }) => {
                assert_eq!(query, vec!["site:example.com".to_string()]);
                assert_eq!(format, ExportFormat::Markdown);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_engine() {
        assert!(Args::try_parse_from(["rust_dorkforge", "--engine", "altavista", "engines"]).is_err());
    }

    #[test]
    fn no_subcommand_means_menu() {
        let args = Args::try_parse_from(["rust_dorkforge"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.api_only);
    }
}
