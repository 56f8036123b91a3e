// src/cli/commands.rs
use clap::Subcommand;
use crate::catalog::RiskLevel;
use crate::tools::content::ContentType;
use crate::tools::search_url::ExportFormat;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Build a query from structured options
    Build {
        /// Content type (videos, audio, images, documents, software, archives, downloads, all)
        #[arg(long)]
        content_type: Option<ContentType>,

        /// Restrict to a site; URLs are reduced to their hostname
        #[arg(long)]
        site: Option<String>,

        /// File extension, or "any"
        #[arg(long)]
        ext: Option<String>,

        /// Free-text keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Favour download pages
        #[arg(long)]
        download_focus: bool,

        #[arg(long)]
        inurl: Option<String>,

        #[arg(long)]
        intitle: Option<String>,

        #[arg(long)]
        intext: Option<String>,

        /// Only pages published after this date (YYYY-MM-DD)
        #[arg(long)]
        after: Option<String>,

        /// Only pages published before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<String>,

        /// Appended verbatim to the query
        #[arg(long)]
        raw: Option<String>,

        /// Print a clause-by-clause explanation
        #[arg(long)]
        explain: bool,
    },

    /// Instantiate a curated dork by id
    Template {
        #[arg(required = true)]
        id: String,

        /// Target domain for the placeholders
        #[arg(long)]
        domain: Option<String>,

        /// Print the query with its title, risk and defensive note
        #[arg(long)]
        metadata: bool,
    },

    /// Check a query for common mistakes
    Validate {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Print the search URL for a query
    Encode {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Export a query as text, url, markdown or json
    Export {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(long, default_value = "text")]
        format: ExportFormat,
    },

    /// Show recently built queries
    History {
        /// Forget every recorded query
        #[arg(long)]
        clear: bool,
    },

    /// Browse the curated dork catalog
    Dorks {
        #[arg(long)]
        phase: Option<u32>,

        #[arg(long)]
        risk: Option<RiskLevel>,

        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text search over title, description, query and category
        #[arg(long)]
        search: Option<String>,

        /// Domain used to instantiate the listed queries
        #[arg(long)]
        domain: Option<String>,

        /// Print the matches as a JSON export
        #[arg(long)]
        export: bool,
    },

    /// List supported search engines and their operators
    Engines,

    /// Print a random popular dork
    Random {
        #[arg(long)]
        domain: Option<String>,
    },
}
