use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "threatgen", version, about = "Expand security threats into vulnerabilities and test cases with a local LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP upload server
    Serve(ServeArgs),
    /// Expand a CSV file from disk and store the results
    Ingest(IngestArgs),
    /// List stored threats
    Threats(ThreatsArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Inference flags shared by commands that call the model.
#[derive(Args, Clone, Default)]
pub struct InferenceArgs {
    /// Ollama base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Model name passed to the inference service
    #[arg(long)]
    pub model: Option<String>,

    /// Per-call inference timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Directory for saving raw uploads
    #[arg(long)]
    pub upload_dir: Option<String>,

    #[command(flatten)]
    pub inference: InferenceArgs,
}

#[derive(Args, Clone)]
pub struct IngestArgs {
    /// CSV file with Title and Description columns
    pub file: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub inference: InferenceArgs,
}

#[derive(Args, Clone)]
pub struct ThreatsArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Maximum number of threats to show
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Number of threats to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Show the full tree of one threat
    #[arg(long)]
    pub id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
