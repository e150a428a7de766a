use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sellerscrawler")]
#[command(about = "Crawls sellers.json disclosure files and ranks seller domains across ad systems")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/sellerscrawler.toml
    #[arg(long)]
    pub init: bool,

    /// Path to an alternate configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the three output files are written into (defaults to the working directory)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Number of top domains shown in the end-of-run summary
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.top == 0 {
            return Err("Top domain count must be greater than 0".to_string());
        }

        if let Some(config) = &self.config {
            if config.is_empty() {
                return Err("Config path cannot be empty".to_string());
            }
        }

        if let Some(dir) = &self.output_dir {
            if dir.is_empty() {
                return Err("Output directory cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
