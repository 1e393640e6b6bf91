pub mod cli;
pub mod columns;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "liturgist")]
#[command(about = "A liturgical document generator")]
pub struct CliConfig {
    /// A path to a schedule - csv, json, ods, xlsx and xls are supported
    pub schedule: String,

    /// A date on the schedule to select data for the template. Defaults to next sunday if unspecified.
    #[arg(long)]
    pub date: Option<String>,

    /// Print selected data as JSON.
    #[arg(long)]
    pub print_json: bool,

    /// A file containing the verses in json arrays
    #[arg(long)]
    pub bible_json_path: Option<String>,

    /// A path to a handlebars template
    #[arg(long)]
    pub template: Option<String>,

    /// A path to the output file [default: output/out.pdf]
    #[arg(short = 'o', long = "output")]
    pub output_path: Option<String>,

    /// A path to a liturgist.toml configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
