use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use column_lens::{
    analyze_dashboard, extract_usage, load_document, output, report, AnalyzeOptions,
    CatalogDefaults, OutputFormat,
};

#[derive(Parser)]
#[command(name = "column-lens")]
#[command(
    author,
    version,
    about = "Extract only the utilised columns from a dashboard export to optimise your SQL queries and ETL pipelines"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract column usage and generate catalog comparison queries
    Analyze {
        /// Path to the dashboard export JSON file
        dashboard_json: PathBuf,

        /// Output format: sql, python, or both
        #[arg(short, long, default_value = "sql")]
        format: OutputFormat,

        /// Output directory for generated queries
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Print queries to console only, do not save to files
        #[arg(long)]
        no_save: bool,

        /// Catalog assumed for table names without one
        #[arg(long, default_value = "hive_metastore")]
        default_catalog: String,

        /// Schema assumed for bare table names
        #[arg(long, default_value = "default")]
        default_schema: String,
    },

    /// Print the expressions and columns found in a dashboard export
    Extract {
        /// Path to the dashboard export JSON file
        dashboard_json: PathBuf,

        /// Also write the full extraction results as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Analyze {
            dashboard_json,
            format,
            output,
            no_save,
            default_catalog,
            default_schema,
        } => {
            let options = AnalyzeOptions {
                dashboard_path: dashboard_json,
                output_dir: output,
                format,
                save: !no_save,
                defaults: CatalogDefaults {
                    catalog: default_catalog,
                    schema: default_schema,
                },
            };

            let analysis = analyze_dashboard(&options)?;

            if options.save {
                for queries in &analysis.query_sets {
                    let dir = options
                        .format
                        .language_dir(&options.output_dir, queries.language);
                    println!("{} queries saved to {}", queries.language, dir.display());
                }
                report::print_analysis_summary(&analysis, Some(&options.output_dir));
            } else {
                for queries in &analysis.query_sets {
                    report::print_queries(queries);
                }
                report::print_analysis_summary(&analysis, None);
            }
        }
        Commands::Extract {
            dashboard_json,
            json,
        } => {
            let source = load_document(&dashboard_json)?;
            let index = extract_usage(&source.document);
            report::print_extraction_summary(&index);

            if let Some(path) = json {
                output::write_index_json(&index, &path)?;
                println!();
                println!("Full results saved to '{}'", path.display());
            }
        }
    }

    Ok(())
}
