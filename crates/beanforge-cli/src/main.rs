//! beanforge CLI - Table code generator
//!
//! Commands:
//! - `beanforge generate` - Render a schema for one code target
//! - `beanforge check` - Validate a schema and configuration
//! - `beanforge targets` - List the registered code targets

use clap::{Parser, Subcommand};

mod check;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "beanforge")]
#[command(author, version, about = "Code generator for configuration tables", long_about = None)]
struct Cli {
    /// Log level filter (default: config `log_level`, overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate source files for a code target
    Generate(generate::GenerateArgs),

    /// Load and resolve a schema, then validate the configuration
    Check {
        /// Path to the schema document (.json or .toml)
        #[arg(short, long)]
        schema: String,

        /// Path to beanforge.toml
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the registered code targets
    Targets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            generate::run(args, cli.log_level.as_deref())?;
        }
        Commands::Check { schema, config } => {
            check::run(&schema, config.as_deref(), cli.log_level.as_deref())?;
        }
        Commands::Targets => {
            for target in beanforge_codegen::code_targets() {
                println!("{:<20} .{}", target.name(), target.file_suffix());
            }
        }
    }

    Ok(())
}
