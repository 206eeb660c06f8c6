mod variants;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "gtars";
    pub const BIN_NAME: &str = "gtars";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Tools for turning tokenized VCF records into canonical variant documents.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose ... "Increase logging verbosity (-v info, -vv debug)").global(true))
        .subcommand(variants::cli::create_variants_cli())
}

///
/// Log to stderr. `RUST_LOG` wins over the verbosity flag.
///
fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // VARIANTS
        //
        Some((variants::cli::VARIANTS_CMD, matches)) => {
            variants::handlers::run_variants(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
