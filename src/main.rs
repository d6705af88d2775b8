use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use gb_cartinfo::emu::{self, LoadError};

#[derive(Parser, Debug)]
#[command(version, about = "Inspect and validate a Game Boy cartridge image")]
struct Args {
    /// Path to .gb / .gbc ROM file
    rom: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// More logging (-v info, -vv debug); RUST_LOG wins if set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let report = match emu::load(&args.rom) {
        Ok(report) => report,
        Err(LoadError::LogoMismatch { report }) => {
            // still worth showing what the header claims
            print_report(&report, args.json)?;
            error!("{}: boot logo does not match, refusing to load", args.rom);
            return Err(LoadError::LogoMismatch { report }.into());
        }
        Err(e) => return Err(e).with_context(|| format!("loading {}", args.rom)),
    };

    info!("{} loaded", report.filename);
    print_report(&report, args.json)
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_report(report: &emu::LoadReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
