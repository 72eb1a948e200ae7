use std::process::ExitCode;

use blctl::{BacklightBuilder, BacklightError, parse_percentage};

use clap::{ArgGroup, Parser};

/// Read a backlight's brightness as a percentage of its maximum, after
/// optionally setting it to an explicit percentage or adjusting it by
/// the given amount.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
            ArgGroup::new("action")
                .args(["set", "adjust"]),
        ))]
struct Args {
    /// Set the backlight brightness to the given percentage.
    #[arg(short, long, value_name = "pct")]
    set: Option<String>,

    /// Adjust backlight brightness by the given percentage.
    #[arg(short, long, value_name = "pct")]
    adjust: Option<String>,

    /// Do not print the brightness of the backlight.
    #[arg(short, long)]
    quiet: bool,
}

fn run(args: &Args) -> Result<(), BacklightError> {
    let backlight = BacklightBuilder::new().build()?;

    if let Some(pct) = &args.set {
        backlight.set_percentage(parse_percentage(pct)?)?;
    }

    if let Some(pct) = &args.adjust {
        backlight.adjust_percentage(parse_percentage(pct)?)?;
    }

    if !args.quiet {
        println!("{:.1}", backlight.get_percentage()?);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}.");
            ExitCode::FAILURE
        }
    }
}
