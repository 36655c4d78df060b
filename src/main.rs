use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use linux_embedded_hal::I2cdev;
use log::debug;

use hatdrive_tool::board::BoardVariant;
use hatdrive_tool::driver::eeprom::Eeprom24c32;
use hatdrive_tool::hexdump::hexdump;
use hatdrive_tool::meter::{self, Ina219Sampler};
use hatdrive_tool::render::{OutputMode, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Command {
    /// Continuously show voltage [V] and current [mA] of the HatDrive!
    Meter,
    /// Show the content of the 24C32 EEPROM (4kB) as hex-dump
    Eeprom,
}

fn parse_mode(s: &str) -> Result<OutputMode, String> {
    let flag: u8 = s.parse().map_err(|_| format!("invalid mode: {s}"))?;
    OutputMode::from_flag(flag).ok_or_else(|| format!("mode must be 0..=3, got {flag}"))
}

fn parse_delay(s: &str) -> Result<f64, String> {
    let delay: f64 = s.parse().map_err(|_| format!("invalid delay: {s}"))?;
    if !delay.is_finite() || delay < 0.0 {
        return Err(format!(
            "delay must be a non-negative number of seconds, got {s}"
        ));
    }
    Ok(delay)
}

#[derive(Parser, Debug)]
#[command(name = "hdtool", version, about = "HatDrive! Tool", disable_version_flag = true)]
struct Args {
    #[arg(value_enum)]
    command: Command,

    /// Set output mode: 0 line-by-line, 1 single line, 2 CSV, 3 CSV with header
    #[arg(short, long, default_value = "0", value_parser = parse_mode)]
    mode: OutputMode,

    /// Show power in [mW]
    #[arg(short, long)]
    power: bool,

    /// Delay between two readings [s]
    #[arg(short, long, default_value = "0.25", value_parser = parse_delay)]
    delay: f64,

    /// Board type
    #[arg(short = 't', long = "type", value_enum, default_value = "top")]
    board: BoardVariant,

    /// Don't print the banner
    #[arg(short, long)]
    quiet: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    if !args.quiet {
        println!("HatDrive! Tool");
    }

    let profile = args.board.profile();
    debug!("board profile: {:?}", profile);

    let open_bus = || {
        I2cdev::new(profile.bus_device())
            .with_context(|| format!("failed to open {}", profile.bus_device().display()))
    };

    match args.command {
        Command::Meter => {
            let mut sampler = Ina219Sampler::new(open_bus()?)?;
            let mut renderer = Renderer::new(args.mode, args.power);
            let mut stdout = std::io::stdout();
            meter::run_meter(
                &mut sampler,
                &mut renderer,
                &mut stdout,
                Duration::from_secs_f64(args.delay),
            )?;
        }
        Command::Eeprom => {
            let mut eeprom = Eeprom24c32::new(open_bus()?, profile.eeprom_address);
            let image = eeprom
                .read_all()
                .map_err(|err| anyhow::anyhow!("failed to read EEPROM: {err:?}"))?;
            println!("Size: {}", image.len());
            print!("{}", hexdump(&image));
        }
    }

    Ok(())
}
