use std::process;

use clap::{value_parser, Arg, ArgMatches, Command};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use rotscreen::backends::{platform_backend, DisplayBackend};
use rotscreen::config::DEFAULT_MAX_DISPLAYS;
use rotscreen::{DisplayOrientation, DisplayRotator, DisplayStatus, Error, Result, RotatorConfig};

fn cli() -> Command<'static> {
    Command::new("rotscreen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rotate displays or reset them to their default orientation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("max-displays")
                .long("max-displays")
                .env("ROTSCREEN_MAX_DISPLAYS")
                .takes_value(true)
                .value_parser(value_parser!(u32))
                .global(true)
                .help("Highest display ordinal to try when sweeping or listing"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .global(true)
                .help("Ask the OS to validate changes without applying them"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .global(true)
                .help("Log more; repeat for debug and trace output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(
            Command::new("rotate")
                .about("Rotate one display")
                .arg(
                    Arg::new("orientation")
                        .required(true)
                        .allow_hyphen_values(true)
                        .value_parser(|s: &str| {
                            s.parse::<DisplayOrientation>().map_err(|err| err.to_string())
                        })
                        .help("0, 90, 180, 270 (clockwise), or normal/right/inverted/left"),
                )
                .arg(
                    Arg::new("display")
                        .short('d')
                        .long("display")
                        .takes_value(true)
                        .value_parser(value_parser!(u32))
                        .default_value("1")
                        .help("Display ordinal, starting at 1"),
                ),
        )
        .subcommand(Command::new("reset").about("Reset every display to 0°"))
        .subcommand(
            Command::new("list")
                .about("List displays and their current mode")
                .arg(Arg::new("json").long("json").help("Print JSON")),
        )
}

fn main() {
    let matches = cli().get_matches();
    init_logging(&matches);

    let code = match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            match err {
                Error::InvalidArgument(_)
                | Error::InvalidDegrees(_)
                | Error::InvalidOrientation(_) => 2,
                _ => 1,
            }
        }
    };
    process::exit(code);
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.is_present("quiet") {
        LevelFilter::Error
    } else {
        match matches.occurrences_of("verbose") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    if let Err(err) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Unable to set up logging: {err}");
    }
}

fn run(matches: &ArgMatches) -> Result<i32> {
    let config = RotatorConfig {
        max_displays: matches
            .get_one::<u32>("max-displays")
            .copied()
            .unwrap_or(DEFAULT_MAX_DISPLAYS),
        dry_run: matches.is_present("dry-run"),
    };
    log::debug!("using {config:?}");

    let mut rotator = DisplayRotator::with_config(platform_backend()?, config);

    match matches.subcommand() {
        Some(("rotate", sub)) => {
            let display = sub.get_one::<u32>("display").copied().unwrap_or(1);
            let orientation = sub
                .get_one::<DisplayOrientation>("orientation")
                .copied()
                .unwrap_or(DisplayOrientation::Cw0);
            rotate(&mut rotator, display, orientation)
        }
        Some(("reset", _)) => {
            rotator.reset_all()?;
            println!("Reset all displays to {}", DisplayOrientation::Cw0);
            Ok(0)
        }
        Some(("list", sub)) => {
            let displays = rotator.displays();
            if sub.is_present("json") {
                println!("{}", serde_json::to_string_pretty(&displays)?);
            } else {
                displays.iter().for_each(print_display);
            }
            Ok(0)
        }
        _ => Ok(2),
    }
}

fn rotate<B: DisplayBackend>(
    rotator: &mut DisplayRotator<B>,
    display: u32,
    orientation: DisplayOrientation,
) -> Result<i32> {
    match rotator.rotate(display, orientation) {
        Ok(true) => {
            println!("Display {display} rotated to {orientation}");
            Ok(0)
        }
        Ok(false) => {
            eprintln!("Display {display} could not be rotated to {orientation}");
            Ok(1)
        }
        Err(err @ Error::DisplayNotFound(_)) => {
            eprintln!("{err}");
            Ok(1)
        }
        Err(err) => Err(err),
    }
}

fn print_display(status: &DisplayStatus) {
    let mut flags = Vec::new();
    if status.device.is_primary() {
        flags.push("primary");
    }
    if !status.device.is_attached() {
        flags.push("detached");
    }

    let mode = match &status.mode {
        Some(mode) => match mode.orientation() {
            Some(orientation) => format!("{}x{} {}", mode.width, mode.height, orientation),
            None => format!("{}x{} code {}", mode.width, mode.height, mode.orientation_code),
        },
        None => "no active mode".to_owned(),
    };

    println!(
        "{}: {} {} [{}] {}",
        status.ordinal,
        status.device.name,
        mode,
        flags.join(", "),
        status.device.description
    );
}
