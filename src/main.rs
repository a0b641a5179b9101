use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser};
use std::collections::HashMap;
use syscolor::color::{ColorRole, DisplayType};
use syscolor::measure::{COLOR_TYPE_KEY, DISPLAY_TYPE_KEY, HEX_KEY};
use syscolor::update::{self, HttpFeed};
use syscolor::{CapabilityProber, Config, Measure};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SYSCOLOR_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "syscolor")]
#[command(version = VERSION, about = "Resolves Windows system color roles into RGBA text")]
struct Cli {
    /// Color role to resolve (see --list); defaults to the config file value
    #[arg(long, short = 'c', value_name = "TYPE")]
    color_type: Option<String>,

    /// Channels to print: ALL, RED, GREEN, BLUE, ALPHA or RGB
    #[arg(long, short = 'd', value_name = "TYPE")]
    display_type: Option<String>,

    /// Print two-digit uppercase hex channels with no separators
    #[arg(long, short = 'x', action = ArgAction::SetTrue)]
    hex: bool,

    /// List every accepted color type and exit
    #[arg(long, short = 'l', action = ArgAction::SetTrue)]
    list: bool,

    /// Check for a newer release after printing the color
    #[arg(long, action = ArgAction::SetTrue)]
    check_updates: bool,

    /// Write a documented config file to the config directory and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.list {
        for role in ColorRole::all() {
            println!("{}", role);
        }
        return Ok(());
    }

    if cli.init_config {
        let path = Config::get_config_path()?;
        Config::create_default_file(&path)?;
        println!("Created config at {}", path.display());
        return Ok(());
    }

    let config = Config::load().context("Failed to load configuration")?;

    // Reject typos up front instead of printing "no value".
    let color_type = cli.color_type.unwrap_or(config.measure.color_type);
    let role: ColorRole = color_type.parse()?;
    let display_type = cli.display_type.unwrap_or(config.measure.display_type);
    display_type.parse::<DisplayType>()?;
    let hex = cli.hex || config.measure.hex;

    let version_check = (cli.check_updates || config.updates.check)
        .then(|| update::spawn_check(HttpFeed::new(config.updates.url.clone())));

    let settings: HashMap<String, String> = HashMap::from([
        (COLOR_TYPE_KEY.to_string(), color_type),
        (DISPLAY_TYPE_KEY.to_string(), display_type),
        (HEX_KEY.to_string(), u8::from(hex).to_string()),
    ]);

    let prober = CapabilityProber::global();
    let mut measure = Measure::initialize(&prober);
    measure.reload(&settings);
    let status = measure.update();

    if status > 0.0 {
        println!("{}", measure.text());
    }
    drop(measure);

    if version_check.is_some_and(|handle| handle.join().is_err()) {
        log::debug!("Version check thread panicked");
    }

    if status > 0.0 {
        Ok(())
    } else {
        Err(anyhow!("no value for {}", role))
    }
}
