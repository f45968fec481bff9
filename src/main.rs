use clap::{CommandFactory, Parser, error::ErrorKind};
use directories::ProjectDirs;
use slidedeck::{
    Config, ConfigLoadError, HtmlDeckLoader, Presenter, PresenterOptions, RevealTiming, SlideDeckController,
    init_file_logging,
};
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

/// Present HTML slide decks from your terminal.
#[derive(Parser)]
#[command(author, version, about = create_splash(), arg_required_else_help = true)]
struct Cli {
    /// The path to the HTML file that contains the deck.
    path: Option<PathBuf>,

    /// The path to the configuration file.
    #[clap(short, long)]
    config_file: Option<PathBuf>,

    /// The slide to start the presentation at.
    #[clap(short, long)]
    start: Option<usize>,

    /// Print the deck's outline and exit.
    #[clap(long)]
    list: bool,

    /// Show every feature item immediately instead of revealing them.
    #[clap(long)]
    no_animations: bool,

    /// Write logs to this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Generate a JSON schema for the configuration file.
    #[cfg(feature = "json-schema")]
    #[clap(long)]
    generate_config_file_schema: bool,
}

fn create_splash() -> String {
    let crate_version = env!("CARGO_PKG_VERSION");
    format!("slidedeck v{crate_version}: present HTML slide decks from your terminal")
}

fn load_config(config_file_path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(path) = config_file_path {
        return Config::load(&path).map_err(|e| format!("failed to load {}: {e}", path.display()).into());
    }
    let configs_path: PathBuf = match env::var("XDG_CONFIG_HOME") {
        Ok(path) => Path::new(&path).join("slidedeck"),
        Err(_) => {
            let Some(project_dirs) = ProjectDirs::from("", "", "slidedeck") else {
                return Ok(Default::default());
            };
            project_dirs.config_dir().into()
        }
    };
    match Config::load(&configs_path.join("config.yaml")) {
        Ok(config) => Ok(config),
        Err(ConfigLoadError::NotFound) => Ok(Default::default()),
        Err(e) => Err(e.into()),
    }
}

fn print_outline(controller: &SlideDeckController) {
    for slide in controller.slides() {
        let title = slide.title().unwrap_or("(untitled)");
        println!("{}. {title}", slide.position());
        for item in slide.items() {
            println!("   - {}", item.text());
        }
    }
}

fn run(mut cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "json-schema")]
    if cli.generate_config_file_schema {
        let schema = schemars::schema_for!(Config);
        serde_json::to_writer_pretty(std::io::stdout(), &schema).map_err(|e| format!("failed to write schema: {e}"))?;
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }
    let mut config = load_config(cli.config_file.take())?;
    let path = cli.path.take().unwrap_or_else(|| {
        Cli::command().error(ErrorKind::MissingRequiredArgument, "no path specified").exit();
    });

    let deck = HtmlDeckLoader.load(&path).map_err(|e| format!("failed to load {}: {e}", path.display()))?;
    info!(path = %path.display(), slides = deck.len(), "loaded deck");
    if cli.no_animations {
        config.animation.enabled = false;
    }
    let timing = RevealTiming::from(&config.animation);
    let controller = SlideDeckController::new(deck, timing)?;
    if cli.list {
        print_outline(&controller);
        return Ok(());
    }

    let options = PresenterOptions {
        theme: config.defaults.theme,
        bindings: config.bindings,
        frame_interval: Duration::from_millis(config.animation.frame_interval_ms.max(1)),
        start: cli.start,
    };
    let presenter = Presenter::new(controller, options)?;
    presenter.present()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
