#![forbid(unsafe_code)]

mod options;
mod ui;

use clap::Parser;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, short, help = "Where the game is saved and reopened from. Defaults to the value of AMAZE_SAVE if set, or to save.mze in the data folder.", env = "AMAZE_SAVE")]
    save: Option<PathBuf>,
    #[arg(long, short, default_value = "frappe", value_enum)]
    theme: options::ThemeChoice,
    #[arg(long, short, default_value = "ascii", value_enum)]
    iconset: options::IconSetChoice,
    #[arg(long, help = "Seed the shuffle for a reproducible deal.")]
    seed: Option<u64>,
    #[arg(long, help = "Append a log to amaze.log in the data folder. Filter it with AMAZE_LOG.")]
    log: bool,
    #[arg(
        help = "The maze file to play, original or saved. Defaults to the value of AMAZE_FILE if set, or to default.mze in a reasonable platform-dependent data folder.",
        env = "AMAZE_FILE",
    )]
    maze_path: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("AMAZE_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let data_dir = ProjectDirs::from("", "", "amaze").map(|p| p.data_dir().to_path_buf());
    let in_data_dir = |name: &str| match &data_dir {
        Some(dir) => dir.join(name),
        None => {
            eprintln!("couldn't find a data folder to use. please pass the maze and save paths or set AMAZE_FILE and AMAZE_SAVE");
            std::process::exit(1);
        },
    };

    let maze_path = args.maze_path.clone().unwrap_or_else(|| in_data_dir("default.mze"));
    let save_path = args.save.clone().unwrap_or_else(|| in_data_dir("save.mze"));
    if maze_path.is_dir() || save_path.is_dir() {
        eprintln!("is a directory");
        std::process::exit(1);
    }
    if let Some(Err(e)) = save_path.parent().map(std::fs::create_dir_all) {
        eprintln!("couldn't create {}: {e}", save_path.display());
        std::process::exit(1);
    }

    if args.log {
        let log_path = data_dir.as_deref().unwrap_or(Path::new(".")).join("amaze.log");
        if let Err(e) = log_path.parent().map_or(Ok(()), std::fs::create_dir_all).and_then(|()| init_logging(&log_path)) {
            eprintln!("couldn't open {}: {e}", log_path.display());
            std::process::exit(1);
        }
    }

    if let Err(e) = ui::game_loop(args, maze_path, save_path) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
