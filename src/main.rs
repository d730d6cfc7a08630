use clap::Parser;
use rasterops::command::ImageController;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rasterops")]
#[command(version, about = "Scriptable RGB image transformations", long_about = None)]
struct Cli {
    /// Script to run instead of the interactive prompt
    #[arg(short, long, value_name = "SCRIPT")]
    file: Option<PathBuf>,

    /// Log every operation (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let stdout = io::stdout();
    let mut controller = ImageController::new(stdout.lock());

    let result = match cli.file {
        Some(script) => controller.run_script(&script).map_err(|e| e.to_string()),
        None => controller
            .run_interactive(io::stdin().lock())
            .map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
