use clap::{Parser, Subcommand};
use radarview::config;
use radarview::export;
use radarview::gui::app::AppModel;
use radarview::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "radarview", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the chart to a PNG file instead of opening a window
    Export {
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Image width in pixels (defaults to the configured window width)
        #[arg(long)]
        width: Option<i32>,

        /// Image height in pixels (defaults to the configured window height)
        #[arg(long)]
        height: Option<i32>,
    },
    /// Write the default config file if there is none yet
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Export {
            output,
            width,
            height,
        }) => {
            let config = config::load_or_default();
            export::export_png(
                config.radar_style(),
                width.unwrap_or(config.window.width),
                height.unwrap_or(config.window.height),
                &output,
            )?;
        }
        Some(Commands::Init) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
        }
        None => run_window(),
    }
    Ok(())
}

fn run_window() {
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Config hot reload
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.radar.radarview");

    app.run::<AppModel>((config, rx));
}
