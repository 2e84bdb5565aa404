//! CLI module for Vidscope
//!
//! Provides commands:
//! - `search`: One search, printed with screenshot and clip URLs
//! - `videos`: List the known video sources
//! - `process`: Ask the service to index a video
//! - `shell`: Interactive search and playback session

use crate::app::App;
use crate::settings::AppConfig;
use clap::{Args, Parser, Subcommand};

pub mod render;
pub mod search;
pub mod shell;

/// Vidscope video forensics search CLI
#[derive(Parser, Debug)]
#[command(name = "vidscope")]
#[command(about = "Search recorded video for detected text and play back the matching clips")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the video archive
    Search(SearchArgs),
    /// List known video sources
    Videos,
    /// Request processing of a video
    Process {
        /// Video identifier, e.g. OCR-Video.mp4
        video_id: String,
        /// Camera the video belongs to
        #[arg(long)]
        camera: Option<String>,
    },
    /// Interactive search session
    Shell,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,
    /// First day to search (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Last day to search (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Restrict to one camera
    #[arg(long)]
    pub camera: Option<String>,
    /// Open hit N (1-based) and print its clip
    #[arg(long, value_name = "N")]
    pub open: Option<usize>,
}

/// Run the CLI command
pub async fn run(cli: Cli, settings: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Search(args)) => {
            let mut app = App::from_settings(&settings)?;
            search::run(&mut app, args).await
        }
        Some(Commands::Videos) => {
            let app = App::from_settings(&settings)?;
            let videos = app.adapter.fetch_catalog().await;
            render::print_catalog(&videos);
            Ok(())
        }
        Some(Commands::Process { video_id, camera }) => {
            let app = App::from_settings(&settings)?;
            let mut job = vidscope_core::ProcessingJob::new(video_id);
            if let Some(camera) = camera {
                job = job.with_camera(camera);
            }
            let ack = app.adapter.submit_processing_job(&job).await;
            render::print_ack(&ack);
            Ok(())
        }
        Some(Commands::Shell) => {
            let app = App::from_settings(&settings)?;
            shell::run(app).await
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
