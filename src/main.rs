use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use revbump::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowOutcome};
use revbump::config::{self, Config};
use revbump::git::{Git2Repository, TagStyle};
use revbump::manifest::JsonManifest;
use revbump::ui::{self, formatter, TerminalPrompter};

#[derive(clap::Parser)]
#[command(
    name = "revbump",
    version,
    about = "Bump the manifest version, then commit, tag and push the release"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a revision release and push it to the configured remote
    Accept {
        #[arg(long, help = "Automatically accept all confirmations")]
        auto: bool,
    },
}

fn log_level(debug: bool) -> simplelog::LevelFilter {
    if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    }
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = log_level(debug);

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("revbump")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match args.command {
        Command::Accept { auto } => accept(&config, auto),
    }
}

fn accept(config: &Config, auto: bool) -> Result<()> {
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo.with_tag_style(TagStyle::from_annotated(config.git.annotated_tags)),
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let manifest_path = match repo.workdir() {
        Ok(workdir) => workdir.join(&config.manifest.path),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let manifest = JsonManifest::new(manifest_path);

    let args = ReleaseWorkflowArgs { auto };
    match run_release_workflow(&args, config, &manifest, &repo, &TerminalPrompter) {
        Ok(WorkflowOutcome::Released(summary)) => {
            print!(
                "{}",
                formatter::format_release_complete(&summary.version, &summary.remote)
            );
        }
        Ok(WorkflowOutcome::Declined { candidate }) => {
            println!("Version {} declined; nothing was changed.", candidate);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
