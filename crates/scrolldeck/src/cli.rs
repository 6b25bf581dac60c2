use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::LaunchOptions;

#[derive(Parser)]
#[command(name = "scrolldeck")]
#[command(author, version, about)]
#[command(long_about = "A horizontally scrolling slide deck presenter.\n\n\
    Describe your slides, hotspots and overlay panels in a YAML deck file\n\
    and present them as one continuous, snapping strip.\n\n\
    Examples:\n  \
    scrolldeck deck.yaml              Launch presentation (fullscreen)\n  \
    scrolldeck deck.yaml --windowed   Launch in a window\n  \
    scrolldeck check deck.yaml        Validate a deck\n  \
    scrolldeck spec --short           Print quick reference card")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Jump between slides without smooth scrolling
    #[arg(long, global = false)]
    pub instant: bool,

    /// Disable the floating particle background
    #[arg(long, global = false)]
    pub no_particles: bool,

    /// Skip the loading screen
    #[arg(long, global = false)]
    pub no_loader: bool,

    /// Reload the deck when the file changes
    #[arg(long, global = false)]
    pub watch: bool,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a deck file and print a summary
    Check {
        /// Deck file to check
        file: PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the deck file format reference
    Spec {
        /// Print a concise quick-reference card instead of the full reference
        #[arg(long)]
        short: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.scroll, defaults.particles)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            windowed: self.windowed,
            start_slide: self.slide,
            instant: self.instant,
            no_particles: self.no_particles,
            no_loader: self.no_loader,
            watch: self.watch,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let options = self.launch_options();
        match self.command {
            Some(Commands::Check { file }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::check::run(&file)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Spec { short }) => {
                crate::commands::spec::run(short);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, options)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
