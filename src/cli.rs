use crate::error::Result;
use crate::utils::{confirm, print_info, print_warning};
use crate::version_manager::VersionManager;
use clap::{Parser, Subcommand};
use colored::*;

#[derive(Parser)]
#[command(name = "gum")]
#[command(about = "Go Update Manager", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a Go version
    Install {
        /// Version to install (e.g., 1.24, go1.22.3)
        version: String,
    },

    /// Uninstall a Go version
    Uninstall {
        /// Version to uninstall
        version: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch the active Go version
    Use {
        /// Version to use (omit to detect from go.mod)
        version: Option<String>,
    },

    /// List installed Go versions
    #[command(alias = "ls")]
    List,
}

impl Cli {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn run(self, manager: &VersionManager) -> Result<()> {
        let mut out = std::io::stdout();

        match self.command {
            Commands::Install { ref version } => {
                manager.install(version, &mut out)?;
                println!("\n{}", "Next steps:".yellow());
                println!("  gum use {version}    # Activate this version");
                Ok(())
            }
            Commands::Uninstall { ref version, yes } => {
                let should_uninstall =
                    yes || confirm(&format!("Uninstall Go {version}?"));

                if should_uninstall {
                    manager.uninstall(version, &mut out)
                } else {
                    print_info("Uninstall cancelled");
                    Ok(())
                }
            }
            Commands::Use { ref version } => {
                manager.use_version(version.as_deref(), &mut out)?;
                self.warn_if_bin_dir_off_path(manager);
                Ok(())
            }
            Commands::List => manager.list(&mut out),
        }
    }

    /// The symlink only takes effect once the managed bin directory is on
    /// PATH, which is the user's to configure.
    fn warn_if_bin_dir_off_path(&self, manager: &VersionManager) {
        let bin_dir = manager.config().bin_dir.clone();

        let on_path = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).any(|p| p == bin_dir))
            .unwrap_or(false);

        if !on_path {
            println!();
            print_warning(&format!(
                "{} is not on your PATH",
                bin_dir.display()
            ));
            println!("{}", "Add it to your shell profile:".yellow());
            println!(
                "  export PATH=\"{}:$PATH\"",
                bin_dir.display().to_string().cyan()
            );
        }
    }
}
