use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tip::core::TipError;
use tip::di::ServiceContainer;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "tip")]
#[command(about = "Exact-version package management for Python, without global installs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install packages and their dependencies into the store
    Install {
        /// Packages to install (name==version); defaults to the environment's packages
        specs: Vec<String>,
        /// Install every package of this environment
        #[arg(short, long)]
        env: Option<String>,
    },
    /// Delete installed packages from the store
    Uninstall {
        /// Packages to uninstall (name==version)
        #[arg(required = true)]
        specs: Vec<String>,
    },
    /// List the packages of an environment or every installed package
    List {
        /// Environment to list (defaults to the active one)
        #[arg(short, long)]
        env: Option<String>,
        /// List every installed package instead
        #[arg(short, long)]
        installed: bool,
    },
    /// Show dependencies of an environment's packages that it doesn't list itself
    Dependencies {
        /// Environment to inspect (defaults to the active one)
        #[arg(short, long)]
        env: Option<String>,
    },
    /// Run a script, module or command with only one environment's packages
    #[command(trailing_var_arg = true)]
    Run {
        /// Run a module as a script
        #[arg(short, long)]
        module: Option<String>,
        /// Run source passed as a string
        #[arg(short, long)]
        command: Option<String>,
        /// Environment to run with (defaults to the active one)
        #[arg(short, long)]
        env: Option<String>,
        /// Install the environment's missing packages first
        #[arg(long)]
        install_missing: bool,
        /// Script and its arguments, or arguments for -m / -c
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the interpreter with every installed package importable
    #[command(trailing_var_arg = true)]
    Python {
        /// Arguments passed to the interpreter
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Create an empty environment
    Create {
        /// Environment name
        name: String,
    },
    /// Delete an environment
    Delete {
        /// Environment name
        name: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Make an environment the active one
    Activate {
        /// Environment name
        name: String,
    },
    /// Add packages to an environment
    Add {
        /// Packages to add (name==version)
        specs: Vec<String>,
        /// Environment to change (defaults to the active one)
        #[arg(short, long)]
        env: Option<String>,
        /// Also add every package of this environment
        #[arg(short, long)]
        from: Option<String>,
        /// Replace packages present with another version
        #[arg(short, long)]
        replace: bool,
    },
    /// Remove packages from an environment
    Remove {
        /// Packages to remove (name==version)
        #[arg(required = true)]
        specs: Vec<String>,
        /// Environment to change (defaults to the active one)
        #[arg(short, long)]
        env: Option<String>,
    },
    /// Show configuration and the active environment
    Info,
    /// Manage configuration
    #[command(subcommand)]
    Config(cli::config::ConfigCommands),
    /// Manage the package cache
    #[command(subcommand)]
    Cache(cli::cache::CacheCommands),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = ServiceContainer::new().and_then(|container| match cli.command {
        Commands::Install { specs, env } => cli::install::run(&container, specs, env),
        Commands::Uninstall { specs } => cli::uninstall::run(&container, specs),
        Commands::List { env, installed } => cli::list::run(&container, env, installed),
        Commands::Dependencies { env } => cli::dependencies::run(&container, env),
        Commands::Run {
            module,
            command,
            env,
            install_missing,
            args,
        } => cli::run::run(
            &container,
            cli::run::RunArgs {
                module,
                command,
                env,
                install_missing,
                args,
            },
        ),
        Commands::Python { args } => cli::python::run(&container, args),
        Commands::Create { name } => cli::create::run(&container, name),
        Commands::Delete { name, yes } => cli::delete::run(&container, name, yes),
        Commands::Activate { name } => cli::activate::run(&container, name),
        Commands::Add {
            specs,
            env,
            from,
            replace,
        } => cli::add::run(
            &container,
            cli::add::AddArgs {
                specs,
                env,
                from,
                replace,
            },
        ),
        Commands::Remove { specs, env } => cli::remove::run(&container, specs, env),
        Commands::Info => cli::info::run(&container),
        Commands::Config(cmd) => cli::config::run(&container, cmd),
        Commands::Cache(cmd) => cli::cache::run(&container, cmd),
    });

    // Handle result and exit codes
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match &e {
            TipError::SubprocessExit(code) => {
                // The child already reported its failure
                ExitCode::from(*code as u8)
            }
            _ => {
                eprintln!("\n{}", tip::core::error_help::format_error_with_help(&e));
                ExitCode::FAILURE
            }
        },
    }
}
