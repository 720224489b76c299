#![forbid(unsafe_code)]

mod clipboard;
mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rwo: terminal client for RestoAM workorders",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List workorders",
        long_about = "List workorders with saved filters, pagination, and sorting by creation date.",
        after_help = "EXAMPLES:\n    # List the first page\n    rwo list\n\n    # Filter by status and title substring\n    rwo list --status open --title pump\n\n    # Third page, 20 per page\n    rwo list --page 2 --size 20\n\n    # Ignore the saved filters for this run\n    rwo list --no-saved\n\n    # Emit machine-readable output\n    rwo list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one workorder",
        long_about = "Show full details for a single workorder, including collaborator app links.",
        after_help = "EXAMPLES:\n    # Show a workorder\n    rwo show wo-42\n\n    # Show it and copy the id to the clipboard\n    rwo show wo-42 --copy-id\n\n    # Emit machine-readable output\n    rwo show wo-42 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Create a new workorder",
        long_about = "Create a new workorder. Blank asset/location references are sent as null.",
        after_help = "EXAMPLES:\n    # Create a workorder\n    rwo create --title \"Fix compressor\"\n\n    # Create with priority and a linked asset\n    rwo create --title \"Fix compressor\" --priority high --asset-id asset-7\n\n    # Emit machine-readable output\n    rwo create --title \"Fix compressor\" --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Update a workorder",
        long_about = "Fetch a workorder, apply the given changes, and send it back.",
        after_help = "EXAMPLES:\n    # Mark a workorder done\n    rwo update wo-42 --status done\n\n    # Clear the linked asset\n    rwo update wo-42 --asset-id \"\"\n\n    # Emit machine-readable output\n    rwo update wo-42 --status done --json"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete a workorder",
        long_about = "Delete a workorder after interactive confirmation.",
        after_help = "EXAMPLES:\n    # Delete with confirmation prompt\n    rwo delete wo-42\n\n    # Skip the prompt\n    rwo delete wo-42 --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show or clear the saved list filters",
        after_help = "EXAMPLES:\n    # Show the saved filters\n    rwo filters\n\n    # Reset them to the defaults\n    rwo filters --clear"
    )]
    Filters(cmd::filters::FiltersArgs),

    #[command(
        next_help_heading = "Read",
        about = "Browse workorders interactively",
        long_about = "Open the full-screen browse view with filtering, pagination, and editing."
    )]
    Ui,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    rwo completions bash\n\n    # Generate zsh completions\n    rwo completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RESTOAM_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "restoam=debug,info"
        } else {
            "restoam=info,warn"
        })
    });

    let format = env::var("RESTOAM_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    let config = restoam_core::config::load()?;

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &config),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &config),
        Commands::Create(ref args) => cmd::create::run_create(args, output, &config),
        Commands::Update(ref args) => cmd::update::run_update(args, output, &config),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &config),
        Commands::Filters(ref args) => cmd::filters::run_filters(args, output, &config),
        Commands::Ui => tui::run_ui(&config),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_parses_before_subcommand() {
        let cli = Cli::parse_from(["rwo", "--json", "list"]);
        assert!(cli.json);
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["rwo", "list", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn quiet_flag_parsed() {
        let cli = Cli::parse_from(["rwo", "-q", "list"]);
        assert!(cli.quiet);
    }

    #[test]
    fn list_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "list"]);
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn show_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "show", "wo-1"]);
        assert!(matches!(cli.command, Commands::Show(_)));
    }

    #[test]
    fn create_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "create", "--title", "My workorder"]);
        assert!(matches!(cli.command, Commands::Create(_)));
    }

    #[test]
    fn update_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "update", "wo-1", "--status", "done"]);
        assert!(matches!(cli.command, Commands::Update(_)));
    }

    #[test]
    fn delete_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "delete", "wo-1", "--force"]);
        assert!(matches!(cli.command, Commands::Delete(_)));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["rwo", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["rwo", "list"],
            vec!["rwo", "show", "x"],
            vec!["rwo", "create", "--title", "x"],
            vec!["rwo", "update", "x"],
            vec!["rwo", "delete", "x"],
            vec!["rwo", "filters"],
            vec!["rwo", "ui"],
            vec!["rwo", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} — error: {:?}",
                args,
                result.err()
            );
        }
    }
}
