use clap::{Parser, Subcommand};

/// Browse the call log and archive or unarchive calls.
#[derive(Debug, Parser)]
#[command(name = "callbox", version, about)]
pub struct Cli {
    /// Root URL of the call store (overrides CALLBOX_BASE_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show active calls, or archived ones with --archived.
    List {
        #[arg(long)]
        archived: bool,
    },
    /// Archive an active call or unarchive an archived one.
    Toggle {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Archive every call.
    ArchiveAll,
    /// Unarchive every call.
    UnarchiveAll,
}
