use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse site text and print it as json
    Parse {
        /// File with site text. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Turn a site json back into editable text
    Format {
        /// File with a site json object. Reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Search stored sites
    Search {
        /// Free text and #tags, separated by commas (e.g. "docs, #ai")
        #[clap(allow_hyphen_values = true)]
        query: String,

        /// Print the count
        #[clap(short = 'c', long, default_value = "false")]
        count: bool,
    },
    /// Check whether the input is a url and already stored
    Detect {
        #[clap(allow_hyphen_values = true)]
        input: String,
    },
    /// Parse site text and store it, replacing a site with the same url
    Add {
        /// File with site text. Reads stdin when omitted.
        file: Option<PathBuf>,

        /// Auto confirm
        #[clap(short, long, default_value = "false")]
        yes: bool,
    },
    /// Delete the site stored under a url
    Remove {
        #[clap(allow_hyphen_values = true)]
        url: String,

        /// Auto confirm
        #[clap(short, long, default_value = "false")]
        yes: bool,
    },
    /// Print the prompt that asks an AI assistant to describe a site
    Prompt {
        #[clap(allow_hyphen_values = true)]
        url: String,
    },
    /// Start sitedash as a service.
    Daemon {},
}
