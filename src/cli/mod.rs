use std::path::PathBuf;

use clap::Subcommand;

use aoai_labs::application::{
    DEFAULT_FUNCTION_FILE, DEFAULT_GO_FISH_FILE, DEFAULT_IMAGE_DEPLOYMENT, DEFAULT_OUTPUT_FILE,
    DEFAULT_SYSTEM_FILE,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Chat with a hiking guide persona
    Chat,

    /// Chat using a system message re-read from a file on every turn
    Prompt {
        #[arg(long, default_value = DEFAULT_SYSTEM_FILE)]
        system_file: PathBuf,

        /// Print the full JSON response before the answer
        #[arg(long)]
        full_response: bool,
    },

    /// Generate code for a sample file and write the result to disk
    Codegen {
        #[arg(long, default_value = DEFAULT_FUNCTION_FILE)]
        function_file: PathBuf,

        #[arg(long, default_value = DEFAULT_GO_FISH_FILE)]
        go_fish_file: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Print the full JSON response before writing the result
        #[arg(long)]
        full_response: bool,
    },

    /// Generate one image from a prompt
    Image {
        #[arg(long, default_value = DEFAULT_IMAGE_DEPLOYMENT)]
        deployment: String,
    },

    /// Ask one question grounded in an Azure AI Search index
    OwnData {
        /// Print the citations returned with the answer
        #[arg(long)]
        citations: bool,
    },
}
