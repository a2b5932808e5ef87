use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "lanno",
    about = concat!("lanno v", env!("CARGO_PKG_VERSION"), " - tags and notes for the files in a directory"),
    version,
    disable_version_flag = true
)]
pub struct Cli {
    /// Entry to annotate; omit to browse interactively
    pub path: Option<String>,

    /// `+tag`/`-tag` edits, or description words
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print the updated record as JSON
    #[arg(long)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    pub dir: Option<String>,

    /// Print version
    #[arg(short = 'V', short_alias = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// An option typed after `<PATH>`, which would otherwise be read as a
    /// token. `-X` stays a tag removal; long options and `-C` do not.
    pub fn misplaced_option(&self) -> Option<&str> {
        self.tokens
            .iter()
            .map(String::as_str)
            .find(|t| t.starts_with("--") || *t == "-C")
    }
}
