pub mod let_there_be_light;

use {
    anyhow::Result,
    argh::FromArgs,
    let_there_be_light::LetThereBeLightSubCmd,
};

pub trait SubCmd {
    fn run(&self) -> anyhow::Result<()>;
}

/// The single recognized command token.
pub const LET_THERE_BE_LIGHT: &str = "let-there-be-light";

/// The god CLI tool.
#[derive(FromArgs)]
pub struct MainCmd {
    #[argh(subcommand)]
    nested: Cmd,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Cmd {
    LetThereBeLight(LetThereBeLightSubCmd),
}

impl MainCmd {
    /// Run the nested command.
    pub fn run(&self) -> Result<()> {
        match &self.nested {
            Cmd::LetThereBeLight(cmd) => cmd.run(),
        }
    }
}

/// Whether the first command-line token selects a recognized command.
pub fn recognized(first: Option<&str>) -> bool {
    first == Some(LET_THERE_BE_LIGHT)
}

/// Fixed usage text for unrecognized or missing commands.
pub fn usage() -> String {
    [
        "Usage: god <command>",
        "",
        "Commands:",
        "  let-there-be-light    clone or update the working copy and build it",
        "",
        "Environment:",
        "  BRANCH    branch to check out and reset to (default: main)",
        "  DEBUG     echo external commands before running them (default: false)",
        "",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_names_the_recognized_command() {
        let usage = usage();
        assert!(usage.contains(LET_THERE_BE_LIGHT));
        assert!(usage.contains("BRANCH"));
        assert!(usage.contains("DEBUG"));
    }

    #[test]
    fn only_the_exact_token_is_recognized() {
        assert!(recognized(Some("let-there-be-light")));
        assert!(!recognized(Some("let-there-be-dark")));
        assert!(!recognized(Some("")));
        assert!(!recognized(None));
    }
}
