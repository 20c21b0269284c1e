//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main dispatch logic. pomod with no subcommand runs the
//! daemon; the control verbs (`toggle`, `reset`, `stop`) signal a running
//! instance. Supports the standard help, version, and debug flags while
//! gracefully handling unknown options.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the daemon with these settings
    Run { debug_enabled: bool },

    /// Send SIGUSR1 to the running instance (start/pause)
    Toggle,
    /// Send SIGUSR2 to the running instance (fresh timer)
    Reset,
    /// Send SIGTERM to the running instance (graceful shutdown)
    Stop,

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit nonzero
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        // Help/version flags take precedence over everything else
        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut debug_enabled = false;
        let mut command: Option<String> = None;

        for arg in &args_vec {
            if arg.starts_with('-') {
                match arg.as_str() {
                    "--debug" | "-d" => debug_enabled = true,
                    _ => {
                        log_warning!("Unknown option: {arg}");
                        return ParsedArgs {
                            action: CliAction::ShowHelpDueToError,
                        };
                    }
                }
                continue;
            }

            match arg.as_str() {
                "toggle" | "t" | "reset" | "r" | "stop" | "s" => {
                    if let Some(ref first) = command {
                        log_error!("Cannot use multiple commands at once: '{first}' and '{arg}'");
                        return ParsedArgs {
                            action: CliAction::ShowHelpDueToError,
                        };
                    }
                    command = Some(arg.clone());
                }
                _ => {
                    log_warning!("Unknown command: {arg}");
                    return ParsedArgs {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
            }
        }

        let action = match command.as_deref() {
            None => CliAction::Run { debug_enabled },
            Some("toggle") | Some("t") => CliAction::Toggle,
            Some("reset") | Some("r") => CliAction::Reset,
            // Loop above only stores known verbs
            Some(_) => CliAction::Stop,
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_decorated!(env!("CARGO_PKG_DESCRIPTION"));
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("pomod [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("toggle, t              Start or pause the running timer");
    log_indented!("reset, r               Discard the running timer and start fresh");
    log_indented!("stop, s                Cleanly terminate the running daemon");
    log_block_start!("With no command, pomod runs the daemon and prints the");
    log_indented!("status line to stdout once per poll cycle.");
    log_end!();
}
