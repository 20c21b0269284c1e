//! Binary entry point and CLI dispatch.
//!
//! Parses the command line, routes to the daemon or a control subcommand,
//! and reports any error chain through the logger with a nonzero exit code.

use pomod::args::{self, CliAction, ParsedArgs};
use pomod::daemon::Pomod;
use pomod::logger::Log;
use pomod::{commands, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            return;
        }
        CliAction::ShowHelp => {
            args::display_help();
            return;
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(1);
        }
        CliAction::Run { debug_enabled } => {
            Log::set_debug(debug_enabled);
            Pomod::new(debug_enabled).run()
        }
        CliAction::Toggle => commands::handle_toggle_command(),
        CliAction::Reset => commands::handle_reset_command(),
        CliAction::Stop => commands::handle_stop_command(),
    };

    if let Err(e) = result {
        log_error_exit!("{e:#}");
        std::process::exit(1);
    }
}
