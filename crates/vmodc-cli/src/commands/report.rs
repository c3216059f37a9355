//! Terminal output shared by the commands.

use std::thread;
use std::time::Duration;

use vmodc_compiler::diagnostics::Notice;
use vmodc_compiler::Diagnostics;
use vmodc_core::Colors;

use super::CommandError;
use super::input::Input;

const BANNER_WIDTH: usize = 72;

/// Time a notice stays on screen before the run continues.
const NOTICE_PAUSE: Duration = Duration::from_secs(3);

/// Prints every rejection or warning with the offending declaration line.
pub fn diagnostics(input: &Input, diagnostics: &Diagnostics, colored: bool) {
    if diagnostics.is_empty() {
        return;
    }
    let name = input.name();
    eprint!(
        "{}",
        diagnostics
            .printer()
            .source(&input.source)
            .path(&name)
            .colored(colored)
            .render()
    );
}

pub fn notice_banner(notice: &Notice, colors: Colors) -> String {
    let rule = "#".repeat(BANNER_WIDTH);
    format!(
        "{bold}{rule}{reset}\n{yellow}NOTICE: {message}{reset}\n{bold}{rule}{reset}\n",
        bold = colors.bold,
        yellow = colors.yellow,
        reset = colors.reset,
        message = notice.message,
    )
}

/// Prints each notice as a banner, pausing after every one.
pub fn notices(diagnostics: &Diagnostics, colored: bool) {
    let colors = Colors::new(colored);
    for notice in diagnostics.notices() {
        eprint!("{}", notice_banner(notice, colors));
        thread::sleep(NOTICE_PAUSE);
    }
}

/// Reports `err` and exits with status 1.
pub fn fail(input: Option<&Input>, err: CommandError, colored: bool) -> ! {
    let rejected = match &err {
        CommandError::Compile(compile) => compile.diagnostics(),
        _ => None,
    };
    match (input, rejected) {
        (Some(input), Some(rejected)) => {
            diagnostics(input, rejected, colored);
            notices(rejected, colored);
        }
        _ => eprintln!("error: {err}"),
    }
    std::process::exit(1);
}
