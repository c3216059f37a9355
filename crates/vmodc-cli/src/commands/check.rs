use std::path::PathBuf;

use super::input::Input;
use super::report;

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let input = Input::load(&args.files).unwrap_or_else(|err| report::fail(None, err, args.color));
    let (_, diagnostics) = input
        .parse(args.strict)
        .unwrap_or_else(|err| report::fail(Some(&input), err, args.color));

    report::diagnostics(&input, &diagnostics, args.color);
    report::notices(&diagnostics, args.color);

    // Silent on success (like cargo check)
}
