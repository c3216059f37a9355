use std::path::PathBuf;

use vmodc_compiler::emit::{AbiBinding, Protocol};

use super::CommandError;
use super::input::Input;
use super::report;

pub struct DumpArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    /// Fills in the fields normally bound when the native code is compiled.
    pub binding: Option<AbiBinding>,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let input = Input::load(&args.files).unwrap_or_else(|err| report::fail(None, err, args.color));
    match dump(&args, &input) {
        Ok(json) => println!("{json}"),
        Err(err) => report::fail(Some(&input), err, args.color),
    }
}

pub fn dump(args: &DumpArgs, input: &Input) -> Result<String, CommandError> {
    let (module, diagnostics) = input.parse(args.strict)?;
    report::diagnostics(input, &diagnostics, args.color);

    let protocol = Protocol::build(&module);
    match &args.binding {
        Some(binding) => Ok(serde_json::to_string_pretty(&protocol.resolve(binding))?),
        None => Ok(protocol.to_json()),
    }
}
