use std::path::{Path, PathBuf};

use vmodc_compiler::Staging;
use vmodc_compiler::emit::{EmitConfig, discover_sources, emit, emit_boilerplate};
use vmodc_compiler::module::Module;

use super::CommandError;
use super::input::Input;
use super::report;

pub struct GenerateArgs {
    pub files: Vec<PathBuf>,
    pub output: String,
    pub rst_dir: PathBuf,
    pub strict: bool,
    pub boilerplate: bool,
    pub color: bool,
}

pub fn run(args: GenerateArgs) {
    let input = Input::load(&args.files).unwrap_or_else(|err| report::fail(None, err, args.color));
    let (module, diagnostics) = input
        .parse(args.strict)
        .unwrap_or_else(|err| report::fail(Some(&input), err, args.color));
    report::diagnostics(&input, &diagnostics, args.color);
    report::notices(&diagnostics, args.color);

    if let Err(err) = generate(&args, &input, &module, Path::new(".")) {
        report::fail(Some(&input), err, args.color);
    }
}

/// Generates every artifact and commits them under `root` in one step.
///
/// Nothing is written unless all artifacts were staged.
pub fn generate(
    args: &GenerateArgs,
    input: &Input,
    module: &Module,
    root: &Path,
) -> Result<Vec<PathBuf>, CommandError> {
    let config = EmitConfig::new()
        .output_prefix(args.output.as_str())
        .doc_dir(&args.rst_dir)
        .input_name(input.name());

    let mut artifacts = emit(module, &config).into_vec();
    if args.boilerplate {
        let sources = discover_sources(root, module).map_err(|source| CommandError::Sources {
            path: root.to_path_buf(),
            source,
        })?;
        artifacts.push(emit_boilerplate(module, &config, &sources));
    }

    let mut staging = Staging::new(root);
    staging.stage_all(&artifacts)?;
    Ok(staging.commit()?)
}
