//! Callable prototypes: functions, methods, object constructors and their
//! synthesized lifecycle functions.

use vmodc_core::text::is_identifier;

use crate::diagnostics::DiagnosticKind;
use crate::parser::{Cursor, PResult, ParseCtx};
use crate::types::{Argument, TypeSpec, parse_arguments};

/// Native context argument every VCL-callable function takes first.
pub const CONTEXT_ARG: &str = "VRT_CTX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub ret: TypeSpec,
    /// Name as written, `.name` for methods.
    pub base_name: String,
    /// Enclosing prefix plus base name, e.g. `foo.bar` for a method.
    pub name: String,
    /// Whether [`CONTEXT_ARG`] leads the native argument list.
    pub context: bool,
    /// Native arguments after the context and before declared ones.
    pub implicit: Vec<String>,
    pub args: Vec<Argument>,
    /// Arguments are passed through a generated struct.
    pub argstruct: bool,
}

impl Prototype {
    /// Name with `.` replaced by `_`.
    pub fn native_name(&self) -> String {
        self.name.replace('.', "_")
    }

    pub fn argstruct_name(&self) -> String {
        format!("struct VARGS({})", self.native_name())
    }

    /// Context plus implicit arguments.
    pub fn leading_args(&self) -> Vec<&str> {
        let context = self.context.then_some(CONTEXT_ARG);
        context
            .into_iter()
            .chain(self.implicit.iter().map(String::as_str))
            .collect()
    }

    /// Native declaration `RET name(args);` under the given function name.
    pub fn declaration(&self, name: &str) -> String {
        let mut args: Vec<String> = self.leading_args().into_iter().map(String::from).collect();
        if self.argstruct {
            args.push(format!("{}*", self.argstruct_name()));
        } else {
            args.extend(self.args.iter().map(|a| a.ty.c_type().to_string()));
        }
        format!("{} {}({});", self.ret.c_type(), name, args.join(", "))
    }

    /// Copy under `name` with another native calling convention.
    pub(crate) fn derive(&self, name: String, context: bool, implicit: Vec<String>) -> Self {
        Self {
            name,
            context,
            implicit,
            ..self.clone()
        }
    }

    pub fn has_optional_args(&self) -> bool {
        self.args.iter().any(|a| a.optional)
    }
}

/// `[A-Za-z.][A-Za-z0-9_]*`
fn is_base_name(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '.')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Next token as a candidate name, validated later by [`parse_prototype`].
pub(crate) fn parse_base_name<'s>(
    ctx: &mut ParseCtx<'_>,
    cursor: &mut Cursor<'_, 's>,
) -> PResult<&'s str> {
    Ok(ctx.take(cursor, "a name")?.text)
}

/// Validates the names and parses the argument list that ends the declaration.
pub(crate) fn parse_prototype(
    ctx: &mut ParseCtx<'_>,
    cursor: &mut Cursor<'_, '_>,
    ret: TypeSpec,
    base_name: &str,
    prefix: &str,
) -> PResult<Prototype> {
    if !is_base_name(base_name) {
        return Err(ctx.fail(DiagnosticKind::IllegalName, base_name));
    }

    let name = format!("{prefix}{base_name}");
    let native = name.replace('.', "_");
    if !is_identifier(&native) {
        return Err(ctx.fail(DiagnosticKind::IllegalNativeName, &native));
    }

    let (args, argstruct) = parse_arguments(ctx, cursor)?;

    Ok(Prototype {
        ret,
        base_name: base_name.to_string(),
        name,
        context: true,
        implicit: Vec::new(),
        args,
        argstruct,
    })
}
