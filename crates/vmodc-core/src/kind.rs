//! The closed catalogue of value kinds an interface description may use.

use std::fmt;

use serde::Serialize;

/// A value kind as written in a declaration (`INT`, `STRING`, `PRIV_TASK`, ...).
///
/// Every kind maps to exactly one native type name. The catalogue is closed:
/// an unknown kind token is a parse error, never an extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueKind {
    Acl,
    Backend,
    Blob,
    Body,
    Bool,
    Bytes,
    Duration,
    Enum,
    Header,
    Http,
    Int,
    Ip,
    Probe,
    Real,
    Regex,
    Stevedore,
    Strands,
    String,
    Sub,
    Time,
    Void,
    // Private state, scoped by lifetime
    PrivCall,
    PrivVcl,
    PrivTask,
    PrivTop,
}

impl ValueKind {
    pub const ALL: [ValueKind; 25] = [
        Self::Acl,
        Self::Backend,
        Self::Blob,
        Self::Body,
        Self::Bool,
        Self::Bytes,
        Self::Duration,
        Self::Enum,
        Self::Header,
        Self::Http,
        Self::Int,
        Self::Ip,
        Self::Probe,
        Self::Real,
        Self::Regex,
        Self::Stevedore,
        Self::Strands,
        Self::String,
        Self::Sub,
        Self::Time,
        Self::Void,
        Self::PrivCall,
        Self::PrivVcl,
        Self::PrivTask,
        Self::PrivTop,
    ];

    /// Look up a kind by its declaration token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }

    /// The declaration token for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Acl => "ACL",
            Self::Backend => "BACKEND",
            Self::Blob => "BLOB",
            Self::Body => "BODY",
            Self::Bool => "BOOL",
            Self::Bytes => "BYTES",
            Self::Duration => "DURATION",
            Self::Enum => "ENUM",
            Self::Header => "HEADER",
            Self::Http => "HTTP",
            Self::Int => "INT",
            Self::Ip => "IP",
            Self::Probe => "PROBE",
            Self::Real => "REAL",
            Self::Regex => "REGEX",
            Self::Stevedore => "STEVEDORE",
            Self::Strands => "STRANDS",
            Self::String => "STRING",
            Self::Sub => "SUB",
            Self::Time => "TIME",
            Self::Void => "VOID",
            Self::PrivCall => "PRIV_CALL",
            Self::PrivVcl => "PRIV_VCL",
            Self::PrivTask => "PRIV_TASK",
            Self::PrivTop => "PRIV_TOP",
        }
    }

    /// Native type name used in generated headers and sources.
    pub fn c_type(self) -> &'static str {
        match self {
            Self::Acl => "VCL_ACL",
            Self::Backend => "VCL_BACKEND",
            Self::Blob => "VCL_BLOB",
            Self::Body => "VCL_BODY",
            Self::Bool => "VCL_BOOL",
            Self::Bytes => "VCL_BYTES",
            Self::Duration => "VCL_DURATION",
            Self::Enum => "VCL_ENUM",
            Self::Header => "VCL_HEADER",
            Self::Http => "VCL_HTTP",
            Self::Int => "VCL_INT",
            Self::Ip => "VCL_IP",
            Self::Probe => "VCL_PROBE",
            Self::Real => "VCL_REAL",
            Self::Regex => "VCL_REGEX",
            Self::Stevedore => "VCL_STEVEDORE",
            Self::Strands => "VCL_STRANDS",
            Self::String => "VCL_STRING",
            Self::Sub => "VCL_SUB",
            Self::Time => "VCL_TIME",
            Self::Void => "VCL_VOID",
            Self::PrivCall | Self::PrivVcl | Self::PrivTask | Self::PrivTop => {
                "struct vmod_priv *"
            }
        }
    }

    /// Private-state kinds are supplied by the runtime, not by the caller.
    pub fn is_priv(self) -> bool {
        matches!(
            self,
            Self::PrivCall | Self::PrivVcl | Self::PrivTask | Self::PrivTop
        )
    }

    /// Name shown to users in documentation signatures.
    ///
    /// `STRANDS` is an implementation detail of string passing and reads as `STRING`.
    pub fn doc_name(self) -> &'static str {
        match self {
            Self::Strands => Self::String.as_str(),
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
