//! Invoke record methods by name, for callers that only have a method name
//! and an argument list (the CLI `call` command).

use tracing::debug;

use super::{Mapping, Model};
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    ToDict,
    Save,
    Str,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::ToDict => write!(f, "to_dict"),
            Method::Save => write!(f, "save"),
            Method::Str => write!(f, "__str__"),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "to_dict" => Ok(Method::ToDict),
            "save" => Ok(Method::Save),
            "__str__" | "str" => Ok(Method::Str),
            _ => Err(ModelError::UnknownMethod(s.to_string())),
        }
    }
}

/// Result of a dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    Mapping(Mapping),
    Text(String),
}

/// Run `method` on `model`.
///
/// Every method takes no arguments; a non-empty `args` fails with
/// `UnexpectedArguments` before the record is touched. `save` returns the
/// post-save mapping.
pub fn invoke<M: Model, A: AsRef<str>>(
    model: &mut M,
    method: Method,
    args: &[A],
) -> Result<CallOutput> {
    if !args.is_empty() {
        return Err(ModelError::UnexpectedArguments {
            method: method.to_string(),
            given: args.len(),
        });
    }
    debug!(%method, class = M::CLASS_NAME, "invoking");

    match method {
        Method::ToDict => Ok(CallOutput::Mapping(model.to_dict()?)),
        Method::Save => {
            model.save();
            Ok(CallOutput::Mapping(model.to_dict()?))
        }
        Method::Str => Ok(CallOutput::Text(model.render()?)),
    }
}
