use std::fs;
use std::io::{self, Read};

use serde_json::Value;
use tracing::info;

use super::commands::RecordSource;
use crate::error::{ModelError, Result};
use crate::model::call::{self, CallOutput, Method};
use crate::model::{BaseModel, Mapping, Model};

/// Load the serialized record named by `source`, if any.
fn read_source(source: &RecordSource) -> Result<Option<Mapping>> {
    let text = if let Some(ref record) = source.record {
        record.clone()
    } else if let Some(ref path) = source.file {
        fs::read_to_string(path)?
    } else if source.stdin {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(&text)? {
        Value::Object(mapping) => Ok(Some(mapping)),
        other => Err(ModelError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn handle_create(json: bool) -> Result<()> {
    let model = BaseModel::new();
    info!(id = model.id()?, "created");

    if json {
        println!("{}", serde_json::to_string_pretty(&model.to_dict()?)?);
    } else {
        println!("{}", model.render()?);
    }

    Ok(())
}

pub fn handle_show(source: RecordSource) -> Result<()> {
    let mapping = read_source(&source)?.ok_or_else(|| {
        ModelError::InvalidRecord("no record given (use --record, --file or --stdin)".to_string())
    })?;
    let model = BaseModel::from_mapping(mapping)?;

    println!("{}", model.render()?);

    Ok(())
}

pub fn handle_call(method: String, args: Vec<String>, source: RecordSource) -> Result<()> {
    let method: Method = method.parse()?;
    let mut model = match read_source(&source)? {
        Some(mapping) => BaseModel::from_mapping(mapping)?,
        None => BaseModel::new(),
    };

    match call::invoke(&mut model, method, args.as_slice())? {
        CallOutput::Mapping(mapping) => {
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
        CallOutput::Text(text) => println!("{}", text),
    }

    Ok(())
}
