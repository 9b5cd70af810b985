//! Style value lookup command.

use crate::cli::common::{print_json, CliError, CliResult, GlobalArgs};
use crate::models::Value;
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Typed conversions offered by `get --as`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    /// 32-bit integer (hex and octal numerals accepted)
    Int,
    /// Single-precision float
    Float,
    /// Double-precision float
    Double,
    /// Boolean (`true` unless the value says otherwise)
    Bool,
    /// Text
    String,
    /// `sp` dimension converted to pixels with `--density`
    Pixel,
}

/// Resolve a style value (schema style first, then theme style)
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Key or `namespace/key` path, e.g. `key_height` or `layout/position`
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Convert with a typed accessor; absent keys yield the type's default
    #[arg(long = "as", value_name = "TYPE")]
    pub value_type: Option<ValueType>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct GetResult {
    path: String,
    found: bool,
    value: serde_json::Value,
}

impl GetArgs {
    /// Execute the get command
    pub fn execute(&self, global: &GlobalArgs) -> CliResult<()> {
        let config = global.open_config()?;
        let found = config.has_key(&self.path);

        let value = match self.value_type {
            None => {
                let value = config
                    .resolve(&self.path)
                    .ok_or_else(|| CliError::not_found(format!("Key not found: {}", self.path)))?;
                to_json(&value)?
            }
            Some(ValueType::Int) => config.try_get_int(&self.path)?.into(),
            Some(ValueType::Float) => config.try_get_float(&self.path)?.into(),
            Some(ValueType::Double) => config.try_get_double(&self.path)?.into(),
            Some(ValueType::Bool) => config.try_get_boolean(&self.path)?.into(),
            Some(ValueType::String) => config.try_get_string(&self.path)?.into(),
            Some(ValueType::Pixel) => config.try_get_pixel(&self.path)?.into(),
        };

        let result = GetResult {
            path: self.path.clone(),
            found,
            value,
        };

        if self.json {
            print_json(&result)?;
        } else {
            match &result.value {
                serde_json::Value::String(s) => println!("{}", s),
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => print_json(&result.value)?,
                other => println!("{}", other),
            }
        }

        Ok(())
    }
}

fn to_json(value: &Value) -> CliResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| CliError::io(format!("Failed to serialize value: {e}")))
}
