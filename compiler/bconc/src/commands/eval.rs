//! The `eval` command: evaluate a file and print the result as BCON.

use bcon_ir::OsFileSystem;

use super::{CommandError, Input, Options};

/// Evaluate `path` and re-serialize the exported value.
///
/// Non-container results have no module form and print as their display
/// string.
pub fn eval_file(path: &str, options: &Options) -> Result<String, CommandError> {
    let input = Input::load(path, options)?;
    let value = bcon_eval::parse_source(&input.text, &input.config, &OsFileSystem)
        .map_err(|err| input.report(&err))?;

    match value {
        bcon_ir::Value::Array(_) | bcon_ir::Value::Object(_) => {
            Ok(bcon_fmt::stringify(&value, None, options.indent)?)
        }
        other => Ok(other.to_display_string()),
    }
}
