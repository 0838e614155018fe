//! The `check` command: evaluate a file and report whether it is valid.

use bcon_ir::OsFileSystem;

use super::{CommandError, Input, Options};

/// Run the full pipeline on `path`, discarding the value.
///
/// Class validation happens during evaluation, so a file that parses but
/// builds an ill-typed instance still fails here.
pub fn check_file(path: &str, options: &Options) -> Result<String, CommandError> {
    let input = Input::load(path, options)?;
    let tokens = bcon_lexer::lex(&input.text).map_err(|err| input.report(&err))?;
    let module = bcon_parse::parse(&tokens, &input.config, &OsFileSystem)
        .map_err(|err| input.report(&err))?;
    bcon_eval::parse_source(&input.text, &input.config, &OsFileSystem)
        .map_err(|err| input.report(&err))?;

    Ok(format!(
        "OK: {path} ({} imports, {} uses, {} classes)",
        module.imports.len(),
        module.uses.len(),
        module.classes.len()
    ))
}
