//! The `lex` command: dump the token stream.

use std::fmt::Write as _;

use super::{CommandError, Input, Options};

/// One line per token: `kind text line:column`.
pub fn lex_file(path: &str, options: &Options) -> Result<String, CommandError> {
    let input = Input::load(path, options)?;
    let tokens = bcon_lexer::lex(&input.text).map_err(|err| input.report(&err))?;

    let mut out = String::new();
    for token in tokens.iter() {
        // Derived `Debug` ignores width, so pad the rendered name.
        let kind = format!("{:?}", token.kind);
        let _ = writeln!(
            out,
            "{kind:<12} {:<24} {}:{}",
            tokens.text(token),
            token.line,
            token.column
        );
    }
    Ok(out)
}
