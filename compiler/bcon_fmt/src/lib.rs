//! BCON serializer.
//!
//! Turns a [`Value`] back into BCON source. The output is a complete module,
//! `export [...];`, so it can be fed straight back to the parser:
//!
//! ```text
//! export [@name=>"web";@ports=>[@*=>80;@*=>443;];];
//! ```
//!
//! An empty `[]` reads back as a record, so empty sequences are written as
//! `empty.items` behind two declarations that bind it:
//!
//! ```text
//! class EmptyList(...items) [@items => items;];use EmptyList() as empty;export [@tags=>empty.items;];
//! ```
//!
//! With a non-zero indent each entry goes on its own line:
//!
//! ```text
//! export [
//!   @name => "web";
//!   @ports => [
//!     @* => 80;
//!     @* => 443;
//!   ];
//! ];
//! ```

mod emitter;
mod stringify;

#[cfg(test)]
mod tests;

use bcon_ir::Value;
use thiserror::Error;

pub use emitter::{Emitter, StringEmitter, WriteEmitter};

use stringify::{empty_sequence_prelude, Stringifier};

/// Hook applied to every non-container value before it is written.
///
/// Returning a container writes that container in place of the value.
pub type Replacer<'a> = &'a dyn Fn(&Value) -> Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StringifyError {
    /// Only records and sequences can be exported.
    #[error("cannot stringify {found}: expected an object or an array")]
    NotAContainer { found: &'static str },

    /// A record key that would not lex back as `@key`.
    #[error("cannot stringify key {key:?}: keys must be identifiers")]
    InvalidKey { key: String },
}

/// Serialize `value` as a BCON module.
///
/// `indent` is the number of spaces per nesting level; `0` keeps the whole
/// module on one line.
pub fn stringify(
    value: &Value,
    replacer: Option<Replacer<'_>>,
    indent: usize,
) -> Result<String, StringifyError> {
    let mut emitter = StringEmitter::new();
    stringify_to(&mut emitter, value, replacer, indent)?;
    Ok(emitter.output())
}

/// [`stringify`] into an existing emitter.
pub fn stringify_to<E: Emitter>(
    emitter: &mut E,
    value: &Value,
    replacer: Option<Replacer<'_>>,
    indent: usize,
) -> Result<(), StringifyError> {
    // The prelude is only known to be needed once the body is written.
    let mut body = StringEmitter::new();
    let mut stringifier = Stringifier::new(&mut body, replacer, indent);
    stringifier.module(value)?;
    if stringifier.wrote_empty_sequence() {
        empty_sequence_prelude(emitter, indent);
    }
    emitter.emit(body.as_str());
    Ok(())
}
