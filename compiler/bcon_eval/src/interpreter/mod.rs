//! Tree-walking evaluator for one parsed module.
//!
//! # Order
//!
//! 1. Every class declaration is registered, in source order.
//! 2. Imports are loaded through the [`ImportLoader`] and bound.
//! 3. `use` declarations are evaluated, in source order, with no ambient
//!    container, and bound.
//! 4. The export expression is evaluated and returned.
//!
//! Variables are module-global and flat; a later binding of the same name
//! replaces the earlier one.

mod classes;
mod expr;
mod interpolate;
mod validate;

use bcon_ir::ast::{Binding, Module};
use bcon_ir::{FileSystem, Value};
use rustc_hash::FxHashMap;

use crate::errors::EvalError;
use crate::import::ImportLoader;

pub use classes::{ClassDef, ClassRegistry};
pub use interpolate::interpolate_with;
pub use validate::json_repr;

/// Ambient state threaded through expression evaluation.
///
/// `main` is the outermost container under construction and `this` the
/// innermost; `params` holds constructor arguments while a constructor's
/// defaults are evaluated. All three are borrowed, never owned.
#[derive(Copy, Clone, Debug, Default)]
pub struct EvalContext<'c> {
    pub main: Option<&'c Value>,
    pub this: Option<&'c Value>,
    pub params: Option<&'c FxHashMap<String, Value>>,
}

pub struct Interpreter<'a> {
    loader: &'a mut dyn ImportLoader,
    fs: &'a dyn FileSystem,
    variables: FxHashMap<String, Value>,
    classes: ClassRegistry,
}

impl<'a> Interpreter<'a> {
    pub fn new(loader: &'a mut dyn ImportLoader, fs: &'a dyn FileSystem) -> Self {
        Interpreter {
            loader,
            fs,
            variables: FxHashMap::default(),
            classes: ClassRegistry::new(),
        }
    }

    /// Evaluate `module` and return its exported value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&mut self, module: &Module) -> Result<Value, EvalError> {
        for class in &module.classes {
            self.classes
                .register(class)
                .map_err(|err| err.with_span(class.span))?;
        }

        for import in &module.imports {
            let value = self
                .loader
                .load(&import.source)
                .map_err(|err| err.with_span(import.span))?;
            self.bind(&import.binding, value);
        }

        for decl in &module.uses {
            let value = self
                .eval_expr(&decl.value, EvalContext::default())
                .map_err(|err| err.with_span(decl.span))?;
            self.bind(&decl.binding, value);
        }

        tracing::debug!(
            classes = self.classes.len(),
            variables = self.variables.len(),
            "evaluating export"
        );
        self.eval_expr(&module.body, EvalContext::default())
    }

    /// Bind a name, or every leaf of a destructuring pattern.
    ///
    /// A pattern path that runs into a missing key, an out-of-range index or
    /// a null or undefined value binds `undefined`.
    fn bind(&mut self, binding: &Binding, value: Value) {
        match binding {
            Binding::Ident(name) => {
                self.variables.insert(name.clone(), value);
            }
            Binding::Destructuring(entries) => {
                for entry in entries {
                    let bound = walk_path(&value, &entry.path)
                        .cloned()
                        .unwrap_or(Value::Undefined);
                    self.variables.insert(entry.alias.clone(), bound);
                }
            }
        }
    }
}

/// Follow `path` from `root`; `None` once a step has nothing to look into.
pub(crate) fn walk_path<'v, S: AsRef<str>>(root: &'v Value, path: &[S]) -> Option<&'v Value> {
    path.iter().try_fold(root, |current, key| {
        if current.is_nullish() {
            None
        } else {
            current.get_key(key.as_ref())
        }
    })
}
