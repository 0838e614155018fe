//! Class registry.
//!
//! Inheritance is resolved once, at registration: each stored class carries
//! its fully flattened field list and effective parameters, so instantiation
//! and validation never walk a hierarchy.

use bcon_ir::ast::{ClassDecl, ClassField, Param};
use rustc_hash::FxHashMap;

use crate::errors::{unknown_base_class, unknown_mixin, EvalError};

/// A registered class with inheritance already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDef {
    pub name: String,
    /// Own parameters, or the base class's when the declaration has none.
    pub parameters: Vec<Param>,
    /// Mixin fields in listed order, then base fields, then own fields.
    pub fields: Vec<ClassField>,
}

impl ClassDef {
    /// A class with parameters is built with `Name(args)`; one without is a
    /// validator applied to `Name [ … ]`.
    #[inline]
    pub fn is_constructor(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&ClassField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<String, ClassDef>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Flatten `decl` against already registered classes and store it.
    ///
    /// The base and every mixin must be declared earlier in the module.
    /// A field redeclared later in the flattening order replaces the earlier
    /// one in place. Redeclaring a class replaces the previous definition.
    pub fn register(&mut self, decl: &ClassDecl) -> Result<(), EvalError> {
        let base = match &decl.base {
            Some(name) => Some(self.get(name).ok_or_else(|| unknown_base_class(name))?),
            None => None,
        };

        let mut fields = Vec::new();
        for mixin in &decl.mixins {
            let def = self.get(mixin).ok_or_else(|| unknown_mixin(mixin))?;
            merge_fields(&mut fields, &def.fields);
        }

        let mut parameters = decl.parameters.clone();
        if let Some(base) = base {
            merge_fields(&mut fields, &base.fields);
            if parameters.is_empty() {
                parameters.clone_from(&base.parameters);
            }
        }
        merge_fields(&mut fields, &decl.fields);

        tracing::trace!(
            class = %decl.name,
            fields = fields.len(),
            parameters = parameters.len(),
            "registered class"
        );
        self.classes.insert(
            decl.name.clone(),
            ClassDef {
                name: decl.name.clone(),
                parameters,
                fields,
            },
        );
        Ok(())
    }
}

fn merge_fields(into: &mut Vec<ClassField>, from: &[ClassField]) {
    for field in from {
        match into.iter_mut().find(|f| f.name == field.name) {
            Some(slot) => slot.clone_from(field),
            None => into.push(field.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use bcon_ir::{Span, TypeExpr};
    use pretty_assertions::assert_eq;

    fn field(name: &str) -> ClassField {
        ClassField {
            name: name.to_owned(),
            ty: TypeExpr::any(),
            optional: false,
            default: None,
            span: Span::new(0, 0),
        }
    }

    fn class(name: &str, base: Option<&str>, mixins: &[&str], fields: &[&str]) -> ClassDecl {
        ClassDecl {
            name: name.to_owned(),
            parameters: Vec::new(),
            base: base.map(str::to_owned),
            mixins: mixins.iter().map(|m| (*m).to_owned()).collect(),
            fields: fields.iter().map(|f| field(f)).collect(),
            span: Span::new(0, 0),
        }
    }

    fn names(def: &ClassDef) -> Vec<&str> {
        def.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn mixins_then_base_then_own() {
        let mut registry = ClassRegistry::new();
        registry.register(&class("A", None, &[], &["x"])).unwrap();
        registry.register(&class("M1", None, &[], &["m1"])).unwrap();
        registry.register(&class("M2", None, &[], &["m2"])).unwrap();
        registry
            .register(&class("B", Some("A"), &["M1", "M2"], &["y"]))
            .unwrap();
        registry.register(&class("C", Some("B"), &[], &["z"])).unwrap();

        assert_eq!(names(registry.get("B").unwrap()), ["m1", "m2", "x", "y"]);
        assert_eq!(names(registry.get("C").unwrap()), ["m1", "m2", "x", "y", "z"]);
    }

    #[test]
    fn redeclared_field_keeps_position() {
        let mut registry = ClassRegistry::new();
        registry.register(&class("A", None, &[], &["x", "y"])).unwrap();
        let mut own = class("B", Some("A"), &[], &["x"]);
        own.fields[0].optional = true;
        registry.register(&own).unwrap();

        let b = registry.get("B").unwrap();
        assert_eq!(names(b), ["x", "y"]);
        assert!(b.field("x").unwrap().optional);
    }

    #[test]
    fn parameters_inherit_only_when_absent() {
        let mut registry = ClassRegistry::new();
        let mut base = class("P", None, &[], &["x"]);
        base.parameters = vec![Param {
            name: "x".to_owned(),
            spread: false,
        }];
        registry.register(&base).unwrap();
        registry.register(&class("Q", Some("P"), &[], &[])).unwrap();

        let q = registry.get("Q").unwrap();
        assert!(q.is_constructor());
        assert_eq!(q.parameters, base.parameters);
    }

    #[test]
    fn missing_base_and_mixin() {
        let mut registry = ClassRegistry::new();
        let err = registry
            .register(&class("B", Some("Nope"), &[], &[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Base class \"Nope\" not found");

        let err = registry
            .register(&class("B", None, &["Gone"], &[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Mixin class \"Gone\" not found");
        assert!(registry.is_empty());
    }
}
