//! Expression evaluation: literals, references, containers and class
//! instantiation.

use bcon_ir::ast::{Argument, Container, ContainerKind, Expr, ExprKind, Literal, Member};
use bcon_ir::{Buffer, Record, Value};
use bcon_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::{walk_path, ClassDef, EvalContext, Interpreter};
use crate::errors::{
    constructor_without_arguments, io_error, missing_constructor_value, missing_field,
    spread_argument, spread_into_array, spread_into_object, type_mismatch, undefined_variable,
    unknown_class, unknown_fields, validator_with_arguments, EvalError,
};

static UNDEFINED: Value = Value::Undefined;

impl Interpreter<'_> {
    /// Evaluate `expr`, tagging any error with the innermost failing span.
    pub(crate) fn eval_expr(&self, expr: &Expr, ctx: EvalContext<'_>) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, ctx))
            .map_err(|err| err.with_span(expr.span))
    }

    fn eval_expr_inner(&self, expr: &Expr, ctx: EvalContext<'_>) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Literal(literal) => self.eval_literal(literal, ctx),
            // The ambient roots only exist as the head of a path.
            ExprKind::Ident(name) if matches!(name.as_str(), "Main" | "This") => {
                Err(undefined_variable(name))
            }
            ExprKind::Ident(name) => self.resolve_root(name, ctx).cloned(),
            ExprKind::Path(path) => {
                let (root, rest) = path
                    .split_first()
                    .ok_or_else(|| undefined_variable(""))?;
                let root = self.resolve_root(root, ctx)?;
                Ok(walk_path(root, rest).cloned().unwrap_or(Value::Undefined))
            }
            ExprKind::Container(container) => self.eval_container(container, ctx),
            ExprKind::ConstructorCall { class, args } => {
                self.eval_constructor_call(class, args, ctx)
            }
            ExprKind::ClassInstance { class, body } => self.eval_class_instance(class, body, ctx),
            ExprKind::Conditional { left, right } => {
                let value = self.eval_expr(left, ctx)?;
                if value.is_nullish() {
                    self.eval_expr(right, ctx)
                } else {
                    Ok(value)
                }
            }
        }
    }

    /// First segment of a reference.
    ///
    /// `Main` and `This` name the ambient containers and are `undefined`
    /// outside one. Other names are looked up in module variables first,
    /// then constructor parameters, so a `use` binding wins over a
    /// parameter of the same name.
    pub(super) fn resolve_root<'s>(
        &'s self,
        name: &str,
        ctx: EvalContext<'s>,
    ) -> Result<&'s Value, EvalError> {
        match name {
            "Main" => Ok(ctx.main.unwrap_or(&UNDEFINED)),
            "This" => Ok(ctx.this.unwrap_or(&UNDEFINED)),
            _ => self
                .variables
                .get(name)
                .or_else(|| ctx.params.and_then(|params| params.get(name)))
                .ok_or_else(|| undefined_variable(name)),
        }
    }

    fn eval_literal(&self, literal: &Literal, ctx: EvalContext<'_>) -> Result<Value, EvalError> {
        Ok(match literal {
            Literal::String(raw) => Value::String(self.interpolate(raw, ctx)),
            Literal::Number(n) => Value::Number(*n),
            Literal::BigInt(n) => Value::BigInt(n.clone()),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
            Literal::Undefined => Value::Undefined,
            Literal::Date(date) => Value::Date(*date),
            Literal::RegExp(re) => Value::RegExp(re.clone()),
            Literal::File(file) => {
                let bytes = self
                    .fs
                    .read(&file.path)
                    .map_err(|err| io_error(&file.path, &err))?;
                Value::Buffer(Buffer::new(bytes, file.encoding))
            }
        })
    }

    /// Build a record or sequence.
    ///
    /// Each member sees the partially built container as `This`, and as
    /// `Main` when no outer container exists. A body of only spreads takes
    /// its kind from the first spread, which is evaluated once.
    fn eval_container(
        &self,
        container: &Container,
        ctx: EvalContext<'_>,
    ) -> Result<Value, EvalError> {
        let mut pending = None;
        let is_array = match container.kind {
            ContainerKind::Object => false,
            ContainerKind::Array => true,
            ContainerKind::Unknown => match container.members.first() {
                Some(Member::Spread { argument }) => {
                    let value = self.eval_expr(argument, ctx)?;
                    let is_array = matches!(value, Value::Array(_));
                    pending = Some(value);
                    is_array
                }
                _ => false,
            },
        };

        let capacity = container.members.len();
        let mut result = if is_array {
            Value::Array(Vec::with_capacity(capacity))
        } else {
            Value::Object(Record::with_capacity(capacity))
        };

        for member in &container.members {
            let value = {
                let inner = EvalContext {
                    main: ctx.main.or(Some(&result)),
                    this: Some(&result),
                    params: ctx.params,
                };
                match member {
                    Member::Spread { argument } => match pending.take() {
                        Some(value) => value,
                        None => self.eval_expr(argument, inner)?,
                    },
                    Member::Property { value, .. } | Member::Element { value } => {
                        self.eval_expr(value, inner)?
                    }
                }
            };

            match (member, &mut result) {
                (Member::Spread { argument }, Value::Array(items)) => match value {
                    Value::Array(spread) => items.extend(spread),
                    other => {
                        return Err(spread_into_array(other.type_name()).with_span(argument.span))
                    }
                },
                (Member::Spread { argument }, Value::Object(record)) => match value {
                    Value::Object(spread) => {
                        for (key, value) in spread {
                            record.insert(key, value);
                        }
                    }
                    other => {
                        return Err(spread_into_object(other.type_name()).with_span(argument.span))
                    }
                },
                (Member::Property { key, .. }, Value::Object(record)) => {
                    record.insert(key.clone(), value);
                }
                (Member::Element { .. }, Value::Array(items)) => items.push(value),
                // The parser never mixes keyed members of both kinds.
                _ => {}
            }
        }

        Ok(result)
    }

    /// `Name(args)`: bind arguments to parameters and build an instance
    /// from field defaults.
    fn eval_constructor_call(
        &self,
        class: &str,
        args: &[Argument],
        ctx: EvalContext<'_>,
    ) -> Result<Value, EvalError> {
        let def = self.classes.get(class).ok_or_else(|| unknown_class(class))?;
        if !def.is_constructor() {
            return Err(validator_with_arguments(class));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = self.eval_expr(&arg.value, ctx)?;
            if !arg.spread {
                values.push(value);
                continue;
            }
            match value {
                Value::Array(items) => values.extend(items),
                other => {
                    return Err(spread_argument(other.type_name()).with_span(arg.value.span))
                }
            }
        }

        // Outer parameters stay visible unless shadowed.
        let mut params = ctx.params.cloned().unwrap_or_default();
        let mut values = values.into_iter();
        for param in &def.parameters {
            let value = if param.spread {
                Value::Array(values.by_ref().collect())
            } else {
                values.next().unwrap_or(Value::Undefined)
            };
            params.insert(param.name.clone(), value);
        }

        self.construct(def, &params, ctx)
    }

    fn construct(
        &self,
        def: &ClassDef,
        params: &FxHashMap<String, Value>,
        ctx: EvalContext<'_>,
    ) -> Result<Value, EvalError> {
        let inner = EvalContext {
            params: Some(params),
            ..ctx
        };
        let mut instance = Record::with_capacity(def.fields.len());

        for field in &def.fields {
            let value = match &field.default {
                Some(default) => {
                    let value = self.eval_expr(default, inner)?;
                    if field.optional && value.is_nullish() {
                        continue;
                    }
                    value
                }
                None if field.optional => continue,
                None => return Err(missing_constructor_value(&field.name, &def.name)),
            };
            self.validate(&value, &field.ty, &format!("{}.{}", def.name, field.name))?;
            instance.insert(field.name.clone(), value);
        }

        Ok(Value::Object(instance))
    }

    /// `Name [ … ]`: check a record against a validator class, filling in
    /// defaults and rejecting keys the class does not declare.
    fn eval_class_instance(
        &self,
        class: &str,
        body: &Container,
        ctx: EvalContext<'_>,
    ) -> Result<Value, EvalError> {
        let def = self.classes.get(class).ok_or_else(|| unknown_class(class))?;
        if def.is_constructor() {
            return Err(constructor_without_arguments(class));
        }

        let provided = match self.eval_container(body, ctx)? {
            Value::Object(record) => record,
            other => {
                return Err(type_mismatch(
                    class,
                    format!("instance of {class}"),
                    other.type_name(),
                ))
            }
        };

        let mut instance = Record::with_capacity(def.fields.len());
        for field in &def.fields {
            let value = match (provided.get(&field.name), &field.default) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => self.eval_expr(default, ctx)?,
                (None, None) if field.optional => continue,
                (None, None) => return Err(missing_field(&field.name, &def.name)),
            };
            self.validate(&value, &field.ty, &format!("{}.{}", def.name, field.name))?;
            instance.insert(field.name.clone(), value);
        }

        let extra: Vec<String> = provided
            .keys()
            .filter(|key| def.field(key).is_none())
            .map(str::to_owned)
            .collect();
        if !extra.is_empty() {
            return Err(unknown_fields(class, extra));
        }

        Ok(Value::Object(instance))
    }

    fn interpolate(&self, raw: &str, ctx: EvalContext<'_>) -> String {
        super::interpolate_with(raw, |path| {
            let segments: Vec<&str> = path.split('.').collect();
            let (root, rest) = segments.split_first()?;
            let root = self.resolve_root(root, ctx).ok()?;
            walk_path(root, rest).cloned()
        })
    }
}
