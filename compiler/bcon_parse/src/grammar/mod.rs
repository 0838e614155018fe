//! Grammar productions, one file per syntactic area.

mod class;
mod decl;
mod expr;
mod literal;
mod module;
mod ty;
