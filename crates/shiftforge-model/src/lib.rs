//! shiftforge Model - the constraint-model layer.
//!
//! This crate wraps the CBC mixed-integer backend behind a small typed
//! surface:
//! - [`Model`] owns the backend model and hands out opaque [`VarId`] handles
//! - [`LinearExpr`] builds the linear left-hand sides of assertions
//! - reified helpers provide the boolean encodings the constraint families
//!   need (`or`, `is-zero`, `and-not`)
//! - [`VariableBuilder`] allocates the assignment-variable tensor
//!
//! Model construction is single-threaded; the backend may parallelize its
//! own search via [`SolveParameters::num_search_workers`].

pub mod expr;
pub mod model;
pub mod variables;

pub use expr::LinearExpr;
pub use model::{Model, ModelSolution, SolveParameters, SolveStatus, VarId};
pub use variables::{VariableBuilder, Variables};
