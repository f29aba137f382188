//! Strife Core Types and Definitions
//!
//! This crate provides the shared vocabulary of the Strife ACS front end.
//! It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Tokens**: Lexical token kinds and the keyword table ([`token`] module)
//! - **Values**: Un-evaluated expression trees ([`value`] module)
//! - **Features**: Top-level declarations recognised in source ([`feature`] module)
//! - **Documentation**: Parsed documentation comments ([`doc`] module)
//! - **Task items**: `TODO`-style comment annotations ([`task_item`] module)
//! - **Codebase**: The namespace-scoped document tree ([`codebase`] module)

pub mod codebase;
pub mod doc;
pub mod feature;
pub mod identifier;
pub mod task_item;
pub mod token;
pub mod value;
