//! # Protograph Core
//!
//! Core types shared by the protograph parser and renderer: table records,
//! the semantic model of a protocol state diagram, owner resolution and
//! validated colors.

pub mod color;
pub mod owner;
pub mod record;
pub mod semantic;
