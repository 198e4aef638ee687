//! `st-behavior` — stateless async behavior trees.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`status`]    | `Status` (`Success`, `Failure`, `Running`)                  |
//! | [`node`]      | `Behavior<C>` trait, `Node<C>` shared handle               |
//! | [`composite`] | `Sequence`, `Selector` and their builder helpers            |
//! | [`decorator`] | `Invert`, `AlwaysSucceed`, `AlwaysFail`                     |
//!
//! # Design notes
//!
//! Trees carry no per-evaluation state.  A pass always starts at the root and
//! `Running` is a verdict, not a resume pointer: the next pass re-walks the
//! tree and reaches the same leaf again through its conditions.  This lets a
//! single tree be built once per role and shared by `Arc` across every
//! ship's control task.
//!
//! The context type `C` is a generic parameter so the crate stays independent
//! of the fleet model; every node of one tree sees the same `&mut C`.

pub mod composite;
pub mod decorator;
pub mod node;
pub mod status;

#[cfg(test)]
mod tests;

pub use composite::{Selector, Sequence, selector, sequence};
pub use decorator::{AlwaysFail, AlwaysSucceed, Invert, always_fail, always_succeed, invert};
pub use node::{Behavior, Node};
pub use status::Status;
