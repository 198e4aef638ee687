//! The `Behavior` trait — the one operation every tree node implements.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Status;

/// A node of a behavior tree over context `C`.
///
/// # Thread safety
///
/// Every ship's control task evaluates the same tree instance concurrently,
/// so implementations must be `Send + Sync` and keep no per-evaluation
/// fields.  Anything a node needs to remember between passes belongs in the
/// context.
#[async_trait]
pub trait Behavior<C>: Send + Sync {
    async fn evaluate(&self, ctx: &mut C) -> Status;
}

/// Shared handle to a tree node.
pub type Node<C> = Arc<dyn Behavior<C>>;
