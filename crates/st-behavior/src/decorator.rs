//! Single-child decorators.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Behavior, Node, Status};

/// Swaps `Success` and `Failure`.  `Running` passes through.
pub struct Invert<C> {
    child: Node<C>,
}

impl<C> Invert<C> {
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<C: Send> Behavior<C> for Invert<C> {
    async fn evaluate(&self, ctx: &mut C) -> Status {
        self.child.evaluate(ctx).await.invert()
    }
}

/// Evaluates the child for its effects, then reports `Success`.
pub struct AlwaysSucceed<C> {
    child: Node<C>,
}

impl<C> AlwaysSucceed<C> {
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<C: Send> Behavior<C> for AlwaysSucceed<C> {
    async fn evaluate(&self, ctx: &mut C) -> Status {
        self.child.evaluate(ctx).await;
        Status::Success
    }
}

/// Evaluates the child for its effects, then reports `Failure`.
pub struct AlwaysFail<C> {
    child: Node<C>,
}

impl<C> AlwaysFail<C> {
    pub fn new(child: Node<C>) -> Self {
        Self { child }
    }
}

#[async_trait]
impl<C: Send> Behavior<C> for AlwaysFail<C> {
    async fn evaluate(&self, ctx: &mut C) -> Status {
        self.child.evaluate(ctx).await;
        Status::Failure
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn invert<C: Send + 'static>(child: Node<C>) -> Node<C> {
    Arc::new(Invert::new(child))
}

pub fn always_succeed<C: Send + 'static>(child: Node<C>) -> Node<C> {
    Arc::new(AlwaysSucceed::new(child))
}

pub fn always_fail<C: Send + 'static>(child: Node<C>) -> Node<C> {
    Arc::new(AlwaysFail::new(child))
}
