//! Sequence and Selector.
//!
//! | Composite  | Evaluates children until     | Empty list |
//! |------------|------------------------------|------------|
//! | `Sequence` | a child returns non-Success  | `Success`  |
//! | `Selector` | a child returns non-Failure  | `Failure`  |
//!
//! The short-circuiting child's status is returned as-is, so `Running`
//! propagates out of both.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Behavior, Node, Status};

/// Runs children left to right while they succeed.
pub struct Sequence<C> {
    children: Vec<Node<C>>,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl<C: Send> Behavior<C> for Sequence<C> {
    async fn evaluate(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.evaluate(ctx).await {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// Runs children left to right until one does not fail.
pub struct Selector<C> {
    children: Vec<Node<C>>,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Node<C>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[async_trait]
impl<C: Send> Behavior<C> for Selector<C> {
    async fn evaluate(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.evaluate(ctx).await {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn sequence<C: Send + 'static>(children: Vec<Node<C>>) -> Node<C> {
    Arc::new(Sequence::new(children))
}

pub fn selector<C: Send + 'static>(children: Vec<Node<C>>) -> Node<C> {
    Arc::new(Selector::new(children))
}
