//! Unit tests for st-behavior.
//!
//! Leaves are fixed-status probes that record their id in the context, so
//! each test can check both the verdict and which children were evaluated.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::{Behavior, Node, Status};

    /// Evaluation log threaded through a tree.
    #[derive(Default)]
    pub struct Trace {
        pub visited: Vec<usize>,
    }

    pub struct Fixed {
        pub id:     usize,
        pub status: Status,
    }

    #[async_trait]
    impl Behavior<Trace> for Fixed {
        async fn evaluate(&self, ctx: &mut Trace) -> Status {
            ctx.visited.push(self.id);
            self.status
        }
    }

    pub fn fixed(id: usize, status: Status) -> Node<Trace> {
        Arc::new(Fixed { id, status })
    }

    pub const ALL: [Status; 3] = [Status::Success, Status::Failure, Status::Running];

    /// Every status list of length `0..=max`.
    pub fn combinations(max: usize) -> Vec<Vec<Status>> {
        let mut out = vec![vec![]];
        let mut frontier = vec![vec![]];
        for _ in 0..max {
            let mut next = Vec::new();
            for prefix in &frontier {
                for s in ALL {
                    let mut v: Vec<Status> = prefix.clone();
                    v.push(s);
                    next.push(v);
                }
            }
            out.extend(next.iter().cloned());
            frontier = next;
        }
        out
    }

    pub fn children(statuses: &[Status]) -> Vec<Node<Trace>> {
        statuses.iter().enumerate().map(|(i, &s)| fixed(i, s)).collect()
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod status {
    use crate::Status;

    #[test]
    fn invert_table() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn from_bool_and_display() {
        assert_eq!(Status::from_bool(true), Status::Success);
        assert_eq!(Status::from_bool(false), Status::Failure);
        assert_eq!(Status::Running.to_string(), "running");
        assert!(Status::Running.is_running());
    }
}

// ── Composites ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod composites {
    use super::helpers::{Trace, children, combinations};
    use crate::{Behavior, Status, selector, sequence};

    #[test]
    fn combinations_cover_lengths_zero_to_four() {
        // 1 + 3 + 9 + 27 + 81
        assert_eq!(combinations(4).len(), 121);
    }

    #[tokio::test]
    async fn sequence_semantics() {
        for statuses in combinations(4) {
            let stop = statuses.iter().position(|&s| s != Status::Success);
            let expected = stop.map_or(Status::Success, |i| statuses[i]);
            let visited = stop.map_or(statuses.len(), |i| i + 1);

            let mut trace = Trace::default();
            let got = sequence(children(&statuses)).evaluate(&mut trace).await;
            assert_eq!(got, expected, "sequence over {statuses:?}");
            assert_eq!(trace.visited, (0..visited).collect::<Vec<_>>(), "{statuses:?}");
        }
    }

    #[tokio::test]
    async fn selector_semantics() {
        for statuses in combinations(4) {
            let stop = statuses.iter().position(|&s| s != Status::Failure);
            let expected = stop.map_or(Status::Failure, |i| statuses[i]);
            let visited = stop.map_or(statuses.len(), |i| i + 1);

            let mut trace = Trace::default();
            let got = selector(children(&statuses)).evaluate(&mut trace).await;
            assert_eq!(got, expected, "selector over {statuses:?}");
            assert_eq!(trace.visited, (0..visited).collect::<Vec<_>>(), "{statuses:?}");
        }
    }

    #[tokio::test]
    async fn empty_composites() {
        let mut trace = Trace::default();
        assert_eq!(sequence(vec![]).evaluate(&mut trace).await, Status::Success);
        assert_eq!(selector(vec![]).evaluate(&mut trace).await, Status::Failure);
        assert!(trace.visited.is_empty());
    }

    #[tokio::test]
    async fn nested_running_propagates() {
        use super::helpers::fixed;

        let tree = selector(vec![
            fixed(0, Status::Failure),
            sequence(vec![fixed(1, Status::Success), fixed(2, Status::Running), fixed(3, Status::Success)]),
            fixed(4, Status::Success),
        ]);
        let mut trace = Trace::default();
        assert_eq!(tree.evaluate(&mut trace).await, Status::Running);
        assert_eq!(trace.visited, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn shared_tree_across_tasks() {
        use super::helpers::fixed;

        let tree = sequence(vec![fixed(0, Status::Success), fixed(1, Status::Running)]);
        let mut handles = Vec::new();
        for _ in 0..4 {
            let tree = tree.clone();
            handles.push(tokio::spawn(async move {
                let mut trace = Trace::default();
                let s = tree.evaluate(&mut trace).await;
                (s, trace.visited)
            }));
        }
        for h in handles {
            let (s, visited) = h.await.unwrap();
            assert_eq!(s, Status::Running);
            assert_eq!(visited, vec![0, 1]);
        }
    }
}

// ── Decorators ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decorators {
    use super::helpers::{ALL, Trace, fixed};
    use crate::{Behavior, Status, always_fail, always_succeed, invert};

    #[tokio::test]
    async fn invert_law() {
        for s in ALL {
            let mut trace = Trace::default();
            assert_eq!(invert(fixed(7, s)).evaluate(&mut trace).await, s.invert());
            assert_eq!(trace.visited, vec![7]);
        }
    }

    #[tokio::test]
    async fn double_invert_is_identity() {
        for s in ALL {
            let mut trace = Trace::default();
            assert_eq!(invert(invert(fixed(0, s))).evaluate(&mut trace).await, s);
        }
    }

    #[tokio::test]
    async fn always_succeed_still_runs_child() {
        for s in ALL {
            let mut trace = Trace::default();
            assert_eq!(always_succeed(fixed(3, s)).evaluate(&mut trace).await, Status::Success);
            assert_eq!(trace.visited, vec![3]);
        }
    }

    #[tokio::test]
    async fn always_fail_still_runs_child() {
        for s in ALL {
            let mut trace = Trace::default();
            assert_eq!(always_fail(fixed(5, s)).evaluate(&mut trace).await, Status::Failure);
            assert_eq!(trace.visited, vec![5]);
        }
    }
}
