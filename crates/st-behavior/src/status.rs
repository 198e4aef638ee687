//! Three-valued evaluation result.

use std::fmt;

/// Outcome of evaluating a node once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
    /// The node's work is in progress; re-evaluate on a later pass.
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        self == Status::Failure
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// Swap `Success` and `Failure`; `Running` is unchanged.
    pub fn invert(self) -> Status {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }

    /// `Success` if `cond`, else `Failure`.
    pub fn from_bool(cond: bool) -> Status {
        if cond { Status::Success } else { Status::Failure }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
