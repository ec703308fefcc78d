use std::fmt;

/// Lifecycle of a reader or writer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unopened,
    Open,
    Closed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Unopened => "unopened",
            State::Open => "open",
            State::Closed => "closed",
        })
    }
}
