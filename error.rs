use thiserror::Error;

/// Failure of a single sequence operation. The sequence is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot remove from an empty sequence")]
    Empty,
}

/// A structural defect found by [`Sequence::check_invariants`].
///
/// [`Sequence::check_invariants`]: crate::Sequence::check_invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("head and tail disagree on whether the sequence is empty (length {len})")]
    DanglingEnds { len: usize },
    #[error("a single-node sequence must have head == tail and no links")]
    SingletonLinks,
    #[error("head node has a previous link")]
    HeadHasPrev,
    #[error("tail node has a next link")]
    TailHasNext,
    #[error("node {index} is not linked back to its predecessor")]
    BrokenBackLink { index: usize },
    #[error("length is {len} but the forward chain has {forward} nodes and the backward chain {backward}")]
    LengthMismatch {
        len: usize,
        forward: usize,
        backward: usize,
    },
    #[error("forward and backward chains disagree at node {index}")]
    ChainsDisagree { index: usize },
}
