//! A doubly-linked, positionally indexed sequence.
//!
//! Every node is linked both ways; positional lookups start from whichever
//! end of the sequence is closer.
//!
//! ```
//! use doubly_linked_sequence::{Sequence, SequenceError};
//!
//! let mut seq = Sequence::new(7);
//! seq.append(9);
//! seq.append(3);
//! assert_eq!(seq.to_string(), "None <- 7 <-> 9 <-> 3 -> None");
//!
//! seq.insert(1, 12).unwrap();
//! assert_eq!(seq.to_vec(), [7, 12, 9, 3]);
//! assert_eq!(seq.remove(9), Err(SequenceError::OutOfRange { index: 9, len: 4 }));
//! ```

mod error;
mod iter;
mod node;
mod sequence;

pub use error::{InvariantViolation, SequenceError};
pub use iter::{IntoIter, Iter, IterMut};
pub use node::NodeRef;
pub use sequence::{Direction, Sequence, Walk};
