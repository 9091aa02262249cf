//! Lariat - a random-access list built from a doubly linked chain of
//! fixed-capacity array blocks.
//!
//! Mid-sequence insertion splits overfull blocks; removal drops emptied ones;
//! an explicit [`compact`](Lariat::compact) pass repacks the chain to the
//! minimum block count.
//!
//! # Quick Start
//!
//! ```
//! use lariat::Lariat;
//!
//! // Up to 4 elements per node
//! let mut list: Lariat<i32, 4> = Lariat::new();
//!
//! for v in 1..=5 {
//!     list.push_back(v).unwrap();
//! }
//! assert_eq!(list.len(), 5);
//! assert_eq!(*list.at(2).unwrap(), 3);
//!
//! assert_eq!(list.remove(2).unwrap(), 3);
//! list.compact();
//! assert_eq!(list, [1, 2, 4, 5]);
//! ```

pub mod error;
pub mod lariat;

pub use error::{Error, Result};
pub use lariat::Lariat;
