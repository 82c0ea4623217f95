//! A fixed-capacity circular buffer.
//!
//! [`CircularBuffer`] stores up to `capacity` elements in one contiguous
//! block and supports O(1) push and pop at both ends. A push into a full
//! buffer either overwrites the element at the opposite end or doubles the
//! storage, as chosen by its [`FullPolicy`]. Storage comes from an
//! [`AllocStrategy`]; [`Heap`] is the default and [`Bounded`] caps the
//! number of slots.
//!
//! Positions are logical indices (0 is the oldest element). [`CursorRef`]
//! and [`CursorMut`] walk the buffer across the wrap point and support
//! random-access arithmetic.
//!
//! ```
//! use circbuf::CircularBuffer;
//!
//! let mut buffer = CircularBuffer::with_capacity(3).unwrap();
//! buffer.extend([1, 2, 3, 4]);
//! assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! assert_eq!(buffer.front(), Some(&2));
//! ```

pub mod alloc;
mod circular_buffer;
pub mod config;
mod cursor;
mod edit;
pub mod error;
mod iter;
mod policy;
mod ring;

#[cfg(test)]
mod test_util;

pub use alloc::{AllocStrategy, Block, Bounded, Heap};
pub use circular_buffer::CircularBuffer;
pub use config::{load_config, BufferConfig};
pub use cursor::{Cursor, CursorMut, CursorRef};
pub use error::Error;
pub use iter::{IntoIter, Iter, IterMut};
pub use policy::FullPolicy;
