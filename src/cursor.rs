//! Random-access cursors over a [`CircularBuffer`].
//!
//! A cursor holds a borrow of the buffer and a physical slot, or `None` for
//! the end position one past the newest element. Because the slot order of a
//! ring does not match its logical order once the elements wrap, ordering and
//! distance between cursors are computed on linearized positions: a slot's
//! offset from `first`, with the end position at `len`.
//!
//! The read-only [`CursorRef`] and mutable [`CursorMut`] are the same generic
//! [`Cursor`] and compare with each other freely. The borrow they hold keeps
//! the buffer's layout fixed for as long as any cursor exists.

use crate::alloc::{AllocStrategy, Heap};
use crate::circular_buffer::CircularBuffer;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Sub, SubAssign};

/// Random-access position in a buffer borrowed through `B`.
#[derive(Clone, Copy)]
pub struct Cursor<B> {
    buf: B,
    pos: Option<usize>,
}

pub type CursorRef<'a, T, A = Heap> = Cursor<&'a CircularBuffer<T, A>>;
pub type CursorMut<'a, T, A = Heap> = Cursor<&'a mut CircularBuffer<T, A>>;

impl<T, A, B> Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    /// Cursor at logical `index`; `index == len` gives the end position.
    pub(crate) fn at(buf: B, index: usize) -> Self {
        assert!(
            index <= buf.len(),
            "cursor index {} out of bounds for length {}",
            index,
            buf.len()
        );
        let pos = buf.slot_of(index);
        Self { buf, pos }
    }

    /// Linearized position: 0 for the oldest element, `len` at the end.
    pub fn index(&self) -> usize {
        match self.pos {
            None => self.buf.len(),
            Some(slot) => self.buf.ring().linearize(self.buf.first_slot(), slot),
        }
    }

    pub fn is_end(&self) -> bool {
        self.pos.is_none()
    }

    /// The element under the cursor, `None` at the end position.
    pub fn get<'s>(&'s self) -> Option<&'s T>
    where
        T: 's,
        A: 's,
    {
        self.buf.get(self.index())
    }

    /// The element `n` positions away from the cursor.
    pub fn peek<'s>(&'s self, n: isize) -> Option<&'s T>
    where
        T: 's,
        A: 's,
    {
        let index = self.index().checked_add_signed(n)?;
        self.buf.get(index)
    }

    /// Distance from `other` to `self` in logical positions.
    pub fn offset_from<C>(&self, other: &Cursor<C>) -> isize
    where
        C: Deref<Target = CircularBuffer<T, A>>,
    {
        self.index() as isize - other.index() as isize
    }

    /// Moves to the next element, or to the end after the newest one.
    pub fn move_next(&mut self) {
        let Some(slot) = self.pos else {
            debug_assert!(false, "cursor moved past the end");
            return;
        };
        let next = self.buf.ring().next(slot);
        self.pos = (next != self.buf.last_slot()).then_some(next);
    }

    /// Moves to the previous element; from the end this is the newest one.
    pub fn move_prev(&mut self) {
        if self.buf.is_empty() {
            debug_assert!(false, "cursor moved in an empty buffer");
            return;
        }
        let slot = self.pos.unwrap_or(self.buf.last_slot());
        self.pos = Some(self.buf.ring().prev(slot));
    }

    /// Moves `n` positions towards the end, or `-n` towards the front.
    pub fn advance(&mut self, n: isize) {
        match n.cmp(&0) {
            Ordering::Greater => self.forward(n.unsigned_abs()),
            Ordering::Less => self.backward(n.unsigned_abs()),
            Ordering::Equal => {}
        }
    }

    fn forward(&mut self, n: usize) {
        debug_assert!(
            self.index() + n <= self.buf.len(),
            "cursor moved past the end"
        );
        let Some(slot) = self.pos else {
            return;
        };
        let target = self.buf.ring().add(slot, n);
        self.pos = (target != self.buf.last_slot()).then_some(target);
    }

    fn backward(&mut self, n: usize) {
        debug_assert!(n <= self.index(), "cursor moved before the front");
        if self.buf.is_empty() {
            return;
        }
        let slot = self.pos.unwrap_or(self.buf.last_slot());
        self.pos = Some(self.buf.ring().sub(slot, n));
    }
}

impl<'a, T, A: AllocStrategy<T>> CursorRef<'a, T, A> {
    /// The element under the cursor, borrowed for the whole buffer borrow.
    pub fn item(&self) -> Option<&'a T> {
        let buf: &'a CircularBuffer<T, A> = self.buf;
        buf.get(self.index())
    }
}

impl<'a, T, A: AllocStrategy<T>> CursorMut<'a, T, A> {
    pub fn get_mut(&mut self) -> Option<&mut T> {
        let index = self.index();
        self.buf.get_mut(index)
    }

    pub fn peek_mut(&mut self, n: isize) -> Option<&mut T> {
        let index = self.index().checked_add_signed(n)?;
        self.buf.get_mut(index)
    }

    /// Read-only view of this cursor, reborrowing the buffer.
    pub fn as_cursor(&self) -> CursorRef<'_, T, A> {
        Cursor {
            buf: &*self.buf,
            pos: self.pos,
        }
    }

    /// Converts into a read-only cursor at the same position.
    pub fn into_ref(self) -> CursorRef<'a, T, A> {
        Cursor {
            buf: self.buf,
            pos: self.pos,
        }
    }
}

impl<'a, T, A: AllocStrategy<T>> From<CursorMut<'a, T, A>> for CursorRef<'a, T, A> {
    fn from(cursor: CursorMut<'a, T, A>) -> Self {
        cursor.into_ref()
    }
}

impl<T, A, B> AddAssign<isize> for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    fn add_assign(&mut self, n: isize) {
        self.advance(n);
    }
}

impl<T, A, B> SubAssign<isize> for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    fn sub_assign(&mut self, n: isize) {
        self.advance(-n);
    }
}

impl<T, A, B> Add<isize> for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self.advance(n);
        self
    }
}

impl<T, A, B> Sub<isize> for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self.advance(-n);
        self
    }
}

impl<T, A, B, C> Sub<&Cursor<C>> for &Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
    C: Deref<Target = CircularBuffer<T, A>>,
{
    type Output = isize;

    fn sub(self, other: &Cursor<C>) -> isize {
        self.offset_from(other)
    }
}

/// Cursors are equal when they sit on the same slot. There is exactly one
/// end position, so end cursors are equal to each other and to nothing else.
impl<B, C> PartialEq<Cursor<C>> for Cursor<B> {
    fn eq(&self, other: &Cursor<C>) -> bool {
        self.pos == other.pos
    }
}

impl<B> Eq for Cursor<B> {}

impl<T, A, B, C> PartialOrd<Cursor<C>> for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
    C: Deref<Target = CircularBuffer<T, A>>,
{
    fn partial_cmp(&self, other: &Cursor<C>) -> Option<Ordering> {
        Some(self.index().cmp(&other.index()))
    }
}

impl<T, A, B> fmt::Debug for Cursor<B>
where
    A: AllocStrategy<T>,
    B: Deref<Target = CircularBuffer<T, A>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .field("slot", &self.pos)
            .finish()
    }
}

impl<T, A: AllocStrategy<T>> CircularBuffer<T, A> {
    /// Cursor at the oldest element; equal to [`cursor_end`] when empty.
    ///
    /// [`cursor_end`]: CircularBuffer::cursor_end
    pub fn cursor_front(&self) -> CursorRef<'_, T, A> {
        Cursor::at(self, 0)
    }

    /// Cursor one past the newest element.
    pub fn cursor_end(&self) -> CursorRef<'_, T, A> {
        Cursor { buf: self, pos: None }
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn cursor_at(&self, index: usize) -> CursorRef<'_, T, A> {
        Cursor::at(self, index)
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        Cursor::at(self, 0)
    }

    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, A> {
        Cursor { buf: self, pos: None }
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn cursor_at_mut(&mut self, index: usize) -> CursorMut<'_, T, A> {
        Cursor::at(self, index)
    }
}
