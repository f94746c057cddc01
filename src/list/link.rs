use crate::list::ListHeader;
use duplicate::duplicate_item;
use std::cell::Cell;
use std::fmt;
use std::mem::size_of;
use std::ptr::NonNull;

/// The per-owner half of an intrusive list: the `next`/`prev` links of one owner object.
///
/// A `LinkField` is embedded as a member of the owner type `T`. Every operation takes the owner
/// the field sits in, derives the byte offset of the field inside the owner from the two
/// addresses, and reapplies that offset to the neighbouring owners to reach their link fields.
/// An owner can therefore join several lists at once by embedding one `LinkField` per list.
///
/// The list never owns, moves or frees the owners.
pub struct LinkField<T> {
    next: Cell<Option<NonNull<T>>>,
    prev: Cell<Option<NonNull<T>>>,
}

impl<T> LinkField<T> {
    /// The value both links are overwritten with when a link field is dropped
    #[cfg(any(debug_assertions, feature = "poison"))]
    const POISON: NonNull<T> = NonNull::dangling();

    /// Create an unlinked link field
    pub const fn new() -> Self {
        Self {
            next: Cell::new(None),
            prev: Cell::new(None),
        }
    }

    /// The owner after this one, `None` if this is the tail or unlinked
    pub fn next(&self) -> Option<NonNull<T>> {
        self.next.get()
    }

    /// The owner before this one, `None` if this is the head or unlinked
    pub fn prev(&self) -> Option<NonNull<T>> {
        self.prev.get()
    }

    /// If this link field has been dropped and poisoned
    #[cfg(any(debug_assertions, feature = "poison"))]
    pub fn is_poisoned(&self) -> bool {
        self.next.get() == Some(Self::POISON) && self.prev.get() == Some(Self::POISON)
    }

    /// Byte offset of this link field within `owner`
    fn offset_in(&self, owner: NonNull<T>) -> usize {
        let offset = (self as *const Self as usize).wrapping_sub(owner.as_ptr() as usize);
        strict_assert!(
            offset
                .checked_add(size_of::<Self>())
                .is_some_and(|end| end <= size_of::<T>()),
            "link field must be embedded in its owner"
        );
        offset
    }

    /// The link field at `offset` bytes into `owner`.
    ///
    /// # Safety
    /// `owner` must be a live owner embedding a link field at `offset`.
    unsafe fn field_at<'a>(owner: NonNull<T>, offset: usize) -> &'a Self {
        &*owner.as_ptr().cast::<u8>().add(offset).cast::<Self>()
    }

    /// Links `owner` at one end of `list`: `push_back` makes it the new tail, `push_front` the
    /// new head.
    ///
    /// # Arguments
    /// `list`: The list to link into
    ///
    /// `owner`: The object this link field is embedded in
    ///
    /// # Safety
    /// `self` must be embedded in `owner`, at the same offset as in every other member of `list`.
    /// `owner` must not be linked already, and every member of `list` must be alive and pinned.
    #[duplicate_item(
        push_back       near    far     first   last;
        [push_back]     [next]  [prev]  [head]  [tail];
        [push_front]    [prev]  [next]  [tail]  [head];
    )]
    pub unsafe fn push_back(&self, list: &mut ListHeader<T>, owner: NonNull<T>) {
        let offset = self.offset_in(owner);
        strict_assert!(
            self.next.get().is_none() && self.prev.get().is_none() && list.head != Some(owner),
            "owner is already linked"
        );
        self.near.set(None);
        if list.first.is_none() {
            list.first = Some(owner);
        }
        self.far.set(list.last);
        if let Some(far) = self.far.get() {
            Self::field_at(far, offset).near.set(Some(owner));
        }
        list.last = Some(owner);
    }

    /// Removes `owner` from `list`, wherever it sits, leaving both links `None`.
    ///
    /// # Arguments
    /// `list`: The list `owner` is a member of
    ///
    /// `owner`: The object this link field is embedded in
    ///
    /// # Safety
    /// `self` must be embedded in `owner` and `owner` must currently be a member of `list`.
    /// Unlinking from any other list corrupts both lists.
    pub unsafe fn unlink(&self, list: &mut ListHeader<T>, owner: NonNull<T>) {
        let offset = self.offset_in(owner);
        let next = self.next.get();
        let prev = self.prev.get();
        match next {
            Some(next) => Self::field_at(next, offset).prev.set(prev),
            None => {
                strict_assert_eq!(list.tail, Some(owner), "owner is not a member of this list");
                list.tail = prev;
            }
        }
        match prev {
            Some(prev) => Self::field_at(prev, offset).next.set(next),
            None => {
                strict_assert_eq!(list.head, Some(owner), "owner is not a member of this list");
                list.head = next;
            }
        }
        self.next.set(None);
        self.prev.set(None);
    }

    /// Moves every member of `old` to the back of `new` in constant time. Only the two splice
    /// points and the two headers are written; the links inside the moved chain are untouched.
    ///
    /// # Arguments
    /// `old`: The list to empty
    ///
    /// `new`: The list to append to
    ///
    /// `owner`: The current head of `old`, which this link field is embedded in
    ///
    /// # Panics
    /// If `owner` is not the head of `old`. Neither list is modified in that case.
    ///
    /// # Safety
    /// `self` must be embedded in `owner`, and the members of both lists must share its offset.
    pub unsafe fn move_append(
        &self,
        old: &mut ListHeader<T>,
        new: &mut ListHeader<T>,
        owner: NonNull<T>,
    ) {
        assert_eq!(
            Some(owner),
            old.head,
            "must be head of list to use move_append"
        );
        let offset = self.offset_in(owner);
        let head = owner;
        let tail = old.tail;
        old.reset();
        match new.tail {
            None => {
                new.head = Some(head);
                new.tail = tail;
            }
            Some(new_tail) => {
                Self::field_at(new_tail, offset).next.set(Some(head));
                self.prev.set(Some(new_tail));
                new.tail = tail;
            }
        }
        tracing::trace!(head = ?head, tail = ?tail, "spliced list onto back");
    }
}

impl<T> Default for LinkField<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(debug_assertions, feature = "poison"))]
impl<T> Drop for LinkField<T> {
    fn drop(&mut self) {
        self.next.set(Some(Self::POISON));
        self.prev.set(Some(Self::POISON));
    }
}

impl<T> fmt::Debug for LinkField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkField")
            .field("next", &self.next.get())
            .field("prev", &self.prev.get())
            .finish()
    }
}
