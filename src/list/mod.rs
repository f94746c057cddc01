use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

mod iter;
mod link;

pub use iter::Iter;
pub use link::LinkField;

/// The head and tail of an intrusive doubly linked list.
///
/// The members are owner objects of type `T` which each embed a [`LinkField`]; the header only
/// stores references to the two ends. All linking goes through the members' link fields, see
/// [`LinkField::push_back`] and friends. The header never points into itself, so it may be
/// moved freely, but linked members must stay put.
pub struct ListHeader<T> {
    head: Option<NonNull<T>>,
    tail: Option<NonNull<T>>,
}

impl<T> ListHeader<T> {
    /// Create a new, empty list
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    /// If the list is empty or not
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first member, where a forward walk over the `next` links starts
    pub fn begin(&self) -> Option<NonNull<T>> {
        self.head
    }

    /// The end of a forward walk, which is always `None`
    pub fn end(&self) -> Option<NonNull<T>> {
        None
    }

    /// The last member, where a backward walk over the `prev` links starts
    pub fn rbegin(&self) -> Option<NonNull<T>> {
        self.tail
    }

    /// The end of a backward walk, which is always `None`
    pub fn rend(&self) -> Option<NonNull<T>> {
        None
    }

    /// Forgets every member without walking the list.
    ///
    /// The link fields of the former members are left as they were and still point at each
    /// other. Only use this when the members are being destroyed, or when their link fields are
    /// about to be reinitialised; linking or unlinking them afterwards corrupts whichever list
    /// they end up in.
    pub fn reset(&mut self) {
        tracing::trace!(head = ?self.head, tail = ?self.tail, "reset list");
        self.head = None;
        self.tail = None;
    }

    /// Return a double-ended iterator over the members of this list.
    ///
    /// # Arguments
    /// `link`: Projects a member onto the link field of this list
    ///
    /// # Safety
    /// Every member must outlive the iterator, and `link` must return the link field that was
    /// used to link it into this list. The list must not be modified while iterating.
    pub unsafe fn iter<F>(&self, link: F) -> Iter<'_, T, F>
    where
        F: Fn(&T) -> &LinkField<T>,
    {
        Iter {
            front: self.head,
            back: self.tail,
            link,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ListHeader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListHeader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHeader")
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use crate::list::{LinkField, ListHeader};
    use moveit::{moveit, new};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;
    use std::ptr::{self, NonNull};

    struct Symbol {
        id: u32,
        link: LinkField<Symbol>,
    }

    impl Symbol {
        fn new(id: u32) -> Self {
            Self {
                id,
                link: LinkField::new(),
            }
        }
    }

    fn ids(list: &ListHeader<Symbol>) -> Vec<u32> {
        unsafe { list.iter(|s: &Symbol| &s.link) }.map(|s| s.id).collect()
    }

    fn rev_ids(list: &ListHeader<Symbol>) -> Vec<u32> {
        unsafe { list.iter(|s: &Symbol| &s.link) }
            .rev()
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn empty() {
        let list = ListHeader::<Symbol>::new();
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.rbegin(), list.rend());
        assert_eq!(ids(&list), Vec::<u32>::new());
    }

    #[test]
    fn default_is_empty() {
        let list = ListHeader::<Symbol>::default();
        assert!(list.is_empty());
    }

    #[test]
    fn iter() {
        moveit! {
            let a = new::of(Symbol::new(1));
            let b = new::of(Symbol::new(2));
            let c = new::of(Symbol::new(3));
        }
        let mut list = ListHeader::new();
        unsafe {
            b.link.push_back(&mut list, NonNull::from(&*b));
            c.link.push_back(&mut list, NonNull::from(&*c));
            a.link.push_front(&mut list, NonNull::from(&*a));
        }
        itertools::assert_equal(ids(&list), vec![1, 2, 3]);
        itertools::assert_equal(rev_ids(&list), vec![3, 2, 1]);

        let first = unsafe { list.iter(|s: &Symbol| &s.link) }.next().unwrap();
        assert!(ptr::eq(first, &*a));
    }

    #[test]
    fn iter_meets_in_the_middle() {
        moveit! {
            let a = new::of(Symbol::new(1));
            let b = new::of(Symbol::new(2));
            let c = new::of(Symbol::new(3));
        }
        let mut list = ListHeader::new();
        unsafe {
            a.link.push_back(&mut list, NonNull::from(&*a));
            b.link.push_back(&mut list, NonNull::from(&*b));
            c.link.push_back(&mut list, NonNull::from(&*c));
        }
        let mut iter = unsafe { list.iter(|s: &Symbol| &s.link) };
        assert_eq!(iter.next().map(|s| s.id), Some(1));
        assert_eq!(iter.next_back().map(|s| s.id), Some(3));
        assert_eq!(iter.next().map(|s| s.id), Some(2));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test_log::test]
    fn reset() {
        moveit! {
            let a = new::of(Symbol::new(1));
            let b = new::of(Symbol::new(2));
        }
        let mut list = ListHeader::new();
        unsafe {
            a.link.push_back(&mut list, NonNull::from(&*a));
            b.link.push_back(&mut list, NonNull::from(&*b));
        }
        list.reset();
        assert!(list.is_empty());
        assert_eq!(list.begin(), None);
        assert_eq!(list.rbegin(), None);
        // the former members keep pointing at each other
        assert_eq!(a.link.next(), Some(NonNull::from(&*b)));
        assert_eq!(b.link.prev(), Some(NonNull::from(&*a)));
    }

    #[test]
    fn debug() {
        let list = ListHeader::<Symbol>::new();
        assert_eq!(
            format!("{list:?}"),
            "ListHeader { head: None, tail: None }"
        );
    }

    #[test_log::test]
    fn splice_chain() {
        let symbols: Vec<Symbol> = (0..9).map(Symbol::new).collect();
        let mut lists: Vec<ListHeader<Symbol>> = (0..3).map(|_| ListHeader::new()).collect();
        for (i, symbol) in symbols.iter().enumerate() {
            unsafe { symbol.link.push_back(&mut lists[i / 3], NonNull::from(symbol)) };
        }

        let mut total = ListHeader::new();
        for list in lists.iter_mut() {
            let head = list.begin().unwrap();
            unsafe { head.as_ref().link.move_append(list, &mut total, head) };
            assert!(list.is_empty());
        }
        itertools::assert_equal(ids(&total), 0..9);
        itertools::assert_equal(rev_ids(&total), (0..9).rev());
    }

    /// Random pushes and unlinks, checked against a `VecDeque` of ids.
    #[test]
    fn random_sequences() {
        const COUNT: u32 = 32;

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let symbols: Vec<Symbol> = (0..COUNT).map(Symbol::new).collect();
        let mut linked = vec![false; COUNT as usize];
        let mut model = VecDeque::new();
        let mut list = ListHeader::new();

        for _ in 0..4096 {
            let id = rng.gen_range(0..COUNT);
            let symbol = &symbols[id as usize];
            let owner = NonNull::from(symbol);
            if linked[id as usize] {
                unsafe { symbol.link.unlink(&mut list, owner) };
                model.retain(|&other| other != id);
                assert_eq!(symbol.link.next(), None);
                assert_eq!(symbol.link.prev(), None);
            } else if rng.gen_bool(0.5) {
                unsafe { symbol.link.push_back(&mut list, owner) };
                model.push_back(id);
            } else {
                unsafe { symbol.link.push_front(&mut list, owner) };
                model.push_front(id);
            }
            linked[id as usize] = !linked[id as usize];

            let forward = ids(&list);
            let mut backward = rev_ids(&list);
            backward.reverse();
            assert_eq!(forward, backward);
            assert_eq!(forward, model.iter().copied().collect::<Vec<_>>());
            assert_eq!(list.is_empty(), model.is_empty());
        }
    }
}
