use crate::list::LinkField;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Iterator over the members of a `ListHeader`, yielding owners head to tail.
///
/// Iterating from the back walks the `prev` links from the tail.
pub struct Iter<'a, T: 'a, F> {
    pub(crate) front: Option<NonNull<T>>,
    pub(crate) back: Option<NonNull<T>>,
    pub(crate) link: F,
    pub(crate) marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, F> Iter<'a, T, F>
where
    F: Fn(&T) -> &LinkField<T>,
{
    // Yields `current` and closes the iterator once both ends have met
    fn advance(&mut self, current: NonNull<T>, step: Option<NonNull<T>>, forward: bool) -> &'a T {
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else if forward {
            self.front = step;
        } else {
            self.back = step;
        }
        unsafe { &*current.as_ptr() }
    }
}

impl<'a, T: 'a, F> Iterator for Iter<'a, T, F>
where
    F: Fn(&T) -> &LinkField<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        let next = (self.link)(unsafe { current.as_ref() }).next();
        Some(self.advance(current, next, true))
    }
}

impl<'a, T: 'a, F> DoubleEndedIterator for Iter<'a, T, F>
where
    F: Fn(&T) -> &LinkField<T>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = self.back?;
        let prev = (self.link)(unsafe { current.as_ref() }).prev();
        Some(self.advance(current, prev, false))
    }
}

impl<'a, T: 'a, F> FusedIterator for Iter<'a, T, F> where F: Fn(&T) -> &LinkField<T> {}
