//! Intrusive doubly linked lists.
//!
//! The `next`/`prev` links of a member live inside the member itself, in a [`LinkField`], and
//! the list proper is a [`ListHeader`] holding the head and tail. Linking never allocates, and
//! the list never owns its members: they are created, pinned and destroyed by the caller.
//!
//! ```
//! use ilist::{LinkField, ListHeader};
//! use std::ptr::NonNull;
//!
//! struct Var {
//!     name: &'static str,
//!     link: LinkField<Var>,
//! }
//!
//! let a = Var { name: "a", link: LinkField::new() };
//! let b = Var { name: "b", link: LinkField::new() };
//! let mut vars = ListHeader::new();
//! unsafe {
//!     b.link.push_back(&mut vars, NonNull::from(&b));
//!     a.link.push_front(&mut vars, NonNull::from(&a));
//! }
//!
//! let names: Vec<_> = unsafe { vars.iter(|v: &Var| &v.link) }.map(|v| v.name).collect();
//! assert_eq!(names, ["a", "b"]);
//!
//! unsafe { a.link.unlink(&mut vars, NonNull::from(&a)) };
//! assert_eq!(vars.begin(), Some(NonNull::from(&b)));
//! ```

#[macro_use]
mod assert;
pub mod list;

pub use list::{Iter, LinkField, ListHeader};
