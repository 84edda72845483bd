//! Entity trait: something tracked by identity rather than by value.
//!
//! A posted transaction is the only entity on the desk; two postings with
//! identical inputs are still two distinct transactions.

pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
