//! Reference resolution for Quarry.
//!
//! Callers often hold a reference to an entity in whatever shape was at hand:
//! an id, a handle, a partial object, the entity itself, or a future that will
//! produce one of those. [`Resolver`] turns an ordered list of such
//! [`Candidate`]s into one entity, first usable candidate wins.
//!
//! The helpers ([`ComposeHelper`], [`MessagingHelper`], [`SystemHelper`])
//! wire resolvers to the remote API and add a context fallback.

mod candidate;
mod compose;
mod error;
mod messaging;
mod resolver;
mod system;

pub use candidate::Candidate;
pub use compose::{ComposeHelper, ModuleLookup, NamespaceLookup, PageLookup};
pub use error::{ResolveError, ResolveResult};
pub use messaging::{ChannelLookup, MessagingHelper};
pub use resolver::{Lookup, Resolver};
pub use system::{SystemHelper, UserLookup};
