//! Low-code application entities: namespaces, modules and pages.

pub mod block;
mod module;
mod namespace;
mod page;

pub use module::{Module, ModuleField};
pub use namespace::Namespace;
pub use page::{BlockGuard, Page, Walk};
