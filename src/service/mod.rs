//! Create/read/update/delete operations over the content model.
//!
//! [`Query`] only reads and accepts any connection; [`Mutation`] wraps each
//! operation in one transaction and returns [`crate::CmsError`].

mod mutation;
mod query;

pub use mutation::*;
pub use query::*;
