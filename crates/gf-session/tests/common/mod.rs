#![allow(unused_imports)]

pub(crate) mod fake_documents;
pub(crate) mod fake_identity;
pub(crate) mod test_session;

pub use fake_documents::*;
pub use fake_identity::*;
pub use test_session::*;
