mod types;

mod table;

mod handler_context;

mod continuation;

mod decision;

pub(crate) mod handlers;

pub use handler_context::*;
pub use table::*;
pub use types::*;
