//! Per-user entry and record services over the JSON store

mod entries;
mod error;
mod parser;
mod session;

pub use entries::EntryService;
pub use error::ServiceError;
pub use parser::{ParseOutcome, ParserService};
pub use session::SessionStore;
