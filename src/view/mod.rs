//! List view state synchronization.
//!
//! A list screen's filter, sort and page live in the query parameters of its
//! [`Location`]. [`ListViewSynchronizer`] turns those parameters into fetch
//! requests and a deterministic visible page, and guards against responses
//! that arrive after the parameters moved on.

pub mod freshness;
pub mod location;
pub mod pagination;
pub mod query;
pub mod sorting;
pub mod sync;

pub use freshness::{RequestTicket, RequestTracker};
pub use location::{History, Location};
pub use pagination::{PageInfo, PageSlice, paginate};
pub use query::{ParamUpdate, ViewQuery};
pub use sorting::SortOrder;
pub use sync::{FetchOutcome, FetchState, ListView, ListViewSynchronizer};
