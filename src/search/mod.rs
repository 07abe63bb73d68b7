//! Fuzzy customer search, pagination, and selection core
//!
//! Pure over the snapshot: every operation takes the snapshot and session
//! store by reference and never performs I/O of its own.

pub mod format;
pub mod index;
pub mod normalize;
pub mod pager;
pub mod resolver;
pub mod session;
pub mod similarity;

pub use format::{chunk_entries, customer_detail, page_summary, CustomerDetail, PageSummary};
pub use index::{search, CustomerCandidate, MIN_SIMILARITY};
pub use normalize::normalize_name;
pub use pager::{clear_session, current_page, get_page, navigate, start_session, PageDirection};
pub use resolver::{fetch_all_debts, resolve};
pub use session::{MemorySessionStore, SearchSession, SessionStore, UserId};
pub use similarity::similarity_ratio;
