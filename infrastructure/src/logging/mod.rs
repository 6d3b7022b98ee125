//! Logging infrastructure — structured vote-report logging.
//!
//! Provides [`JsonlVoteLog`], a JSONL file writer that implements the
//! [`AuthorityNotifier`](refbox_application::AuthorityNotifier) port so it can
//! sit next to the field of play in a
//! [`CompositeAuthority`](refbox_application::CompositeAuthority).

mod vote_log;

pub use vote_log::JsonlVoteLog;
