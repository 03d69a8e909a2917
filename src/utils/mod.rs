//! Helpers shared by the transport and persistence layers.
//!
//! - [`db_error`] - Classification of database driver errors
//! - [`extract_owner`] - Owner extraction from HTTP headers

pub mod db_error;
pub mod extract_owner;
