//! Temporary message ids.
//!
//! An optimistic message carries a locally minted id until the server
//! confirms it and assigns the durable one. The shape is
//! `temp-<unix-millis>-<random>`; the prefix doubles as the pending
//! flag, and uniqueness is only required within one client session.
//!
//! Correlation between a placeholder and its confirmation is always by
//! this id, carried through the send future as a value. Content is
//! never used as a key since bodies can repeat.

use chrono::Utc;
use uuid::Uuid;

/// Prefix marking an id as temporary.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Mint a fresh temporary id.
pub fn mint() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}-{}", TEMP_ID_PREFIX, millis, &suffix[..8])
}

/// Whether an id has the temporary shape.
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}
