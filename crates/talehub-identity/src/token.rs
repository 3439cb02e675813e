//! Access token minting.
//!
//! The token set as a cookie at login is a 16-character random string
//! that is never stored or checked server-side. The route guard tests
//! only for the cookie's *presence*, exactly like the client-side guard
//! this replaces. It is not an authorization control and nothing in this
//! repository should be read as implying otherwise.

use talehub_core::rng::TokenRng;

/// Length of a minted access token.
pub const ACCESS_TOKEN_LEN: usize = 16;

/// Cookie lifetime in days.
pub const ACCESS_TOKEN_TTL_DAYS: u32 = 7;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Mints a fresh access token.
#[must_use]
pub fn mint_access_token(rng: &mut dyn TokenRng) -> String {
    (0..ACCESS_TOKEN_LEN)
        .map(|_| char::from(CHARSET[rng.next_index(CHARSET.len())]))
        .collect()
}
