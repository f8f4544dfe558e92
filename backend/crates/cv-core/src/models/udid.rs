//! Externally-addressable unique identifier assigned to each local user.
//!
//! The UDID is generated once at registration and is the only key used to
//! address the user's CareVoice account, so it must never be regenerated.
//! Format: `udid_<unix millis>_<9 lowercase base36 chars>`.

use crate::{CoreError, Result as CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use error_location::ErrorLocation;
use rand::Rng;
use serde::{Deserialize, Serialize};

const PREFIX: &str = "udid_";
const SUFFIX_LENGTH: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Udid(String);

impl Udid {
    /// Synthesize a fresh UDID from the current time plus randomness.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LENGTH)
            .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
            .collect();

        Self(format!(
            "{}{}_{}",
            PREFIX,
            Utc::now().timestamp_millis(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl FromStr for Udid {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        let well_formed = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.split_once('_'))
            .is_some_and(|(millis, suffix)| {
                !millis.is_empty()
                    && millis.bytes().all(|b| b.is_ascii_digit())
                    && suffix.len() == SUFFIX_LENGTH
                    && suffix.bytes().all(|b| BASE36.contains(&b))
            });

        if !well_formed {
            return Err(CoreError::InvalidUdid {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Udid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Udid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
