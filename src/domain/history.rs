//! History entries: a stored (input, result) pair.

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::cbc::CbcInput;

/// Maximum number of entries kept in the rolling history.
pub const HISTORY_LIMIT: usize = 10;

/// One persisted analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Opaque unique identifier
    pub id: String,

    /// When the analysis was run
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Submitted panel
    pub input: CbcInput,

    /// Engine output for `input`
    pub result: AnalysisResult,
}

impl HistoryEntry {
    /// Create a new entry stamped with the current time.
    #[must_use]
    pub fn new(input: CbcInput, result: AnalysisResult) -> Self {
        Self {
            id: uuid_v4(),
            created_at: chrono::Utc::now(),
            input,
            result,
        }
    }
}

/// Generate a random UUID v4 string using a CSPRNG.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let mut bytes: [u8; 16] = rng.gen();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
