use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ScanResult;

/// A scan result persisted to the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredScan {
    pub id: Uuid,
    pub user_id: String,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub result: ScanResult,
}
