use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::area::TherapyArea;

/// A therapy area together with the affinity score computed for it.
/// Serialized flat, so consumers see the area fields next to `score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredArea {
    #[serde(flatten)]
    pub area: TherapyArea,
    pub score: i32,
}

impl ScoredArea {
    pub fn id(&self) -> &str {
        &self.area.id
    }

    pub fn name(&self) -> &str {
        &self.area.name
    }
}
