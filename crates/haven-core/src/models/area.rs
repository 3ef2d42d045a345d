use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A therapy focus area that the assessment can recommend.
///
/// `keywords` are lowercase fragments matched as substrings against answer
/// text and question ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TherapyArea {
    pub id: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
}
