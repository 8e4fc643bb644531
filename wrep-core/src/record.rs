use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One flat output row per item per trial, in the column layout the
/// analysis pipeline expects. The serialized names are the schema; renaming
/// a field here breaks every downstream reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Block")]
    pub block: usize,
    #[serde(rename = "Trial")]
    pub trial: usize,
    /// 1-based position of the item in the trial's layout.
    #[serde(rename = "LocationNumber")]
    pub location_number: usize,
    /// 1-based position in the click sequence; 0 means never resolved.
    #[serde(rename = "ClickNumber")]
    pub click_number: u16,
    /// Unix seconds, sampled once per trial.
    #[serde(rename = "Timestamp")]
    pub timestamp: u64,
    #[serde(rename = "SetSize")]
    pub set_size: usize,
    #[serde(rename = "LocationX")]
    pub location_x: f32,
    #[serde(rename = "LocationY")]
    pub location_y: f32,
    #[serde(rename = "ColorIndex")]
    pub color_index: u16,
    #[serde(rename = "TrueColor")]
    pub true_color: Rgb,
    #[serde(rename = "RespColor")]
    pub resp_color: Option<Rgb>,
    /// Signed circular error in degrees; `None` when the selected color
    /// matched no wheel row.
    #[serde(rename = "Error")]
    pub error: Option<i16>,
    /// Seconds from response onset to the resolving click.
    #[serde(rename = "RT")]
    pub rt: Option<f64>,
}

/// Where finished rows go. One implementation writes files, another keeps
/// rows in memory for tests; the session does not care which.
///
/// The method is not called `push` or `append`: those are inherent `Vec`
/// methods, and on the `Vec` sink below they would shadow the trait.
pub trait RecordSink {
    fn push_record(&mut self, record: &TrialRecord) -> std::io::Result<()>;
}

/// In-memory sink, the one tests and dry runs use.
impl RecordSink for Vec<TrialRecord> {
    fn push_record(&mut self, record: &TrialRecord) -> std::io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}
