use serde::{Deserialize, Serialize};

use super::checklist::ChecklistItem;
use super::month::MonthSlot;

/// Sampled-deficiency mode for a month.
///
/// A nonzero rate marks roughly that share of the 40 checklist items as
/// deficient: 3% -> 1 item, 5% -> 2 items, 10% -> 4 items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DeficiencyRate {
    #[default]
    None,
    ThreePercent,
    FivePercent,
    TenPercent,
}

impl DeficiencyRate {
    pub fn percent(self) -> u8 {
        match self {
            DeficiencyRate::None => 0,
            DeficiencyRate::ThreePercent => 3,
            DeficiencyRate::FivePercent => 5,
            DeficiencyRate::TenPercent => 10,
        }
    }

    /// Number of distinct items sampled for this rate
    pub fn sample_size(self) -> usize {
        match self {
            DeficiencyRate::None => 0,
            DeficiencyRate::ThreePercent => 1,
            DeficiencyRate::FivePercent => 2,
            DeficiencyRate::TenPercent => 4,
        }
    }
}

impl TryFrom<u8> for DeficiencyRate {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        match percent {
            0 => Ok(DeficiencyRate::None),
            3 => Ok(DeficiencyRate::ThreePercent),
            5 => Ok(DeficiencyRate::FivePercent),
            10 => Ok(DeficiencyRate::TenPercent),
            other => Err(format!(
                "deficiency rate must be one of 0, 3, 5, 10 (got {})",
                other
            )),
        }
    }
}

impl From<DeficiencyRate> for u8 {
    fn from(rate: DeficiencyRate) -> u8 {
        rate.percent()
    }
}

/// One appendix row: a checklist item found deficient, attributed to the
/// first month it was reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeficiencyRecord {
    pub item_index: usize,
    pub description: &'static str,
    pub slot: MonthSlot,
    pub inspection_date: String,
    pub odometer_reading: String,
}

impl DeficiencyRecord {
    pub fn new(
        item: ChecklistItem,
        slot: MonthSlot,
        inspection_date: &str,
        odometer_reading: &str,
    ) -> Self {
        Self {
            item_index: item.index,
            description: item.description,
            slot,
            inspection_date: inspection_date.to_string(),
            odometer_reading: odometer_reading.to_string(),
        }
    }

    pub fn item_number(&self) -> usize {
        self.item_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_sample_sizes() {
        assert_eq!(DeficiencyRate::None.sample_size(), 0);
        assert_eq!(DeficiencyRate::ThreePercent.sample_size(), 1);
        assert_eq!(DeficiencyRate::FivePercent.sample_size(), 2);
        assert_eq!(DeficiencyRate::TenPercent.sample_size(), 4);
    }

    #[test]
    fn test_rate_serde_as_percent() {
        assert_eq!(serde_json::to_string(&DeficiencyRate::FivePercent).unwrap(), "5");
        let rate: DeficiencyRate = serde_json::from_str("10").unwrap();
        assert_eq!(rate, DeficiencyRate::TenPercent);
        assert!(serde_json::from_str::<DeficiencyRate>("7").is_err());
    }
}
