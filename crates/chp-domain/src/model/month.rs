//! Month slots and the fixed 12-entry table keyed by them

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the 12 fixed inspection columns on the form.
///
/// The slot is a label, not a calendar fact: an inspection stored under
/// `Feb` may carry a date in any month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MonthSlot {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthSlot {
    /// All slots in form column order
    pub const ALL: [MonthSlot; 12] = [
        MonthSlot::Jan,
        MonthSlot::Feb,
        MonthSlot::Mar,
        MonthSlot::Apr,
        MonthSlot::May,
        MonthSlot::Jun,
        MonthSlot::Jul,
        MonthSlot::Aug,
        MonthSlot::Sep,
        MonthSlot::Oct,
        MonthSlot::Nov,
        MonthSlot::Dec,
    ];

    /// 0-based position in column order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Three-letter label printed on the form ("JAN")
    pub fn label(self) -> &'static str {
        match self {
            MonthSlot::Jan => "JAN",
            MonthSlot::Feb => "FEB",
            MonthSlot::Mar => "MAR",
            MonthSlot::Apr => "APR",
            MonthSlot::May => "MAY",
            MonthSlot::Jun => "JUN",
            MonthSlot::Jul => "JUL",
            MonthSlot::Aug => "AUG",
            MonthSlot::Sep => "SEP",
            MonthSlot::Oct => "OCT",
            MonthSlot::Nov => "NOV",
            MonthSlot::Dec => "DEC",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            MonthSlot::Jan => "January",
            MonthSlot::Feb => "February",
            MonthSlot::Mar => "March",
            MonthSlot::Apr => "April",
            MonthSlot::May => "May",
            MonthSlot::Jun => "June",
            MonthSlot::Jul => "July",
            MonthSlot::Aug => "August",
            MonthSlot::Sep => "September",
            MonthSlot::Oct => "October",
            MonthSlot::Nov => "November",
            MonthSlot::Dec => "December",
        }
    }

    /// Next slot in column order, `None` after DEC
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Next slot in column order, wrapping DEC back to JAN
    pub fn next_wrapping(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for MonthSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MonthSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|slot| {
                slot.label().eq_ignore_ascii_case(wanted)
                    || slot.full_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown month slot: {}", s))
    }
}

/// A value for every month slot, always all 12.
///
/// Serialized as a map keyed by slot label in column order; deserializing a
/// map that lacks any slot is an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthTable<T>([T; 12]);

impl<T> MonthTable<T> {
    pub fn get(&self, slot: MonthSlot) -> &T {
        &self.0[slot.index()]
    }

    pub fn get_mut(&mut self, slot: MonthSlot) -> &mut T {
        &mut self.0[slot.index()]
    }

    /// Entries in column order
    pub fn iter(&self) -> impl Iterator<Item = (MonthSlot, &T)> {
        MonthSlot::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (MonthSlot, &mut T)> {
        MonthSlot::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> Index<MonthSlot> for MonthTable<T> {
    type Output = T;

    fn index(&self, slot: MonthSlot) -> &T {
        self.get(slot)
    }
}

impl<T> IndexMut<MonthSlot> for MonthTable<T> {
    fn index_mut(&mut self, slot: MonthSlot) -> &mut T {
        self.get_mut(slot)
    }
}

impl<T: Serialize> Serialize for MonthTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MonthSlot::ALL.len()))?;
        for (slot, value) in self.iter() {
            map.serialize_entry(&slot, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for MonthTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = BTreeMap::<MonthSlot, T>::deserialize(deserializer)?;

        let missing: Vec<&str> = MonthSlot::ALL
            .iter()
            .filter(|slot| !entries.contains_key(slot))
            .map(|slot| slot.label())
            .collect();
        if !missing.is_empty() {
            return Err(D::Error::custom(format!(
                "month table is missing slots: {}",
                missing.join(", ")
            )));
        }

        let values: Vec<T> = MonthSlot::ALL
            .iter()
            .filter_map(|slot| entries.remove(slot))
            .collect();
        let values: [T; 12] = values
            .try_into()
            .map_err(|_| D::Error::custom("month table must have exactly 12 slots"))?;
        Ok(Self(values))
    }
}
