use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AsteroidSummary {
    pub name: String,
    pub hazardous: bool,
}

/// Date-keyed lists that keep the key order of the JSON object they were read from.
///
/// Serializes back to a JSON object with keys in the same order. A repeated key replaces the
/// earlier value in place, matching how a JSON object would be read into a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGrouped<T> {
    groups: Vec<(String, Vec<T>)>,
}

/// Date to asteroid summaries, as logged and as returned to callers.
pub type FeedResult = DateGrouped<AsteroidSummary>;

impl<T> DateGrouped<T> {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Linear lookup per key. The feed caps a window at 7 dates, so this stays a handful of
    /// comparisons; switch to an indexed map if callers ever hold thousands of keys.
    pub fn insert(&mut self, date: impl Into<String>, items: Vec<T>) {
        let date = date.into();
        match self.groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, existing)) => *existing = items,
            None => self.groups.push((date, items)),
        }
    }

    pub fn get(&self, date: &str) -> Option<&[T]> {
        self.groups
            .iter()
            .find(|(d, _)| d == date)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups
            .iter()
            .map(|(d, items)| (d.as_str(), items.as_slice()))
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(d, _)| d.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all dates.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    /// Maps every item, keeping date order and list order.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DateGrouped<U> {
        DateGrouped {
            groups: self
                .groups
                .into_iter()
                .map(|(d, items)| (d, items.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }
}

impl<T> Default for DateGrouped<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for DateGrouped<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (date, items) in &self.groups {
            map.serialize_entry(date, items)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DateGrouped<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for GroupsVisitor<T> {
            type Value = DateGrouped<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping dates to arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = DateGrouped {
                    groups: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((date, items)) = access.next_entry::<String, Vec<T>>()? {
                    out.insert(date, items);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(GroupsVisitor(PhantomData))
    }
}
