use crate::entities::StreamCandidate;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use std::{fmt, marker::PhantomData};

/// Values of a JSON object in document order, keys are dropped
#[derive(Debug)]
pub struct OrderedValues<T>(pub Vec<T>);

impl<'de, T> Deserialize<'de> for OrderedValues<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValuesVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for ValuesVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = OrderedValues<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((IgnoredAny, value)) = map.next_entry::<IgnoredAny, T>()? {
                    values.push(value);
                }
                Ok(OrderedValues(values))
            }
        }

        deserializer.deserialize_map(ValuesVisitor(PhantomData))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StreamEntry {
    Candidate(StreamCandidate),
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StreamGroup {
    List(Vec<StreamEntry>),
    Nested(OrderedValues<StreamEntry>),
    Unknown(IgnoredAny),
}

/// Shapes the provider uses for the `videos` field
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StreamsKind {
    List(Vec<StreamEntry>),
    Grouped(OrderedValues<StreamGroup>),
    Unknown(IgnoredAny),
}

impl StreamsKind {
    /// Flattens the provider structure into one ordered list, keeping only candidates with a non-empty URL
    pub fn flatten(self) -> Vec<StreamCandidate> {
        let entries: Vec<StreamEntry> = match self {
            Self::List(entries) => entries,
            Self::Grouped(OrderedValues(groups)) => groups
                .into_iter()
                .flat_map(|group| match group {
                    StreamGroup::List(entries) | StreamGroup::Nested(OrderedValues(entries)) => entries,
                    StreamGroup::Unknown(_) => vec![],
                })
                .collect(),
            Self::Unknown(_) => vec![],
        };

        entries
            .into_iter()
            .filter_map(|entry| match entry {
                StreamEntry::Candidate(candidate) if candidate.has_url() => Some(candidate),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct VideoDetails {
    pub videos: Option<StreamsKind>,
}

impl VideoDetails {
    pub fn into_streams(self) -> Vec<StreamCandidate> {
        self.videos.map(StreamsKind::flatten).unwrap_or_default()
    }
}
