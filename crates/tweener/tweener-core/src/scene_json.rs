use std::fmt;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::data::{Channel, Keyframe};
use crate::error::Result;
use crate::scene::Scene;
use crate::value::Values;

/// Top-level channel entries in document order. Repeated keys are kept so
/// that [`Scene::new`] can reject them.
struct ChannelEntries<V>(Vec<(String, Vec<Keyframe<V>>)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for ChannelEntries<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = ChannelEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping channel ids to keyframe lists")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(ChannelEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Public API: parse an authored scene from JSON.
///
/// Shape:
/// ```json
/// {
///   "blinky": [ { "offset": 0.0, "values": { "x": -0.125, "y": 0.25 } }, ... ],
///   "pinky":  [ ... ]
/// }
/// ```
///
/// Notes:
/// - Channel order follows the document.
/// - Keyframes need not be sorted; equal offsets keep the later entry.
/// - A channel id that appears twice is rejected as a duplicate.
/// - `V` is usually [`ValueMap`](crate::value::ValueMap); any record that
///   derives `Deserialize` also works, in which case missing fields are parse
///   errors rather than shape errors.
pub fn parse_scene_json<V>(s: &str) -> Result<Scene<V>>
where
    V: Values + DeserializeOwned,
{
    let ChannelEntries(entries) = serde_json::from_str::<ChannelEntries<V>>(s)?;
    let channels = entries
        .into_iter()
        .map(|(id, keyframes)| Channel::new(id, keyframes))
        .collect::<Result<Vec<_>>>()?;
    Scene::new(channels)
}
