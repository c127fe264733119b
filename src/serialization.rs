use crate::Dict;
use ::serde::{
    de::{Deserialize, Deserializer, MapAccess, Visitor},
    ser::{Serialize, Serializer},
};
use std::{fmt, marker::PhantomData};

impl<V: Serialize, const B: usize> Serialize for Dict<V, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

impl<'de, V: Clone + Deserialize<'de>, const B: usize> Deserialize<'de> for Dict<V, B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DictVisitor(PhantomData))
    }
}

struct DictVisitor<V, const B: usize>(PhantomData<V>);

impl<'de, V: Clone + Deserialize<'de>, const B: usize> Visitor<'de> for DictVisitor<V, B> {
    type Value = Dict<V, B>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut dict = Dict::default();

        while let Some((key, value)) = map.next_entry::<String, V>()? {
            dict = dict.set(key, value);
        }

        Ok(dict)
    }
}
