use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// Deserialize a numeric field, reading anything that isn't a usable number
/// (null, empty or non-numeric strings, NaN, nested junk) as 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

/// Map NaN and infinities to 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(finite_or_zero(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        let parsed = v.trim().parse::<f64>().unwrap_or(0.0);
        Ok(finite_or_zero(parsed))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientNumber)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<f64, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(0.0)
    }

    fn visit_map<A>(self, mut map: A) -> Result<f64, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::number")]
        value: f64,
    }

    fn probe(json: &str) -> f64 {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn test_accepts_numbers() {
        assert_eq!(probe(r#"{"value": 12.5}"#), 12.5);
        assert_eq!(probe(r#"{"value": -3}"#), -3.0);
        assert_eq!(probe(r#"{"value": 7}"#), 7.0);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        assert_eq!(probe(r#"{"value": "42"}"#), 42.0);
        assert_eq!(probe(r#"{"value": " 2.5 "}"#), 2.5);
    }

    #[test]
    fn test_junk_reads_as_zero() {
        assert_eq!(probe(r#"{"value": null}"#), 0.0);
        assert_eq!(probe(r#"{"value": ""}"#), 0.0);
        assert_eq!(probe(r#"{"value": "abc"}"#), 0.0);
        assert_eq!(probe(r#"{"value": "NaN"}"#), 0.0);
        assert_eq!(probe(r#"{"value": true}"#), 0.0);
        assert_eq!(probe(r#"{"value": [1, 2]}"#), 0.0);
        assert_eq!(probe(r#"{"value": {"a": 1}}"#), 0.0);
        assert_eq!(probe(r#"{}"#), 0.0);
    }

    #[test]
    fn test_toml_values() {
        let p: Probe = toml::from_str("value = 3").unwrap();
        assert_eq!(p.value, 3.0);
        let p: Probe = toml::from_str("value = \"oops\"").unwrap();
        assert_eq!(p.value, 0.0);
        let p: Probe = toml::from_str("value = nan").unwrap();
        assert_eq!(p.value, 0.0);
    }
}
