//! JSON wire codec for shard maps.
//!
//! The wire form is a JSON array of descriptor objects:
//!
//! ```json
//! [{"index": 0, "lower": "", "upper": "m", "cid": "B8E1"}, ...]
//! ```
//!
//! Decoding accepts the four fields in any order but requires all of them
//! with the stated JSON types; `null` is never accepted. Encoding always
//! emits them as `index`, `lower`, `upper`, `cid`, with descriptors in
//! ascending `index` order, since downstream consumers assume sorted
//! shard maps.

use serde_json::{Map, Value};

use crate::descriptor::ShardDescriptor;
use crate::error::{DecodeError, DescriptorError};
use crate::index::ShardIndex;

/// Decode a shard map from its JSON wire form.
///
/// The decode is atomic: on the first malformed element the whole
/// operation fails and no index is returned. Descriptors sharing an
/// `index` silently overwrite each other (the later entry wins).
///
/// Contiguity and disjointness of the ranges are *not* checked here;
/// see [`ShardIndex::validate`].
pub fn decode(text: &str) -> Result<ShardIndex, DecodeError> {
    let root: Value = serde_json::from_str(text).map_err(DecodeError::Parse)?;
    let Value::Array(elements) = root else {
        return Err(DecodeError::NotAnArray);
    };

    let index: ShardIndex = elements
        .iter()
        .enumerate()
        .map(|(position, element)| {
            decode_descriptor(element)
                .map_err(|source| DecodeError::Descriptor { position, source })
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect();

    tracing::debug!(shards = index.len(), "decoded shard map");
    Ok(index)
}

/// Encode a shard map to its JSON wire form.
///
/// Descriptors are emitted in ascending `index` order with the fields
/// `index`, `lower`, `upper`, `cid`, in that order.
pub fn encode(index: &ShardIndex) -> String {
    let shards: Vec<&ShardDescriptor> = index.iter().collect();
    serde_json::to_string(&shards).expect("a shard map serializes infallibly")
}

fn decode_descriptor(value: &Value) -> Result<ShardDescriptor, DescriptorError> {
    let object = value.as_object().ok_or(DescriptorError::NotAnObject)?;

    let index = require_u32(object, "index")?;
    let lower = require_str(object, "lower")?;
    let upper = require_str(object, "upper")?;
    let cid = require_str(object, "cid")?;

    Ok(ShardDescriptor::new(index, lower, upper, cid))
}

fn require<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, DescriptorError> {
    object.get(field).ok_or(DescriptorError::MissingField(field))
}

fn require_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DescriptorError> {
    require(object, field)?.as_str().ok_or(DescriptorError::WrongType {
        field,
        expected: "a string",
    })
}

fn require_u32(object: &Map<String, Value>, field: &'static str) -> Result<u32, DescriptorError> {
    require(object, field)?
        .as_u64()
        .and_then(|wide| u32::try_from(wide).ok())
        .ok_or(DescriptorError::WrongType {
            field,
            expected: "a non-negative integer",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SHARDS: &str = concat!(
        r#"[{"index":0,"lower":"","upper":"m","cid":"A"},"#,
        r#"{"index":1,"lower":"m","upper":"","cid":"B"}]"#
    );

    #[test]
    fn decodes_a_two_shard_map() {
        let index = decode(TWO_SHARDS).unwrap();
        assert_eq!(index.len(), 2);

        let first = index.get(0).unwrap();
        assert_eq!(first.lower, "");
        assert_eq!(first.upper, "m");
        assert_eq!(first.target.as_str(), "A");

        let second = index.get(1).unwrap();
        assert_eq!(second.lower, "m");
        assert_eq!(second.upper, "");
        assert_eq!(second.target.as_str(), "B");
    }

    #[test]
    fn decodes_an_empty_array() {
        let index = decode("[]").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn accepts_fields_in_any_order() {
        let text = r#"[{"cid":"A","upper":"m","index":0,"lower":""}]"#;
        let index = decode(text).unwrap();
        assert_eq!(index.get(0).unwrap().target.as_str(), "A");
    }

    #[test]
    fn rejects_invalid_json_text() {
        assert!(matches!(decode("not json"), Err(DecodeError::Parse(_))));
        assert!(matches!(decode(""), Err(DecodeError::Parse(_))));
    }

    #[test]
    fn rejects_a_non_array_top_level() {
        assert!(matches!(decode("{}"), Err(DecodeError::NotAnArray)));
        assert!(matches!(decode("42"), Err(DecodeError::NotAnArray)));
    }

    #[test]
    fn rejects_a_non_object_element() {
        let err = decode(r#"["oops"]"#).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Descriptor {
                position: 0,
                source: DescriptorError::NotAnObject,
            }
        ));
    }

    #[test]
    fn a_missing_field_fails_the_whole_decode() {
        // The first element is fine; the second is missing three fields.
        let text = r#"[{"index":0,"lower":"","upper":"m","cid":"A"},{"index":1}]"#;
        let err = decode(text).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Descriptor {
                position: 1,
                source: DescriptorError::MissingField("lower"),
            }
        ));
    }

    #[test]
    fn rejects_null_field_values() {
        let text = r#"[{"index":0,"lower":null,"upper":"m","cid":"A"}]"#;
        let err = decode(text).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Descriptor {
                source: DescriptorError::WrongType { field: "lower", .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_mistyped_index() {
        for bad in [
            r#"[{"index":"0","lower":"","upper":"","cid":"A"}]"#,
            r#"[{"index":-1,"lower":"","upper":"","cid":"A"}]"#,
            r#"[{"index":0.5,"lower":"","upper":"","cid":"A"}]"#,
        ] {
            let err = decode(bad).unwrap_err();
            assert!(matches!(
                err,
                DecodeError::Descriptor {
                    source: DescriptorError::WrongType { field: "index", .. },
                    ..
                }
            ));
        }
    }

    #[test]
    fn error_messages_name_the_decode_stage() {
        let map_err = decode("{}").unwrap_err();
        assert!(map_err
            .to_string()
            .starts_with("failed to decode shards container info"));

        let shard_err = decode(r#"[{"index":1}]"#).unwrap_err();
        let message = shard_err.to_string();
        assert!(message.contains("failed to decode shard container info"));
        assert!(message.contains("missing required field `lower`"));
    }

    #[test]
    fn duplicate_ordinals_overwrite_silently() {
        let text = concat!(
            r#"[{"index":0,"lower":"","upper":"m","cid":"OLD"},"#,
            r#"{"index":1,"lower":"m","upper":"","cid":"B"},"#,
            r#"{"index":0,"lower":"","upper":"m","cid":"NEW"}]"#
        );
        let index = decode(text).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0).unwrap().target.as_str(), "NEW");
    }

    #[test]
    fn encodes_with_fixed_field_order() {
        let index = decode(r#"[{"cid":"A","upper":"m","lower":"","index":0}]"#).unwrap();
        assert_eq!(
            encode(&index),
            r#"[{"index":0,"lower":"","upper":"m","cid":"A"}]"#
        );
    }

    #[test]
    fn encodes_shards_in_ascending_ordinal_order() {
        let text = concat!(
            r#"[{"index":2,"lower":"t","upper":"","cid":"C"},"#,
            r#"{"index":0,"lower":"","upper":"g","cid":"A"},"#,
            r#"{"index":1,"lower":"g","upper":"t","cid":"B"}]"#
        );
        let encoded = encode(&decode(text).unwrap());
        let ordinals: Vec<u32> = decode(&encoded).unwrap().iter().map(|s| s.index).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert!(encoded.starts_with(r#"[{"index":0,"#));
    }

    #[test]
    fn encodes_an_empty_index_as_an_empty_array() {
        assert_eq!(encode(&ShardIndex::new()), "[]");
    }

    #[test]
    fn escapes_json_string_contents() {
        let text = r#"[{"index":0,"lower":"","upper":"a\"b","cid":"A"}]"#;
        let index = decode(text).unwrap();
        assert_eq!(index.get(0).unwrap().upper, "a\"b");
        let reparsed = decode(&encode(&index)).unwrap();
        assert_eq!(reparsed, index);
    }

    #[test]
    fn round_trip_preserves_every_descriptor() {
        let index = decode(TWO_SHARDS).unwrap();
        let reparsed = decode(&encode(&index)).unwrap();
        assert_eq!(reparsed, index);
        assert_eq!(encode(&reparsed), TWO_SHARDS);
    }
}
