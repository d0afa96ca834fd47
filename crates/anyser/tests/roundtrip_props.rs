//! Property tests for the round-trip laws.

mod common;

use anyser::{CborBackend, JsonBackend, Payload, Serializer, Value};
use chrono::{DateTime, NaiveDateTime};
use common::*;
use proptest::prelude::*;
use uuid::Uuid;

fn arb_ext() -> impl Strategy<Value = Ext> {
    prop_oneof![
        any::<u128>().prop_map(|n| Ext::Uuid(Uuid::from_u128(n))),
        // Whole microseconds, since the dt codec writes six fractional digits.
        (0i64..4_102_444_800_000_000).prop_map(|us| {
            let dt: NaiveDateTime = DateTime::from_timestamp_micros(us)
                .expect("timestamp within range")
                .naive_utc();
            Ext::Dt(dt)
        }),
        Just(Ext::Fragile(false)),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,8}",
        // Strings that collide with the tag grammar.
        "\\$[a-z$:]{0,6}",
        "\\$t",
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value<Ext>> {
    prop_oneof![
        Just(Value::<Ext>::Null),
        any::<bool>().prop_map(Value::<Ext>::from),
        any::<i64>().prop_map(Value::<Ext>::from),
        // Quarters print and parse back exactly.
        (-4_000_000i64..4_000_000).prop_map(|n| Value::<Ext>::from(n as f64 / 4.0)),
        arb_string().prop_map(Value::<Ext>::from),
        arb_ext().prop_map(Value::<Ext>::Custom),
    ]
}

fn arb_value() -> impl Strategy<Value = Value<Ext>> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            // Distinct keys; "$t" is excluded since it is reserved for wrappers.
            prop::collection::btree_map("[a-z$]{0,4}", inner.clone(), 0..6).prop_map(|m| {
                Value::Object(m.into_iter().filter(|(k, _)| k != "$t").collect())
            }),
            (inner.clone(), inner.clone(), inner).prop_map(|(a, b, c)| my(a, b, c)),
        ]
    })
}

proptest! {
    #[test]
    fn json_round_trip(value in arb_value()) {
        let ser = Serializer::new(all_codecs(), JsonBackend::new()).unwrap();
        let text = ser.serialize(&value).unwrap();
        prop_assert_eq!(ser.deserialize(&text).unwrap(), value);
    }

    #[test]
    fn cbor_round_trip(value in arb_value()) {
        let ser = Serializer::new(all_codecs(), CborBackend).unwrap();
        let bytes = ser.serialize(&value).unwrap();
        prop_assert_eq!(ser.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn serialize_is_pure(value in arb_value()) {
        let ser = Serializer::new(all_codecs(), JsonBackend::new()).unwrap();
        prop_assert_eq!(ser.serialize(&value).unwrap(), ser.serialize(&value).unwrap());
    }

    #[test]
    fn codec_round_trip_law(ext in arb_ext()) {
        for codec in all_codecs() {
            if !codec.handles(anyser::CustomValue::kind(&ext)) {
                continue;
            }
            let payload = codec.to_primitive(&ext).unwrap();
            prop_assert!(matches!(payload, Payload::Text(_)));
            prop_assert_eq!(codec.from_primitive(payload).unwrap(), ext.clone());
        }
    }

    #[test]
    fn plain_strings_survive(s in any::<String>()) {
        let ser = Serializer::new(all_codecs(), JsonBackend::new()).unwrap();
        let value: Value<Ext> = Value::from(s);
        let text = ser.serialize(&value).unwrap();
        prop_assert_eq!(ser.deserialize(&text).unwrap(), value);
    }
}
