use serde_lenient::{
    decode_into_one, decode_into_one_with_options, record, CollectingSink, DecodeOptions, Field,
    FieldKind, FieldValue, Record, Slot,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Debug, PartialEq)]
struct Widths {
    tiny: u8,
    small: i16,
    wide: usize,
    single: f32,
}

record!(Widths { tiny, small, wide, single });

#[derive(Default, Debug, PartialEq)]
struct OrderId(u64);

impl FieldValue for OrderId {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsigned(&mut self.0)
    }
}

#[derive(Default, Debug)]
struct Order {
    id: OrderId,
    lines: Vec<String>,
    extra: HashMap<String, String>,
    customer: Option<String>,
    note: String,
}

record!(Order {
    id => "order_id",
    lines,
    extra,
    customer,
    note => "remark",
});

#[test]
fn test_record_macro_trailing_comma_and_kinds() {
    let mut order = Order::default();
    let kinds: Vec<_> = order.fields().iter().map(Field::kind).collect();
    assert_eq!(
        kinds,
        [
            FieldKind::Unsigned,
            FieldKind::Unrecognized,
            FieldKind::Unrecognized,
            FieldKind::Unrecognized,
            FieldKind::String,
        ]
    );
}

#[test]
fn test_narrow_numeric_fields() {
    let mut widths = Widths::default();
    decode_into_one(
        br#"{"tiny": "200", "small": -12, "wide": 4096, "single": "1.5"}"#,
        &mut widths,
    )
    .unwrap();

    assert_eq!(
        widths,
        Widths {
            tiny: 200,
            small: -12,
            wide: 4096,
            single: 1.5,
        }
    );
}

#[test]
fn test_newtype_field_value() {
    let mut order = Order::default();
    decode_into_one(br#"{"order_id": "31", "remark": "rush"}"#, &mut order).unwrap();
    assert_eq!(order.id, OrderId(31));
    assert_eq!(order.note, "rush");
}

#[test]
fn test_unrecognized_fields_are_reported_in_declared_order() {
    let sink = Arc::new(CollectingSink::new());
    let options = DecodeOptions::new().with_sink(sink.clone());
    let mut order = Order::default();
    decode_into_one_with_options(
        br#"{"customer": "c1", "extra": {"k": "v"}, "lines": ["a", "b"]}"#,
        &mut order,
        options,
    )
    .unwrap();

    assert_eq!(sink.keys(), ["lines", "extra", "customer"]);
    assert!(order.lines.is_empty());
    assert!(order.extra.is_empty());
    assert!(order.customer.is_none());
}

#[test]
fn test_aliased_field_still_matches_its_name() {
    let mut order = Order::default();
    decode_into_one(br#"{"note": "by name"}"#, &mut order).unwrap();
    assert_eq!(order.note, "by name");
}
