//! Record population: driving the coercer across records and sequences.
//!
//! The [`Decoder`] walks a target record's fields in declared order. For each
//! writable field it looks the field up in the JSON object (alias first, then
//! the literal name), hands the value to [`coerce`](crate::coerce::coerce), and
//! moves on. Missing keys are skipped silently and fields that cannot be
//! coerced are reported as diagnostics. Only a bad target or malformed JSON
//! fails the call.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use serde_lenient::{decode_into_sequence, record};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Item {
//!     id: u64,
//!     label: String,
//! }
//! record!(Item { id, label });
//!
//! // The target is pre-sized; the JSON array does not grow it.
//! let mut items = vec![Item::default(), Item::default(), Item::default()];
//! decode_into_sequence(br#"[{"id": "1", "label": "a"}, {"id": 2, "label": 7}]"#, &mut items).unwrap();
//!
//! assert_eq!(items[0], Item { id: 1, label: "a".into() });
//! assert_eq!(items[1], Item { id: 2, label: "7".into() });
//! assert_eq!(items[2], Item::default());
//! ```
//!
//! ## Concurrency
//!
//! A `Decoder` is `Send + Sync` and can decode into distinct targets from many
//! threads at once. Each call holds the only `&mut` to its target, so two
//! calls can never write the same record concurrently.

use crate::coerce::{self, Coercion};
use crate::error::TargetFault;
use crate::record::{Decodable, Record, Sequence, Shape};
use crate::{DecodeOptions, Error, Result, Value};

/// A lenient JSON decoder configured with [`DecodeOptions`].
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Decoder { options }
    }

    /// Decodes a JSON object into a single record.
    ///
    /// The target shape is checked before the bytes are parsed, so a rejected
    /// target never sees a write.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTarget`] with [`TargetFault::NotARecord`] when `target`
    /// is not a record (including a boxed or optional record), and
    /// [`Error::Syntax`] when `bytes` is not JSON.
    pub fn decode_into_one<T>(&self, bytes: &[u8], target: &mut T) -> Result<()>
    where
        T: Decodable + ?Sized,
    {
        let type_name = target.type_name();
        match target.shape() {
            Shape::Record(record) => {
                let document = Value::from_slice(bytes)?;
                self.populate_one(record, &document);
                Ok(())
            }
            _ => Err(Error::invalid_target(type_name, TargetFault::NotARecord)),
        }
    }

    /// Decodes a JSON array into a sequence of records, or a JSON object into a
    /// single record.
    ///
    /// `target` may sit behind one `Box` or `Option`. The sequence's own length
    /// governs iteration: missing array elements leave their records untouched
    /// and extra elements are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTarget`] when the target is `None` ([`TargetFault::Nil`]),
    /// a scalar ([`TargetFault::NotAPointer`]), or nested more than one
    /// indirection deep ([`TargetFault::NotARecord`]). [`Error::Syntax`] when
    /// `bytes` is not JSON.
    pub fn decode_into_sequence<T>(&self, bytes: &[u8], target: &mut T) -> Result<()>
    where
        T: Decodable + ?Sized,
    {
        let type_name = target.type_name();
        let (type_name, shape) = match target.shape() {
            Shape::Indirect(None) => {
                return Err(Error::invalid_target(type_name, TargetFault::Nil));
            }
            Shape::Indirect(Some(inner)) => (inner.type_name(), inner.shape()),
            Shape::Scalar => {
                return Err(Error::invalid_target(type_name, TargetFault::NotAPointer));
            }
            shape => (type_name, shape),
        };

        match shape {
            Shape::Sequence(sequence) => {
                let document = Value::from_slice(bytes)?;
                self.populate_sequence(sequence, &document);
                Ok(())
            }
            Shape::Record(record) => {
                let document = Value::from_slice(bytes)?;
                self.populate_one(record, &document);
                Ok(())
            }
            Shape::Indirect(_) | Shape::Scalar => {
                Err(Error::invalid_target(type_name, TargetFault::NotARecord))
            }
        }
    }

    /// Populates one record from an already-parsed JSON value.
    ///
    /// Each field is written at most once. Read-only fields and fields with no
    /// matching key keep their current values.
    pub fn populate_one(&self, record: &mut dyn Record, value: &Value) {
        let record_name = record.record_name();
        for field in record.fields() {
            let name = field.name();
            if !field.is_writable() {
                tracing::trace!(target: "serde_lenient", record = record_name, field = name, "read-only field skipped");
                continue;
            }
            let Some((key, source)) = field.resolve(value) else {
                tracing::trace!(target: "serde_lenient", record = record_name, field = name, "no matching key");
                continue;
            };
            let kind = field.kind();
            match coerce::coerce(source, field.into_slot(), key, &self.options) {
                Coercion::Written => {
                    tracing::trace!(target: "serde_lenient", record = record_name, field = name, key, %kind, "field written");
                }
                Coercion::Unchanged | Coercion::Diagnosed => {
                    tracing::debug!(target: "serde_lenient", record = record_name, field = name, key, %kind, "field left unchanged");
                }
            }
        }
    }

    /// Populates every record of `sequence` from the element at the same
    /// index of `value`.
    pub fn populate_sequence(&self, sequence: &mut dyn Sequence, value: &Value) {
        for index in 0..sequence.len() {
            if let Some(record) = sequence.record_at(index) {
                self.populate_one(record, value.index(index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use crate::CollectingSink;
    use std::sync::Arc;

    #[derive(Default, Debug, PartialEq)]
    struct Account {
        id: u64,
        name: String,
        balance: f64,
        secret: String,
        tags: Vec<String>,
    }

    impl Record for Account {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::aliased("id", "account_id", &mut self.id),
                Field::new("name", &mut self.name),
                Field::new("balance", &mut self.balance),
                Field::read_only("secret"),
                Field::new("tags", &mut self.tags),
            ]
        }
    }

    impl Decodable for Account {
        fn shape(&mut self) -> Shape<'_> {
            Shape::Record(self)
        }
    }

    fn collecting() -> (Arc<CollectingSink>, Decoder) {
        let sink = Arc::new(CollectingSink::new());
        let decoder = Decoder::new(DecodeOptions::new().with_sink(sink.clone()));
        (sink, decoder)
    }

    #[test]
    fn test_populate_one_skips_read_only_and_missing() {
        let (sink, decoder) = collecting();
        let mut account = Account {
            secret: "hunter2".to_string(),
            balance: 1.5,
            ..Account::default()
        };
        let value = Value::from_slice(br#"{"account_id": "9", "name": "Ada", "secret": "leak"}"#)
            .unwrap();
        decoder.populate_one(&mut account, &value);

        assert_eq!(account.id, 9);
        assert_eq!(account.name, "Ada");
        assert_eq!(account.balance, 1.5);
        assert_eq!(account.secret, "hunter2");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_alias_checked_before_name() {
        let (_, decoder) = collecting();
        let mut account = Account::default();
        decoder
            .decode_into_one(br#"{"id": 1, "account_id": 2}"#, &mut account)
            .unwrap();
        assert_eq!(account.id, 2);
    }

    #[test]
    fn test_unsupported_field_is_reported_not_fatal() {
        let (sink, decoder) = collecting();
        let mut account = Account::default();
        decoder
            .decode_into_one(br#"{"tags": ["a"], "name": "Ada"}"#, &mut account)
            .unwrap();
        assert_eq!(account.name, "Ada");
        assert!(account.tags.is_empty());
        assert_eq!(sink.keys(), ["tags"]);
    }

    #[test]
    fn test_decode_into_one_rejects_before_parsing() {
        let (_, decoder) = collecting();
        let mut boxed = Box::new(Account::default());
        let err = decoder.decode_into_one(b"not json", &mut boxed).unwrap_err();
        assert_eq!(err.target_fault(), Some(TargetFault::NotARecord));

        let mut accounts = vec![Account::default()];
        let err = decoder.decode_into_one(br#"{"id": 1}"#, &mut accounts).unwrap_err();
        assert_eq!(err.target_fault(), Some(TargetFault::NotARecord));
        assert_eq!(accounts[0], Account::default());
    }

    #[test]
    fn test_sequence_target_shapes() {
        let (_, decoder) = collecting();

        let mut missing: Option<Vec<Account>> = None;
        let err = decoder.decode_into_sequence(b"[]", &mut missing).unwrap_err();
        assert_eq!(err.target_fault(), Some(TargetFault::Nil));

        let mut scalar = 5u64;
        let err = decoder.decode_into_sequence(b"[]", &mut scalar).unwrap_err();
        assert_eq!(err.target_fault(), Some(TargetFault::NotAPointer));

        let mut nested: Option<Box<Vec<Account>>> = Some(Box::new(vec![Account::default()]));
        let err = decoder
            .decode_into_sequence(br#"[{"id": 1}]"#, &mut nested)
            .unwrap_err();
        assert_eq!(err.target_fault(), Some(TargetFault::NotARecord));

        let mut present = Some(vec![Account::default()]);
        decoder
            .decode_into_sequence(br#"[{"id": 4}]"#, &mut present)
            .unwrap();
        assert_eq!(present.unwrap()[0].id, 4);
    }

    #[test]
    fn test_sequence_target_accepts_single_record() {
        let (_, decoder) = collecting();
        let mut account = Account::default();
        decoder
            .decode_into_sequence(br#"{"id": 3}"#, &mut account)
            .unwrap();
        assert_eq!(account.id, 3);
    }

    #[test]
    fn test_sequence_length_governs_iteration() {
        let (_, decoder) = collecting();
        let mut accounts = [Account::default(), Account::default()];
        decoder
            .decode_into_sequence(br#"[{"id": 1}, {"id": 2}, {"id": 3}]"#, &mut accounts)
            .unwrap();
        assert_eq!(accounts[0].id, 1);
        assert_eq!(accounts[1].id, 2);

        let mut accounts = vec![Account::default(), Account::default()];
        decoder
            .decode_into_sequence(br#"[{"id": 1}]"#, &mut accounts)
            .unwrap();
        assert_eq!(accounts[1], Account::default());
    }

    #[test]
    fn test_syntax_error_leaves_target_untouched() {
        let (_, decoder) = collecting();
        let mut accounts = vec![Account::default()];
        let err = decoder
            .decode_into_sequence(br#"[{"id": "#, &mut accounts)
            .unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(accounts[0], Account::default());
    }
}
