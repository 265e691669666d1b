/// Implements [`Record`](crate::Record) and [`Decodable`](crate::Decodable)
/// for a struct by listing its fields.
///
/// Fields are described in the order listed. `field => "key"` gives a field an
/// alias that is looked up before the field's own name. Fields left out of the
/// list are never touched by the decoder. Each listed field's type must
/// implement [`FieldValue`](crate::FieldValue).
///
/// ```rust
/// use serde_lenient::{decode_into_one, record};
///
/// #[derive(Default)]
/// struct User {
///     user_id: u64,
///     name: String,
///     cache_hits: u32,
/// }
///
/// record!(User {
///     user_id => "uid",
///     name,
/// });
///
/// let mut user = User::default();
/// decode_into_one(br#"{"uid": "7", "name": "Ada", "cache_hits": 9}"#, &mut user).unwrap();
/// assert_eq!(user.user_id, 7);
/// assert_eq!(user.name, "Ada");
/// assert_eq!(user.cache_hits, 0);
/// ```
#[macro_export]
macro_rules! record {
    (@alias) => {
        ::core::option::Option::None
    };

    (@alias $alias:literal) => {
        ::core::option::Option::Some($alias)
    };

    ($ty:ty { $($field:ident $(=> $alias:literal)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field::with_alias(
                            ::core::stringify!($field),
                            $crate::record!(@alias $($alias)?),
                            &mut self.$field,
                        )
                    ),*
                ]
            }
        }

        impl $crate::Decodable for $ty {
            fn shape(&mut self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Field, FieldKind, Record};
    use chrono::{DateTime, Local};

    #[derive(Default)]
    struct Event {
        id: u32,
        at: DateTime<Local>,
        note: String,
        skipped: bool,
    }

    record!(Event { id => "event_id", at, note });

    #[test]
    fn test_record_macro_lists_fields_in_order() {
        let mut event = Event::default();
        let fields = event.fields();
        let names: Vec<_> = fields.iter().map(Field::name).collect();
        let aliases: Vec<_> = fields.iter().map(Field::alias).collect();
        let kinds: Vec<_> = fields.iter().map(Field::kind).collect();

        assert_eq!(names, ["id", "at", "note"]);
        assert_eq!(aliases, [Some("event_id"), None, None]);
        assert_eq!(kinds, [FieldKind::Unsigned, FieldKind::Time, FieldKind::String]);
    }

    #[test]
    fn test_record_macro_leaves_unlisted_fields() {
        let mut event = Event {
            skipped: true,
            ..Event::default()
        };
        crate::decode_into_one(br#"{"skipped": false, "event_id": 3}"#, &mut event).unwrap();
        assert!(event.skipped);
        assert_eq!(event.id, 3);
    }
}
