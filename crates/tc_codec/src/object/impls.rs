use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::{Map, Value};

use super::{Blank, Decoded, FromDecoded, Object, Slot, SlotError, SlotRef};
use crate::registry::TypeRegistry;

/// Implement [`Slot`] through [`FromDecoded`]: decode first, then replace.
macro_rules! impl_slot {
    ($ty:ty, |$this:ident| $view:expr) => {
        impl Slot for $ty {
            #[inline]
            fn view(&self) -> SlotRef<'_> {
                let $this = self;
                $view
            }

            fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
                *self = <$ty as FromDecoded>::from_decoded(value)?;
                Ok(())
            }
        }
    };
}

fn mismatch(expected: &'static str, found: &Decoded) -> SlotError {
    SlotError::Mismatch {
        expected,
        found: found.kind_name(),
    }
}

// -----------------------------------------------------------------------------
// bool

impl FromDecoded for bool {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        match value {
            Decoded::Value(Value::Bool(v)) => Ok(v),
            other => Err(mismatch("a boolean", &other)),
        }
    }
}

impl Blank for bool {
    #[inline]
    fn blank() -> Self {
        false
    }
}

impl_slot!(bool, |this| SlotRef::Bool(*this));

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer {
    ($via:ident, $variant:ident, $wide:ty: $($ty:ty),+) => {$(
        impl FromDecoded for $ty {
            fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
                const EXPECTED: &str = stringify!($ty);
                match value {
                    Decoded::Value(Value::Number(number)) => {
                        let wide = number.$via().ok_or_else(|| SlotError::OutOfRange {
                            expected: EXPECTED,
                            value: number.to_string(),
                        })?;
                        <$ty>::try_from(wide).map_err(|_| SlotError::OutOfRange {
                            expected: EXPECTED,
                            value: number.to_string(),
                        })
                    }
                    other => Err(mismatch(EXPECTED, &other)),
                }
            }
        }

        impl Blank for $ty {
            #[inline]
            fn blank() -> Self {
                0
            }
        }

        impl_slot!($ty, |this| SlotRef::$variant(<$wide>::from(*this)));
    )+};
}

impl_integer!(as_i64, Int, i64: i8, i16, i32, i64);
impl_integer!(as_u64, UInt, u64: u8, u16, u32, u64);

// `isize` / `usize` have no lossless `From` into 64-bit integers.
macro_rules! impl_pointer_sized {
    ($via:ident, $variant:ident, $wide:ty: $ty:ty) => {
        impl FromDecoded for $ty {
            fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
                <$wide as FromDecoded>::from_decoded(value).and_then(|wide| {
                    <$ty>::try_from(wide).map_err(|_| SlotError::OutOfRange {
                        expected: stringify!($ty),
                        value: wide.to_string(),
                    })
                })
            }
        }

        impl Blank for $ty {
            #[inline]
            fn blank() -> Self {
                0
            }
        }

        impl Slot for $ty {
            fn view(&self) -> SlotRef<'_> {
                match <$wide>::try_from(*self) {
                    Ok(wide) => SlotRef::$variant(wide),
                    Err(_) => SlotRef::Null,
                }
            }

            fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
                *self = <$ty as FromDecoded>::from_decoded(value)?;
                Ok(())
            }
        }
    };
}

impl_pointer_sized!(as_i64, Int, i64: isize);
impl_pointer_sized!(as_u64, UInt, u64: usize);

// -----------------------------------------------------------------------------
// Floats

impl FromDecoded for f64 {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        match value {
            Decoded::Value(Value::Number(number)) => {
                number.as_f64().ok_or_else(|| SlotError::OutOfRange {
                    expected: "f64",
                    value: number.to_string(),
                })
            }
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromDecoded for f32 {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        f64::from_decoded(value).map(|v| v as f32)
    }
}

impl Blank for f64 {
    #[inline]
    fn blank() -> Self {
        0.0
    }
}

impl Blank for f32 {
    #[inline]
    fn blank() -> Self {
        0.0
    }
}

impl_slot!(f64, |this| SlotRef::Float(*this));
impl_slot!(f32, |this| SlotRef::Float(f64::from(*this)));

// -----------------------------------------------------------------------------
// String

impl FromDecoded for String {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        match value {
            Decoded::Value(Value::String(v)) => Ok(v),
            other => Err(mismatch("a string", &other)),
        }
    }
}

impl Blank for String {
    #[inline]
    fn blank() -> Self {
        String::new()
    }
}

impl_slot!(String, |this| SlotRef::Str(this));

// -----------------------------------------------------------------------------
// Untyped data

impl FromDecoded for Value {
    #[inline]
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        value.into_value()
    }
}

impl Blank for Value {
    #[inline]
    fn blank() -> Self {
        Value::Null
    }
}

impl_slot!(Value, |this| SlotRef::Value(this));

impl FromDecoded for Map<String, Value> {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        match value.into_value()? {
            Value::Object(map) => Ok(map),
            other => Err(mismatch("a map", &Decoded::Value(other))),
        }
    }
}

impl Blank for Map<String, Value> {
    #[inline]
    fn blank() -> Self {
        Map::new()
    }
}

impl_slot!(Map<String, Value>, |this| SlotRef::Map(
    this.iter().map(|(key, item)| (key.as_str(), item as &dyn Slot)).collect()
));

// -----------------------------------------------------------------------------
// Option

impl<T: FromDecoded> FromDecoded for Option<T> {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_decoded(value).map(Some)
        }
    }
}

impl<T> Blank for Option<T> {
    #[inline]
    fn blank() -> Self {
        None
    }
}

impl<T: Slot + FromDecoded> Slot for Option<T> {
    fn view(&self) -> SlotRef<'_> {
        match self {
            Some(inner) => inner.view(),
            None => SlotRef::Null,
        }
    }

    fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: FromDecoded> FromDecoded for Vec<T> {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        value
            .into_elements("a list")?
            .into_iter()
            .map(T::from_decoded)
            .collect()
    }
}

impl<T> Blank for Vec<T> {
    #[inline]
    fn blank() -> Self {
        Vec::new()
    }
}

impl<T: Slot + FromDecoded> Slot for Vec<T> {
    fn view(&self) -> SlotRef<'_> {
        SlotRef::List(self.iter().map(|item| item as &dyn Slot).collect())
    }

    fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<T: FromDecoded> FromDecoded for BTreeMap<String, T> {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        value
            .into_entries("a map")?
            .into_iter()
            .map(|(key, item)| Ok((key, T::from_decoded(item)?)))
            .collect()
    }
}

impl<T> Blank for BTreeMap<String, T> {
    #[inline]
    fn blank() -> Self {
        BTreeMap::new()
    }
}

impl<T: Slot + FromDecoded> Slot for BTreeMap<String, T> {
    fn view(&self) -> SlotRef<'_> {
        SlotRef::Map(
            self.iter()
                .map(|(key, item)| (key.as_str(), item as &dyn Slot))
                .collect(),
        )
    }

    fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

// -----------------------------------------------------------------------------
// Box<dyn Object>

impl FromDecoded for Box<dyn Object> {
    fn from_decoded(value: Decoded) -> Result<Self, SlotError> {
        match value {
            Decoded::Object(object) => Ok(object),
            other => Err(mismatch("an object", &other)),
        }
    }
}

impl Slot for Box<dyn Object> {
    #[inline]
    fn view(&self) -> SlotRef<'_> {
        SlotRef::Object(&**self)
    }

    fn assign(&mut self, value: Decoded) -> Result<(), SlotError> {
        *self = Self::from_decoded(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decoded(value: Value) -> Decoded {
        Decoded::Value(value)
    }

    #[test]
    fn integer_widths() {
        let mut small = 0u8;
        small.assign(decoded(json!(200))).unwrap();
        assert_eq!(small, 200);

        let err = small.assign(decoded(json!(300))).unwrap_err();
        assert!(matches!(err, SlotError::OutOfRange { expected: "u8", .. }));
        assert_eq!(small, 200);

        let err = small.assign(decoded(json!(-1))).unwrap_err();
        assert!(matches!(err, SlotError::OutOfRange { .. }));

        let mut signed = 0i32;
        signed.assign(decoded(json!(-5))).unwrap();
        assert!(matches!(signed.view(), SlotRef::Int(-5)));

        let err = signed.assign(decoded(json!("5"))).unwrap_err();
        assert_eq!(
            err,
            SlotError::Mismatch {
                expected: "i32",
                found: "a string"
            }
        );
    }

    #[test]
    fn option_takes_null() {
        let mut slot = Some(3i64);
        slot.assign(Decoded::null()).unwrap();
        assert_eq!(slot, None);
        assert!(matches!(slot.view(), SlotRef::Null));

        slot.assign(decoded(json!(4))).unwrap();
        assert_eq!(slot, Some(4));
    }

    #[test]
    fn containers_from_lists_and_maps() {
        let mut list: Vec<i64> = Vec::new();
        list.assign(Decoded::List(vec![decoded(json!(1)), decoded(json!(2))]))
            .unwrap();
        assert_eq!(list, [1, 2]);

        list.assign(decoded(json!({"a": 3, "b": 4}))).unwrap();
        assert_eq!(list, [3, 4]);

        let mut map: BTreeMap<String, i64> = BTreeMap::new();
        map.assign(decoded(json!([5, 6]))).unwrap();
        assert_eq!(map.get("1"), Some(&6));

        let mut values: Vec<Option<i64>> = Vec::new();
        values
            .assign(Decoded::List(vec![Decoded::null(), decoded(json!(1))]))
            .unwrap();
        assert_eq!(values, [None, Some(1)]);
    }

    #[test]
    fn untyped_value_rebuilds_containers() {
        let mut value = Value::Null;
        value
            .assign(Decoded::Map(vec![(
                "a".into(),
                Decoded::List(vec![decoded(json!(1))]),
            )]))
            .unwrap();
        assert_eq!(value, json!({"a": [1]}));
    }
}
