/// Implements `Display`, `Debug` and `Serialize` for something that can be represented as a fixed
/// length byte array. Serializes as hex for human readable formats and as a tuple of bytes
/// otherwise.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_display_debug_serialize {
    (
        impl$([$($gen:tt)*])? for $type:ty, $len:literal, |$self:ident| $to_bytes:expr
    ) => {
        impl$(<$($gen)*>)? core::fmt::Display for $type {
            /// Displays as lowercase hex.
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                let $self = self;
                let bytes: [u8; $len] = $to_bytes;
                for byte in bytes.iter() {
                    write!(f, "{:02x}", byte)?
                }
                Ok(())
            }
        }

        impl$(<$($gen)*>)? core::fmt::Debug for $type {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                let name = core::any::type_name::<Self>();
                let name = name.split('<').next().unwrap_or(name);
                let name = name.rsplit("::").next().unwrap_or(name);
                write!(f, "{}({})", name, self)
            }
        }

        #[cfg(feature = "serde")]
        impl$(<$($gen)*>)? $crate::serde::Serialize for $type {
            fn serialize<Ser: $crate::serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
                use $crate::serde::ser::SerializeTuple;
                if serializer.is_human_readable() {
                    return serializer.collect_str(self);
                }

                let $self = self;
                let bytes: [u8; $len] = $to_bytes;

                let mut tup = serializer.serialize_tuple($len)?;
                for byte in bytes.iter() {
                    tup.serialize_element(byte)?;
                }
                tup.end()
            }
        }
    };
}

/// Implements `FromStr` (from hex) and `Deserialize` for something that can be decoded from a
/// fixed length byte array.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_fromstr_deserialize {
    (
        name => $name:literal,
        impl$([$($gen:tt)*])? for $type:ty, $len:literal, |$bytes:ident| $from_bytes:expr
    ) => {
        impl$(<$($gen)*>)? core::str::FromStr for $type {
            type Err = $crate::hex::HexError;

            /// Parses the string as hex and then tries to decode the bytes.
            fn from_str(hex: &str) -> Result<Self, $crate::hex::HexError> {
                let $bytes: [u8; $len] = $crate::hex::decode_array(hex)?;
                let decoded: Option<Self> = $from_bytes;
                decoded.ok_or($crate::hex::HexError::InvalidEncoding)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de, $($($gen)*)?> $crate::serde::Deserialize<'de> for $type {
            fn deserialize<Deser: $crate::serde::Deserializer<'de>>(
                deserializer: Deser,
            ) -> Result<Self, Deser::Error> {
                use core::marker::PhantomData;
                use $crate::serde::de;

                struct HexVisitor<T>(PhantomData<T>);

                impl<'de, T: core::str::FromStr<Err = $crate::hex::HexError>> de::Visitor<'de> for HexVisitor<T> {
                    type Value = T;

                    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                        write!(f, "a valid {}-byte hex encoded {}", $len, $name)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
                        use $crate::hex::HexError::*;
                        T::from_str(v).map_err(|e| match e {
                            InvalidLength => E::invalid_length(v.len() / 2, &self),
                            InvalidEncoding => E::invalid_value(de::Unexpected::Str(v), &self),
                            InvalidHex => E::custom("invalid hex"),
                        })
                    }
                }

                struct BytesVisitor<T>(PhantomData<T>);

                impl<'de, T: core::str::FromStr<Err = $crate::hex::HexError>> de::Visitor<'de> for BytesVisitor<T> {
                    type Value = [u8; $len];

                    fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                        write!(f, "a valid {}-byte encoding of a {}", $len, $name)
                    }

                    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<[u8; $len], A::Error> {
                        let mut bytes = [0u8; $len];
                        for (i, byte) in bytes.iter_mut().enumerate() {
                            *byte = seq
                                .next_element()?
                                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                        }
                        Ok(bytes)
                    }
                }

                if deserializer.is_human_readable() {
                    return deserializer.deserialize_str(HexVisitor::<Self>(PhantomData));
                }

                let $bytes = deserializer.deserialize_tuple($len, BytesVisitor::<Self>(PhantomData))?;
                let decoded: Option<Self> = $from_bytes;
                decoded.ok_or_else(|| {
                    <Deser::Error as de::Error>::custom(concat!("invalid byte encoding of a ", $name))
                })
            }
        }
    };
}
