//! Fixed-size values decoded from raw bytes in the host's native byte order.
//!
//! Values written on a machine with different endianness will not decode to the
//! same numbers; callers that need a portable format must convert themselves.

/// A plain value that can be rebuilt from exactly `SIZE` native-order bytes.
pub trait NativeValue: Sized {
    const SIZE: usize;

    /// Decode from a slice of exactly `Self::SIZE` bytes.
    fn from_native_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_native_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NativeValue for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_native_bytes(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_native_value!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl<const N: usize> NativeValue for [u8; N] {
    const SIZE: usize = N;

    fn from_native_bytes(bytes: &[u8]) -> Self {
        let mut raw = [0u8; N];
        raw.copy_from_slice(&bytes[..N]);
        raw
    }
}

impl NativeValue for bool {
    const SIZE: usize = 1;

    fn from_native_bytes(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_follow_host_order() {
        let v: u32 = 0x1122_3344;
        assert_eq!(u32::from_native_bytes(&v.to_ne_bytes()), v);
        assert_eq!(<u32 as NativeValue>::SIZE, 4);
    }

    #[test]
    fn byte_arrays_copy_verbatim() {
        let got = <[u8; 3]>::from_native_bytes(b"abcdef");
        assert_eq!(&got, b"abc");
    }

    #[test]
    fn floats_decode() {
        let v = -2.5f64;
        assert_eq!(f64::from_native_bytes(&v.to_ne_bytes()), v);
    }
}
