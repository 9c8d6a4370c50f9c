//! Business-key hash kernel.
//!
//! Every event kind builds its hash by feeding the fields of its business key,
//! in a fixed order, through [`hash`]. Each step computes
//! `37 * seed + term` in wrapping 32-bit arithmetic, starting from [`SEED`].
//!
//! Terms are stable across processes and platforms: strings contribute the
//! polynomial hash of their UTF-16 code units, floating point values their
//! canonical bit pattern, and wide integers the xor-fold of their halves.
//! Each term matches the per-field value of earlier stored hash codes. Whole
//! event hashes differ from those rows, because the storage `event_id` is no
//! longer part of any business key.

/// Initial value of every accumulation.
pub const SEED: i32 = 23;

const ODD_PRIME: i32 = 37;

/// Multiplier of the per-string polynomial hash.
const STRING_PRIME: i32 = 31;

/// A value that can be folded into a running hash.
pub trait HashTerm {
    /// Returns the new running hash after adding `self` to `seed`.
    fn accumulate(&self, seed: i32) -> i32;
}

/// Adds `value` to the running hash `seed`.
pub fn hash<T: HashTerm + ?Sized>(seed: i32, value: &T) -> i32 {
    value.accumulate(seed)
}

#[inline]
fn step(seed: i32, term: i32) -> i32 {
    ODD_PRIME.wrapping_mul(seed).wrapping_add(term)
}

#[inline]
fn fold_wide(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

/// Stable hash of a string over its UTF-16 code units.
pub fn string_hash(value: &str) -> i32 {
    value.encode_utf16().fold(0i32, |h, unit| {
        STRING_PRIME.wrapping_mul(h).wrapping_add(i32::from(unit))
    })
}

/// Chained accumulation over several fields.
///
/// ```
/// use raptor_events::hash::{HashAccumulator, SEED};
///
/// let hash = HashAccumulator::new().field(&1_i32).field("mail").finish();
/// assert_ne!(hash, SEED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashAccumulator(i32);

impl HashAccumulator {
    /// Starts an accumulation at [`SEED`].
    #[must_use]
    pub const fn new() -> Self {
        Self(SEED)
    }

    /// Folds one field into the accumulation.
    #[must_use]
    pub fn field<T: HashTerm + ?Sized>(self, value: &T) -> Self {
        Self(hash(self.0, value))
    }

    /// Returns the accumulated hash.
    #[must_use]
    pub const fn finish(self) -> i32 {
        self.0
    }
}

impl Default for HashAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl HashTerm for bool {
    fn accumulate(&self, seed: i32) -> i32 {
        step(seed, i32::from(*self))
    }
}

impl HashTerm for char {
    fn accumulate(&self, seed: i32) -> i32 {
        step(seed, *self as i32)
    }
}

macro_rules! narrow_int_term {
    ($($ty:ty),*) => {
        $(
            impl HashTerm for $ty {
                fn accumulate(&self, seed: i32) -> i32 {
                    step(seed, i32::from(*self))
                }
            }
        )*
    };
}

macro_rules! wide_int_term {
    ($($ty:ty),*) => {
        $(
            impl HashTerm for $ty {
                fn accumulate(&self, seed: i32) -> i32 {
                    step(seed, fold_wide(*self as i64))
                }
            }
        )*
    };
}

narrow_int_term!(i8, i16, i32, u8, u16);
wide_int_term!(i64, u32, u64, isize, usize);

impl HashTerm for f32 {
    fn accumulate(&self, seed: i32) -> i32 {
        let bits = if self.is_nan() {
            f32::NAN.to_bits()
        } else {
            self.to_bits()
        };
        step(seed, bits as i32)
    }
}

impl HashTerm for f64 {
    fn accumulate(&self, seed: i32) -> i32 {
        let bits = if self.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.to_bits()
        };
        step(seed, fold_wide(bits as i64))
    }
}

impl HashTerm for str {
    fn accumulate(&self, seed: i32) -> i32 {
        step(seed, string_hash(self))
    }
}

impl HashTerm for String {
    fn accumulate(&self, seed: i32) -> i32 {
        self.as_str().accumulate(seed)
    }
}

/// An absent value contributes the same term as the integer zero.
impl<T: HashTerm> HashTerm for Option<T> {
    fn accumulate(&self, seed: i32) -> i32 {
        match self {
            Some(value) => value.accumulate(seed),
            None => step(seed, 0),
        }
    }
}

impl<T: HashTerm> HashTerm for [T] {
    fn accumulate(&self, seed: i32) -> i32 {
        self.iter().fold(seed, |acc, item| item.accumulate(acc))
    }
}

impl<T: HashTerm, const N: usize> HashTerm for [T; N] {
    fn accumulate(&self, seed: i32) -> i32 {
        self[..].accumulate(seed)
    }
}

impl<T: HashTerm> HashTerm for Vec<T> {
    fn accumulate(&self, seed: i32) -> i32 {
        self.as_slice().accumulate(seed)
    }
}

impl<T: HashTerm + ?Sized> HashTerm for Box<T> {
    fn accumulate(&self, seed: i32) -> i32 {
        (**self).accumulate(seed)
    }
}

impl<T: HashTerm + ?Sized> HashTerm for &T {
    fn accumulate(&self, seed: i32) -> i32 {
        (**self).accumulate(seed)
    }
}
