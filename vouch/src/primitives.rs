//! Generators for primitive field types.

use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::generator::Generator;

/// Generator for integer types with an inclusive range
#[derive(Debug, Clone)]
pub struct IntGenerator<T> {
    min: T,
    max: T,
}

impl<T> IntGenerator<T>
where
    T: Copy + PartialOrd,
{
    /// Create a new integer generator over `min..=max`
    pub fn new(min: T, max: T) -> Self {
        assert!(min <= max, "IntGenerator requires min <= max");
        Self { min, max }
    }

    /// Lower bound
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> T {
        self.max
    }
}

macro_rules! impl_int_generator {
    ($($t:ty),*) => {
        $(
            impl Generator<$t> for IntGenerator<$t> {
                fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> $t {
                    use rand::Rng;
                    rng.gen_range(self.min..=self.max)
                }
            }

            impl IntGenerator<$t> {
                /// Create a generator for the full range of the type
                pub fn full_range() -> Self {
                    Self::new(<$t>::MIN, <$t>::MAX)
                }
            }
        )*
    };
}

impl_int_generator!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

/// Generator for character values
#[derive(Debug, Clone)]
pub struct CharGenerator {
    /// Character ranges to generate from
    ranges: Vec<(char, char)>,
}

impl CharGenerator {
    /// Any Unicode scalar value
    pub fn unicode() -> Self {
        Self {
            ranges: vec![('\u{0}', '\u{D7FF}'), ('\u{E000}', '\u{10FFFF}')],
        }
    }

    /// ASCII printable characters
    pub fn ascii_printable() -> Self {
        Self {
            ranges: vec![(' ', '~')],
        }
    }

    /// Custom ranges; a pair given as `(end, start)` is flipped
    pub fn with_ranges(ranges: Vec<(char, char)>) -> Self {
        let ranges = ranges
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        Self { ranges }
    }
}

impl Generator<char> for CharGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> char {
        use rand::Rng;
        if self.ranges.is_empty() {
            return 'a';
        }

        let range_idx = rng.gen_range(0..self.ranges.len());
        let (start, end) = self.ranges[range_idx];
        let code = rng.gen_range(start as u32..=end as u32);

        char::from_u32(code).unwrap_or(start)
    }
}

/// Generator for string values
///
/// Lengths are drawn from `min_length..=max_length`, capped by twice the
/// configured size hint. Empty strings are produced whenever `min_length` is 0.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    char_generator: CharGenerator,
    min_length: usize,
    max_length: usize,
}

impl StringGenerator {
    /// Strings of arbitrary Unicode content
    pub fn unicode(min_length: usize, max_length: usize) -> Self {
        Self::with_char_generator(CharGenerator::unicode(), min_length, max_length)
    }

    /// Strings of ASCII printable characters
    pub fn ascii_printable(min_length: usize, max_length: usize) -> Self {
        Self::with_char_generator(CharGenerator::ascii_printable(), min_length, max_length)
    }

    /// Create a new string generator with a custom character generator
    pub fn with_char_generator(
        char_generator: CharGenerator,
        min_length: usize,
        max_length: usize,
    ) -> Self {
        Self {
            char_generator,
            min_length,
            max_length,
        }
    }
}

impl Generator<String> for StringGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> String {
        use rand::Rng;
        let max_len = self.max_length.min(config.size_hint.saturating_mul(2));
        let length = if self.min_length >= max_len {
            self.min_length
        } else {
            rng.gen_range(self.min_length..=max_len)
        };

        (0..length)
            .map(|_| self.char_generator.generate(rng, config))
            .collect()
    }
}

const DEFAULT_NONE_PROBABILITY: f64 = 0.1;

/// Generator for optional values; `None` models an absent field
#[derive(Debug, Clone)]
pub struct OptionGenerator<G> {
    inner: G,
    none_probability: f64,
}

impl<G> OptionGenerator<G> {
    /// Wrap `inner`, producing `None` one time in ten
    pub fn new(inner: G) -> Self {
        Self::with_probability(inner, DEFAULT_NONE_PROBABILITY)
    }

    /// Wrap `inner` with an explicit probability of `None`
    ///
    /// Values outside `0.0..=1.0` are clamped; NaN falls back to the default.
    pub fn with_probability(inner: G, none_probability: f64) -> Self {
        let none_probability = if none_probability.is_nan() {
            DEFAULT_NONE_PROBABILITY
        } else {
            none_probability.clamp(0.0, 1.0)
        };
        Self {
            inner,
            none_probability,
        }
    }
}

impl<T, G: Generator<T>> Generator<Option<T>> for OptionGenerator<G> {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> Option<T> {
        use rand::Rng;
        if rng.gen_bool(self.none_probability) {
            None
        } else {
            Some(self.inner.generate(rng, config))
        }
    }
}

/// Generator for version 4 UUIDs drawn from the supplied RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl Generator<Uuid> for UuidGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, _config: &GeneratorConfig) -> Uuid {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);

        bytes[6] = (bytes[6] & 0x0f) | 0x40; // version 4
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // RFC 4122 variant

        Uuid::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_seeded_rng;

    #[test]
    fn test_int_generator_stays_in_range() {
        let generator = IntGenerator::new(0i32, 1024);
        let mut rng = create_seeded_rng(7);
        let config = GeneratorConfig::default();

        for value in generator.values(&mut rng, &config).take(2000) {
            assert!((0..=1024).contains(&value));
        }
    }

    #[test]
    fn test_int_generator_hits_both_bounds() {
        let generator = IntGenerator::new(0u8, 3);
        let mut rng = create_seeded_rng(8);
        let config = GeneratorConfig::default();
        let seen: Vec<u8> = generator.values(&mut rng, &config).take(500).collect();
        assert!(seen.contains(&0));
        assert!(seen.contains(&3));
    }

    #[test]
    #[should_panic(expected = "IntGenerator requires min <= max")]
    fn test_int_generator_rejects_inverted_range() {
        IntGenerator::new(5, 1);
    }

    #[test]
    fn test_char_generator_ranges() {
        let generator = CharGenerator::with_ranges(vec![('a', 'c')]);
        let mut rng = create_seeded_rng(9);
        let config = GeneratorConfig::default();
        for c in generator.values(&mut rng, &config).take(100) {
            assert!(('a'..='c').contains(&c));
        }
    }

    #[test]
    fn test_unicode_strings_respect_length_bounds() {
        let generator = StringGenerator::unicode(0, 8);
        let mut rng = create_seeded_rng(10);
        let config = GeneratorConfig::default();

        let strings: Vec<String> = generator.values(&mut rng, &config).take(300).collect();
        assert!(strings.iter().all(|s| s.chars().count() <= 8));
        assert!(strings.iter().any(|s| s.is_empty()));
        assert!(strings.iter().any(|s| !s.is_ascii()));
    }

    #[test]
    fn test_string_length_capped_by_size_hint() {
        let generator = StringGenerator::ascii_printable(0, 100);
        let mut rng = create_seeded_rng(11);
        let config = GeneratorConfig::new(2, 5).unwrap();
        for s in generator.values(&mut rng, &config).take(100) {
            assert!(s.len() <= 4);
        }
    }

    #[test]
    fn test_string_generator_survives_huge_size_hint() {
        let generator = StringGenerator::unicode(0, 32);
        let mut rng = create_seeded_rng(14);
        let config = GeneratorConfig::new(usize::MAX, 5).unwrap();
        for s in generator.values(&mut rng, &config).take(50) {
            assert!(s.chars().count() <= 32);
        }
    }

    #[test]
    fn test_char_generator_flips_inverted_ranges() {
        let generator = CharGenerator::with_ranges(vec![('z', 'x')]);
        let mut rng = create_seeded_rng(15);
        let config = GeneratorConfig::default();
        for c in generator.values(&mut rng, &config).take(100) {
            assert!(('x'..='z').contains(&c));
        }
    }

    #[test]
    fn test_option_generator_nan_probability_uses_default() {
        let generator = OptionGenerator::with_probability(IntGenerator::new(1, 1), f64::NAN);
        let mut rng = create_seeded_rng(16);
        let config = GeneratorConfig::default();
        let values: Vec<Option<i32>> = generator.values(&mut rng, &config).take(1000).collect();
        assert!(values.contains(&None));
        assert!(values.contains(&Some(1)));
    }

    #[test]
    fn test_option_generator_extremes() {
        let mut rng = create_seeded_rng(12);
        let config = GeneratorConfig::default();

        let always = OptionGenerator::with_probability(IntGenerator::new(1, 1), 1.0);
        let value: Option<i32> = always.generate(&mut rng, &config);
        assert_eq!(value, None);

        let never = OptionGenerator::with_probability(IntGenerator::new(1, 1), 0.0);
        let value: Option<i32> = never.generate(&mut rng, &config);
        assert_eq!(value, Some(1));
    }

    #[test]
    fn test_uuid_generator_version_and_determinism() {
        let config = GeneratorConfig::default();
        let a = UuidGenerator.generate(&mut create_seeded_rng(42), &config);
        let b = UuidGenerator.generate(&mut create_seeded_rng(42), &config);
        assert_eq!(a, b);
        assert_eq!(a.get_version_num(), 4);
        assert_eq!(a.get_variant(), uuid::Variant::RFC4122);

        let mut rng = create_seeded_rng(43);
        let first = UuidGenerator.generate(&mut rng, &config);
        let second = UuidGenerator.generate(&mut rng, &config);
        assert_ne!(first, second);
    }
}
