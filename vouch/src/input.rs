//! The structured record exercised by the demo suites, and its generator.

use std::ops::Range;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::GeneratorConfig;
use crate::generator::Generator;
use crate::primitives::{IntGenerator, OptionGenerator, StringGenerator, UuidGenerator};

/// Inclusive upper bound of [`StructuredInput::number`] for generated values
pub const MAX_NUMBER: i32 = 1024;

/// A five-field record whose `even` and `half` fields are derived from `number`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuredInput {
    text: Option<String>,
    number: i32,
    even: bool,
    id: Uuid,
    half: Decimal,
}

impl StructuredInput {
    /// Build an input, deriving `even` and `half` from `number`
    pub fn new(text: Option<String>, number: i32, id: Uuid) -> Self {
        Self {
            text,
            number,
            even: number % 2 == 0,
            id,
            half: half_of(number),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn even(&self) -> bool {
        self.even
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn half(&self) -> Decimal {
        self.half
    }
}

// number * 0.5, exact
fn half_of(number: i32) -> Decimal {
    Decimal::new(i64::from(number) * 5, 1).normalize()
}

/// A short label emitted in the per-iteration log event
pub trait LogLabel {
    fn log_label(&self) -> String;
}

impl LogLabel for StructuredInput {
    fn log_label(&self) -> String {
        group_thousands(i64::from(self.number))
    }
}

macro_rules! impl_log_label_for_ints {
    ($($t:ty),*) => {
        $(
            impl LogLabel for $t {
                fn log_label(&self) -> String {
                    group_thousands(*self as i64)
                }
            }
        )*
    };
}

impl_log_label_for_ints!(i8, i16, i32, i64, u8, u16, u32);

impl LogLabel for String {
    fn log_label(&self) -> String {
        format!("{:?}", self)
    }
}

/// Format an integer with `,` between groups of three digits
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Default generator for [`StructuredInput`]
#[derive(Debug, Clone)]
pub struct StructuredInputGenerator {
    number: IntGenerator<i32>,
    text: OptionGenerator<StringGenerator>,
    id: UuidGenerator,
}

impl StructuredInputGenerator {
    /// `number` in `0..=1024`, arbitrary Unicode text (sometimes absent), random v4 id
    pub fn new() -> Self {
        Self {
            number: IntGenerator::new(0, MAX_NUMBER),
            text: OptionGenerator::new(StringGenerator::unicode(0, 32)),
            id: UuidGenerator,
        }
    }

    /// Draw `number` from a different inclusive range
    pub fn with_number_range(mut self, min: i32, max: i32) -> Self {
        self.number = IntGenerator::new(min, max);
        self
    }
}

impl Default for StructuredInputGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<StructuredInput> for StructuredInputGenerator {
    fn generate(&self, rng: &mut dyn rand::RngCore, config: &GeneratorConfig) -> StructuredInput {
        let number = self.number.generate(rng, config);
        let text = self.text.generate(rng, config);
        let id = self.id.generate(rng, config);
        StructuredInput::new(text, number, id)
    }
}

/// Fixed table of inputs: empty text, nil id, `number` running over `range`
pub fn table_inputs(range: Range<i32>) -> Vec<StructuredInput> {
    range
        .map(|number| StructuredInput::new(Some(String::new()), number, Uuid::nil()))
        .collect()
}
