//! Synthetic number generation
//!
//! Codes are visited round-robin in table order. Each number is the area
//! code followed by uniformly random digits. A candidate that starts with a
//! longer code extending the chosen one would resolve to that other area, so
//! its padding is redrawn until it does not, up to a retry cap.

use dialplan_core::{AreaCode, AreaCodeIndex, ConfigurationError, MAX_TOTAL_LENGTH};
use rand::Rng;

/// Records between progress events
const PROGRESS_INTERVAL: u64 = 100_000;

/// Default cap on padding redraws for a single number
pub const DEFAULT_MAX_RETRIES: u32 = 10_000;

/// One generated phone number and the area it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRecord {
    /// Fixed-length digit string
    pub phone_number: String,

    /// Display name of the area
    pub area: String,

    /// Area code the number was generated for
    pub area_code: String,
}

/// Lazy, fallible sequence of generated records
///
/// Yields `Err` at most once; the sequence ends after an error.
pub struct NumberGenerator<'a, R> {
    index: &'a AreaCodeIndex,
    rng: R,
    total_count: u64,
    total_length: usize,
    max_retries: u32,
    produced: u64,
    redraws: u64,
    failed: bool,
}

impl<'a, R: Rng> NumberGenerator<'a, R> {
    /// Prepare a generator for `total_count` numbers of `total_length` digits
    ///
    /// Fails if `total_length` exceeds [`MAX_TOTAL_LENGTH`], if any code is
    /// not strictly shorter than `total_length`, or if numbers are requested
    /// from an empty index.
    pub fn new(
        index: &'a AreaCodeIndex,
        total_count: u64,
        total_length: usize,
        rng: R,
    ) -> Result<Self, ConfigurationError> {
        if total_length > MAX_TOTAL_LENGTH {
            return Err(ConfigurationError::InvalidSetting {
                name: "total length",
                reason: format!("{} digits is more than the maximum of {}", total_length, MAX_TOTAL_LENGTH),
            });
        }

        if let Some(code) = index.iter().find(|code| code.len() >= total_length) {
            return Err(ConfigurationError::LengthTooShort {
                code: code.code().to_string(),
                code_len: code.len(),
                total_length,
            });
        }

        if index.is_empty() && total_count > 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "area codes",
                reason: "no area codes to generate numbers for".to_string(),
            });
        }

        Ok(Self {
            index,
            rng,
            total_count,
            total_length,
            max_retries: DEFAULT_MAX_RETRIES,
            produced: 0,
            redraws: 0,
            failed: false,
        })
    }

    /// Override the per-number redraw cap
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Candidates discarded because they collided with a longer code
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Draw padding for `code` until the number is not shadowed
    fn draw_number(&mut self, code: &AreaCode) -> Result<String, ConfigurationError> {
        let padding_len = self.total_length - code.len();
        let mut number = String::with_capacity(self.total_length);

        for attempt in 0..self.max_retries {
            number.clear();
            number.push_str(code.code());
            for _ in 0..padding_len {
                number.push(char::from(b'0' + self.rng.random_range(0..10u8)));
            }

            if !code.is_shadowed(&number) {
                return Ok(number);
            }

            self.redraws += 1;
            tracing::trace!(code = code.code(), attempt, number = %number, "padding collided with a longer code");
        }

        Err(ConfigurationError::RetriesExhausted {
            code: code.code().to_string(),
            attempts: self.max_retries,
        })
    }
}

impl<R: Rng> Iterator for NumberGenerator<'_, R> {
    type Item = Result<GeneratedRecord, ConfigurationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.produced >= self.total_count {
            return None;
        }

        let index = self.index;
        let code = &index.codes()[(self.produced % index.len() as u64) as usize];

        match self.draw_number(code) {
            Ok(phone_number) => {
                self.produced += 1;
                if self.produced % PROGRESS_INTERVAL == 0 {
                    tracing::debug!(
                        produced = self.produced,
                        total = self.total_count,
                        redraws = self.redraws,
                        "generating phone numbers"
                    );
                }

                Some(Ok(GeneratedRecord {
                    phone_number,
                    area: code.area_name().to_string(),
                    area_code: code.code().to_string(),
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (self.total_count - self.produced) as usize;
        (0, Some(remaining))
    }
}

/// Generate `total_count` numbers of `total_length` digits from `index`
pub fn generate<R: Rng>(
    index: &AreaCodeIndex,
    total_count: u64,
    total_length: usize,
    rng: R,
) -> Result<NumberGenerator<'_, R>, ConfigurationError> {
    NumberGenerator::new(index, total_count, total_length, rng)
}
