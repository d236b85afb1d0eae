//! Invoice codes.
//!
//! Codes are random, so uniqueness is enforced by the `orders.invoice_code`
//! constraint and the order writer retries on a collision.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::RangeInclusive,
};

use mockall::automock;
use rand::{Rng, thread_rng};

/// Prefix on every invoice code.
pub const INVOICE_CODE_PREFIX: &str = "INV-";

/// Range the numeric part is drawn from; always exactly ten digits.
pub const INVOICE_NUMBER_RANGE: RangeInclusive<u64> = 1_000_000_000..=9_999_999_999;

/// Attempts made before an order gives up on finding a free code.
pub const MAX_INVOICE_CODE_ATTEMPTS: usize = 5;

/// Human-readable order reference, `INV-` followed by ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceCode(String);

impl InvoiceCode {
    /// Build a code from its numeric part.
    ///
    /// Returns `None` when the number is not ten digits long.
    #[must_use]
    pub fn from_number(number: u64) -> Option<Self> {
        INVOICE_NUMBER_RANGE
            .contains(&number)
            .then(|| Self(format!("{INVOICE_CODE_PREFIX}{number}")))
    }

    /// Wrap a code read back from storage.
    #[must_use]
    pub fn from_stored(code: String) -> Self {
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for InvoiceCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Source of candidate invoice codes.
#[automock]
pub trait InvoiceCodeGenerator: Send + Sync {
    /// Produce a fresh candidate code. Collisions are possible.
    fn generate(&self) -> InvoiceCode;
}

/// Draws the numeric part uniformly from [`INVOICE_NUMBER_RANGE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInvoiceCodes;

impl InvoiceCodeGenerator for RandomInvoiceCodes {
    fn generate(&self) -> InvoiceCode {
        let number = thread_rng().gen_range(INVOICE_NUMBER_RANGE);

        InvoiceCode(format!("{INVOICE_CODE_PREFIX}{number}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(code: &InvoiceCode) -> bool {
        code.as_str()
            .strip_prefix(INVOICE_CODE_PREFIX)
            .is_some_and(|digits| {
                digits.len() == 10
                    && digits.bytes().all(|b| b.is_ascii_digit())
                    && !digits.starts_with('0')
            })
    }

    #[test]
    fn random_codes_are_prefixed_ten_digit_numbers() {
        let generator = RandomInvoiceCodes;

        for _ in 0..1_000 {
            let code = generator.generate();

            assert!(is_well_formed(&code), "malformed invoice code {code}");
        }
    }

    #[test]
    fn from_number_accepts_range_bounds() {
        assert_eq!(
            InvoiceCode::from_number(1_000_000_000).map(InvoiceCode::into_string),
            Some("INV-1000000000".to_string())
        );
        assert_eq!(
            InvoiceCode::from_number(9_999_999_999).map(InvoiceCode::into_string),
            Some("INV-9999999999".to_string())
        );
    }

    #[test]
    fn from_number_rejects_wrong_digit_counts() {
        assert!(InvoiceCode::from_number(999_999_999).is_none(), "nine digits");
        assert!(InvoiceCode::from_number(10_000_000_000).is_none(), "eleven digits");
    }
}
