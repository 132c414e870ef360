//! # Storefront Phone
//!
//! Turns loosely formatted phone numbers into the digit strings WhatsApp
//! expects, using a static table of international calling codes.
//!
//! ```
//! use storefront_phone::PhoneNormalizer;
//!
//! let phone = PhoneNormalizer::new();
//! assert_eq!(phone.format_for_whatsapp("+225 07 00 00 00 00"), "2250700000000");
//! assert_eq!(phone.detect_calling_code("00221770000000").unwrap().as_str(), "+221");
//! assert!(!phone.validate("12 34 56").valid);
//! ```

mod calling_codes;
mod normalizer;

pub use calling_codes::{CALLING_CODES, CallingCodeEntry};
pub use normalizer::{
    CallingCode, DoubleZeroPolicy, MAX_DIGITS, MIN_DIGITS, PhoneError, PhoneNormalizer,
    Validation, clean,
};
