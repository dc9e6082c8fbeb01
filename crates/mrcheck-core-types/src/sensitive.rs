//! Sensitive data marker for automatic redaction
//!
//! Payload sources are usually secrets. Wrapping their bytes in
//! `Sensitive<T>` keeps them out of `Debug`/`Display` output, and therefore
//! out of logs and assertion messages.

use std::fmt;

/// Wrapper that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use mrcheck_core_types::Sensitive;
///
/// let blob = Sensitive::new(b"password: hunter2".to_vec());
/// assert_eq!(format!("{:?}", blob), "***REDACTED***");
/// assert_eq!(blob.expose().len(), 17);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    ///
    /// Only the decompressor should need this.
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}
