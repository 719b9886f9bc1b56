//! Console collaborator seam.

/// The terminal the reserved handles 0 and 1 talk to.
///
/// `read_char` blocks until one byte is available; it never blocks past
/// that. `write_bytes` makes no atomicity promise of its own — callers on
/// the standard-output path hold the File-System Gate around it.
pub trait Console: Send + Sync {
    fn read_char(&self) -> u8;
    fn write_bytes(&self, buf: &[u8]);
}
