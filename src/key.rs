/// A key into a keyed container.
///
/// `#[derive(Codable)]` emits one key enumeration per type, covering every
/// persistable field name and every distinct nesting-path segment; the enum
/// implements this trait. Plain string slices implement it too, for manual
/// container access.
pub trait CodingKey: Copy {
    /// The literal key string backing this key.
    fn as_str(&self) -> &'static str;
}

impl CodingKey for &'static str {
    #[inline]
    fn as_str(&self) -> &'static str {
        self
    }
}
