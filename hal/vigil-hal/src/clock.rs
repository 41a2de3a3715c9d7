//! Monotonic time source

/// Millisecond clock that never goes backwards
pub trait Monotonic {
    /// Milliseconds elapsed since an arbitrary fixed origin (usually boot)
    fn now_ms(&self) -> u64;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
