use core::sync::atomic::{AtomicU32, Ordering};

/// Completion flag shared between the main routine and the trap handler.
///
/// The write happens behind a control transfer the compiler cannot see, so
/// the value lives in an atomic rather than a plain `static mut`.
pub struct CompletionFlag(AtomicU32);

impl CompletionFlag {
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn set(&self) {
        self.0.store(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.get() == 1
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear_and_sets_to_one() {
        let flag = CompletionFlag::new();
        assert_eq!(flag.get(), 0);
        assert!(!flag.is_set());
        flag.set();
        flag.set();
        assert_eq!(flag.get(), 1);
        assert!(flag.is_set());
    }
}
