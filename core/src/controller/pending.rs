//! Pending delete index shared between "prepare delete" and "confirm delete"

/// Row staged for deletion, awaiting confirmation
///
/// Holds at most one index. Staging a new row overwrites the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingDelete {
    index: Option<u32>,
}

impl PendingDelete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `index`, replacing anything already staged
    pub fn set(&mut self, index: u32) {
        self.index = Some(index);
    }

    pub fn get(&self) -> Option<u32> {
        self.index
    }

    /// Read and clear in one step
    pub fn take(&mut self) -> Option<u32> {
        self.index.take()
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    pub fn is_set(&self) -> bool {
        self.index.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let pending = PendingDelete::new();
        assert!(!pending.is_set());
        assert_eq!(pending.get(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut pending = PendingDelete::new();
        pending.set(3);
        pending.set(8);
        assert_eq!(pending.get(), Some(8));
    }

    #[test]
    fn test_take_clears() {
        let mut pending = PendingDelete::new();
        pending.set(5);
        assert_eq!(pending.take(), Some(5));
        assert_eq!(pending.take(), None);

        pending.set(1);
        pending.clear();
        assert!(!pending.is_set());
    }
}
