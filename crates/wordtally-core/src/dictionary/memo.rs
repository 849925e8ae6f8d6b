use std::cell::OnceCell;

/// A lazily computed value that is thrown away whenever its source changes.
///
/// Reads go through `&self` and fill the cell on first use. Invalidation
/// needs `&mut self`, so a cached value can never be observed after the
/// mutation that made it stale.
#[derive(Debug, Clone)]
pub(crate) struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub(crate) const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached value, computing it with `f` on a miss.
    pub(crate) fn get_or_compute(&self, f: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(f)
    }

    /// Drop the cached value.
    pub(crate) fn invalidate(&mut self) {
        self.cell.take();
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn computes_once_until_invalidated() {
        let calls = Cell::new(0);
        let mut memo = Memo::new();

        let compute = || {
            calls.set(calls.get() + 1);
            calls.get() * 10
        };
        assert_eq!(*memo.get_or_compute(compute), 10);
        assert_eq!(*memo.get_or_compute(compute), 10);
        assert_eq!(calls.get(), 1);

        memo.invalidate();
        assert!(!memo.is_cached());
        assert_eq!(*memo.get_or_compute(compute), 20);
        assert_eq!(calls.get(), 2);
    }
}
