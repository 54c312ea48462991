use leptos::prelude::*;
use std::rc::Rc;

/// Something that shows a busy indicator while requests are in flight.
pub trait LoadingFlag {
    fn begin(&self);
    fn end(&self);
}

/// Calls `end` when dropped, so every `begin` is balanced even on early return.
pub struct LoadingGuard {
    flag: Rc<dyn LoadingFlag>,
}

impl LoadingGuard {
    pub fn new(flag: Rc<dyn LoadingFlag>) -> Self {
        flag.begin();
        Self { flag }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.end();
    }
}

/// Counts in-flight requests for one page.
#[derive(Clone, Copy)]
pub struct LoadingCounter {
    count: RwSignal<usize>,
}

impl LoadingCounter {
    pub fn new() -> Self {
        Self {
            count: RwSignal::new(0),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.count.get() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.count.get_untracked()
    }
}

impl Default for LoadingCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingFlag for LoadingCounter {
    fn begin(&self) {
        self.count.update(|c| *c += 1);
    }

    fn end(&self) {
        self.count.update(|c| *c = c.saturating_sub(1));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub(crate) struct CountingFlag {
        pub current: Cell<usize>,
        pub peak: Cell<usize>,
        pub begins: Cell<usize>,
    }

    impl LoadingFlag for CountingFlag {
        fn begin(&self) {
            self.current.set(self.current.get() + 1);
            self.begins.set(self.begins.get() + 1);
            self.peak.set(self.peak.get().max(self.current.get()));
        }

        fn end(&self) {
            self.current.set(self.current.get().saturating_sub(1));
        }
    }

    #[test]
    fn guard_balances_begin_and_end() {
        let flag = Rc::new(CountingFlag::default());
        {
            let _outer = LoadingGuard::new(flag.clone());
            let _inner = LoadingGuard::new(flag.clone());
            assert_eq!(flag.current.get(), 2);
        }
        assert_eq!(flag.current.get(), 0);
        assert_eq!(flag.peak.get(), 2);
    }
}
