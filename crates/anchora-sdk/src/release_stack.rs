// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scope-exit release of acquired resources.

use std::fmt;

/// A stack of release actions run in reverse acquisition order.
///
/// Every acquired resource pushes its release right after acquisition.
/// [`unwind`](Self::unwind) runs them last-in first-out; dropping the stack
/// unwinds whatever is left, which covers early returns and cancelled futures.
#[derive(Default)]
pub struct ReleaseStack {
    entries: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl ReleaseStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the release of a resource just acquired.
    pub fn push(&mut self, label: &'static str, release: impl FnOnce() + 'static) {
        log::debug!("Acquired {}.", label);
        self.entries.push((label, Box::new(release)));
    }

    /// Number of pending releases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every pending release, most recent first.
    pub fn unwind(&mut self) {
        while let Some((label, release)) = self.entries.pop() {
            log::debug!("Releasing {}.", label);
            release();
        }
    }
}

impl Drop for ReleaseStack {
    fn drop(&mut self) {
        self.unwind();
    }
}

impl fmt::Debug for ReleaseStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(label, _)| label))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_unwind_runs_in_reverse_order_once() {
        let (log, make) = recorder();
        let mut stack = ReleaseStack::new();
        stack.push("render host", make("render host"));
        stack.push("tracking session", make("tracking session"));
        stack.push("object pool", make("object pool"));
        assert_eq!(stack.len(), 3);

        stack.unwind();
        stack.unwind();
        drop(stack);

        assert_eq!(
            *log.borrow(),
            vec!["object pool", "tracking session", "render host"]
        );
    }

    #[test]
    fn test_drop_unwinds_pending_entries() {
        let (log, make) = recorder();
        {
            let mut stack = ReleaseStack::new();
            stack.push("a", make("a"));
            stack.push("b", make("b"));
        }
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }
}
