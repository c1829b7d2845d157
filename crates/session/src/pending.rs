use std::collections::BTreeMap;

use crate::message::MessageId;

/// In-flight deferred replies keyed by the user message that triggered them.
///
/// Generic over the task handle so the UI can store executor tasks and tests can store plain
/// markers. Entries leave the registry when their reply is delivered or when explicitly
/// cancelled; nothing else removes them.
#[derive(Debug)]
pub struct PendingReplies<T> {
    tasks: BTreeMap<MessageId, T>,
}

impl<T> PendingReplies<T> {
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
        }
    }

    /// Registers `task` for `trigger`, returning any task it replaced.
    pub fn insert(&mut self, trigger: MessageId, task: T) -> Option<T> {
        let replaced = self.tasks.insert(trigger, task);
        if replaced.is_some() {
            tracing::warn!(trigger = trigger.0, "replaced an in-flight reply task");
        }
        replaced
    }

    pub fn contains(&self, trigger: MessageId) -> bool {
        self.tasks.contains_key(&trigger)
    }

    /// Removes the entry once its reply has been appended.
    pub fn complete(&mut self, trigger: MessageId) -> Option<T> {
        self.tasks.remove(&trigger)
    }

    /// Removes the entry without delivering; dropping the returned handle stops the task.
    pub fn cancel(&mut self, trigger: MessageId) -> Option<T> {
        let task = self.tasks.remove(&trigger);
        if task.is_some() {
            tracing::debug!(trigger = trigger.0, "cancelled pending reply");
        }
        task
    }

    pub fn cancel_all(&mut self) -> Vec<T> {
        std::mem::take(&mut self.tasks).into_values().collect()
    }

    pub fn triggers(&self) -> impl Iterator<Item = MessageId> + '_ {
        self.tasks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for PendingReplies<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_by_trigger() {
        let mut pending = PendingReplies::new();
        pending.insert(MessageId::new(2), "a");
        pending.insert(MessageId::new(4), "b");

        assert_eq!(pending.complete(MessageId::new(2)), Some("a"));
        assert_eq!(pending.complete(MessageId::new(2)), None);
        assert_eq!(pending.triggers().collect::<Vec<_>>(), vec![MessageId::new(4)]);
    }

    #[test]
    fn cancel_all_drains_everything() {
        let mut pending = PendingReplies::new();
        for raw in 1..=3 {
            pending.insert(MessageId::new(raw), raw);
        }

        assert_eq!(pending.cancel_all(), vec![1, 2, 3]);
        assert!(pending.is_empty());
        assert!(!pending.contains(MessageId::new(1)));
    }
}
