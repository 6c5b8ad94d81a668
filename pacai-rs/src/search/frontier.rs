use std::collections::VecDeque;

/// The nodes waiting to be expanded by an uninformed graph search
pub trait Frontier<T> {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last in first out, for depth first search
#[derive(Debug)]
pub struct Stack<T>(Vec<T>);

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Frontier<T> for Stack<T> {
    fn push(&mut self, item: T) {
        self.0.push(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// First in first out, for breadth first search
#[derive(Debug)]
pub struct Queue<T>(VecDeque<T>);

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self(VecDeque::new())
    }
}

impl<T> Frontier<T> for Queue<T> {
    fn push(&mut self, item: T) {
        self.0.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<u8>>(mut frontier: F) -> Vec<u8> {
        for i in 1..=3 {
            frontier.push(i);
        }
        assert_eq!(frontier.len(), 3);

        std::iter::from_fn(|| frontier.pop()).collect()
    }

    #[test]
    fn test_stack_is_lifo() {
        assert_eq!(drain(Stack::default()), vec![3, 2, 1]);
    }

    #[test]
    fn test_queue_is_fifo() {
        assert_eq!(drain(Queue::default()), vec![1, 2, 3]);
    }
}
