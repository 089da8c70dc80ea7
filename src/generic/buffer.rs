/*!
A buffer with a live prefix.

Elements are retired by swapping with the last live element and shrinking the live prefix, so retiring is constant time and the buffer is never reallocated.
The order of live elements is not preserved.

```rust
# use otter_mig::generic::buffer::LiveBuffer;
let mut buffer = LiveBuffer::from(vec![1, 2, 3, 4]);
buffer.retire(1);

assert_eq!(buffer.live(), &[1, 4, 3]);
assert_eq!(buffer.retired(), &[2]);
```
*/

#[derive(Clone, Debug, Default)]
pub struct LiveBuffer<T> {
    elements: Vec<T>,
    live: usize,
}

impl<T> From<Vec<T>> for LiveBuffer<T> {
    fn from(elements: Vec<T>) -> Self {
        LiveBuffer {
            live: elements.len(),
            elements,
        }
    }
}

impl<T> LiveBuffer<T> {
    /// Retires the live element at `index`, moving the last live element to `index`.
    ///
    /// # Panics
    /// If `index` is not the index of a live element.
    pub fn retire(&mut self, index: usize) {
        assert!(index < self.live, "retire beyond the live prefix");
        self.live -= 1;
        self.elements.swap(index, self.live);
    }

    /// Appends a live element, after any retired elements are dropped.
    pub fn push(&mut self, element: T) {
        self.elements.truncate(self.live);
        self.elements.push(element);
        self.live += 1;
    }

    pub fn live(&self) -> &[T] {
        &self.elements[..self.live]
    }

    pub fn live_mut(&mut self) -> &mut [T] {
        &mut self.elements[..self.live]
    }

    pub fn retired(&self) -> &[T] {
        &self.elements[self.live..]
    }

    /// A count of live elements.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The live elements, dropping any retired elements.
    pub fn into_live(mut self) -> Vec<T> {
        self.elements.truncate(self.live);
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retire_all() {
        let mut buffer = LiveBuffer::from(vec!['a', 'b', 'c']);
        while !buffer.is_empty() {
            buffer.retire(0);
        }
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.retired().len(), 3);
    }

    #[test]
    fn push_after_retire() {
        let mut buffer = LiveBuffer::from(vec![1, 2, 3]);
        buffer.retire(2);
        buffer.push(4);
        assert_eq!(buffer.live(), &[1, 2, 4]);
        assert!(buffer.retired().is_empty());
        assert_eq!(buffer.into_live(), vec![1, 2, 4]);
    }
}
