/*!
A max-heap of indicies, ordered by an activity associated with each index.

Every index has an activity, though only some indicies are on the heap at any time.
An index popped from the heap keeps its activity, and may be returned to the heap with [activate](ActivityHeap::activate).

The [oracle](crate::oracle) keeps atoms on the heap in order to decide on the unvalued atom with the greatest activity.

```rust
# use otter_mig::generic::activity_heap::ActivityHeap;
let mut heap = ActivityHeap::with_count(4);
for index in 0..4 {
    heap.activate(index);
}
heap.bump(2, 5.0);
heap.bump(3, 1.0);

assert_eq!(heap.pop_max(), Some(2));
assert_eq!(heap.pop_max(), Some(3));
heap.activate(2);
assert_eq!(heap.pop_max(), Some(2));
```
*/

/// Activities are floats, rescaled when too large.
pub type Activity = f64;

pub struct ActivityHeap {
    activity: Vec<Activity>,
    position: Vec<Option<usize>>,
    heap: Vec<usize>,
}

impl ActivityHeap {
    /// A heap for the indicies `0..count`, each with zero activity and off the heap.
    pub fn with_count(count: usize) -> Self {
        ActivityHeap {
            activity: vec![0.0; count],
            position: vec![None; count],
            heap: Vec::with_capacity(count),
        }
    }

    pub fn activity(&self, index: usize) -> Activity {
        self.activity[index]
    }

    /// Places `index` on the heap, if it is not already on the heap.
    pub fn activate(&mut self, index: usize) {
        if self.position[index].is_none() {
            self.position[index] = Some(self.heap.len());
            self.heap.push(index);
            self.sift_up(self.heap.len() - 1);
        }
    }

    /// Increases the activity of `index` by `amount`.
    pub fn bump(&mut self, index: usize, amount: Activity) {
        self.activity[index] += amount;
        if let Some(position) = self.position[index] {
            self.sift_up(position);
        }
    }

    /// Sets the activity of `index`, restoring the heap property.
    pub fn set_activity(&mut self, index: usize, activity: Activity) {
        let previous = self.activity[index];
        self.activity[index] = activity;
        if let Some(position) = self.position[index] {
            match activity < previous {
                true => self.sift_down(position),
                false => self.sift_up(position),
            }
        }
    }

    /// Multiplies every activity by `factor`.
    ///
    /// As the order of activities is unchanged, so too is the heap.
    pub fn rescale(&mut self, factor: Activity) {
        for activity in &mut self.activity {
            *activity *= factor;
        }
    }

    /// Removes and returns the index with the greatest activity on the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = *self.heap.first()?;
        let last = self.heap.len() - 1;
        self.swap(0, last);
        self.heap.pop();
        self.position[max] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(max)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.activity[self.heap[a]] > self.activity[self.heap[b]]
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            match self.greater(position, parent) {
                true => {
                    self.swap(position, parent);
                    position = parent;
                }
                false => break,
            }
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut largest = position;

            if left < self.heap.len() && self.greater(left, largest) {
                largest = left;
            }
            if right < self.heap.len() && self.greater(right, largest) {
                largest = right;
            }

            match largest == position {
                true => break,
                false => {
                    self.swap(position, largest);
                    position = largest;
                }
            }
        }
    }
}
