//! Array-backed binary heap over a caller-supplied order.
//!
//! The heap never looks inside `T`. The order closure `order(a, b)` returns
//! true when `a` must leave the queue before `b`; a min-heap on some key is
//! `|a, b| a.key < b.key`. Ties are not broken here: two elements for which
//! neither comes first leave in whatever order the array layout produces.

#[derive(Clone)]
pub struct PriorityQueue<T, F> {
    elements: Vec<T>,
    order: F,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(order: F) -> Self {
        Self::with_capacity(0, order)
    }

    pub fn with_capacity(capacity: usize, order: F) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            order,
        }
    }

    /// Builds a heap from an arbitrary vector in O(n).
    pub fn from_vec(elements: Vec<T>, order: F) -> Self {
        let mut heap = Self { elements, order };
        for i in (0..heap.elements.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn push(&mut self, element: T) {
        self.elements.push(element);
        self.sift_up(self.elements.len() - 1);
    }

    /// Removes the highest-priority element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let top = self.elements.pop();
        self.sift_down(0);
        top
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !(self.order)(&self.elements[child], &self.elements[parent]) {
                break;
            }
            self.elements.swap(parent, child);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut parent: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * parent + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            // follow the child that comes first
            let child = if right < len && (self.order)(&self.elements[right], &self.elements[left]) {
                right
            } else {
                left
            };

            if !(self.order)(&self.elements[child], &self.elements[parent]) {
                break;
            }
            self.elements.swap(parent, child);
            parent = child;
        }
    }

    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.elements.len()).all(|i| {
            let parent = (i - 1) / 2;
            !(self.order)(&self.elements[i], &self.elements[parent])
        })
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for PriorityQueue<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("elements", &self.elements)
            .finish()
    }
}
