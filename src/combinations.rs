//! Cartesian product enumeration.

/// Iterates over every index tuple of a Cartesian product.
///
/// Given the lengths of the input lists, yields one `Vec<usize>` per
/// combination in lexicographic order: the leftmost index varies slowest.
/// Any empty list makes the product empty; no lists at all yield a single
/// empty combination.
#[derive(Debug, Clone)]
pub struct CartesianIndices {
    lengths: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl CartesianIndices {
    /// Creates an enumerator over lists of the given lengths.
    #[must_use]
    pub fn new(lengths: Vec<usize>) -> Self {
        let next = (!lengths.contains(&0)).then(|| vec![0; lengths.len()]);
        Self { lengths, next }
    }
}

impl Iterator for CartesianIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        let mut advanced = false;
        for (index, &length) in successor.iter_mut().zip(&self.lengths).rev() {
            *index = index.saturating_add(1);
            if *index < length {
                advanced = true;
                break;
            }
            *index = 0;
        }
        if advanced {
            self.next = Some(successor);
        }
        Some(current)
    }
}
