use std::cmp::{max, min};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Page window over an unpaginated sequence. Pages are 1-based.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    page_size: Option<usize>,
    page: usize,
}

impl Pagination {
    /// A `page_size` of zero disables pagination.
    pub fn new(page_size: usize, page: usize) -> Self {
        Pagination {
            page_size: (page_size > 0).then_some(page_size),
            page: max(page, 1),
        }
    }

    pub fn none() -> Self {
        Pagination::default()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn is_paginated(&self) -> bool {
        self.page_size.is_some()
    }

    pub fn page(&self) -> usize {
        if self.is_paginated() {
            max(self.page, 1)
        } else {
            1
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = max(page, 1);
    }

    /// Zero for an empty paginated sequence, otherwise at least one.
    pub fn page_count(&self, total: usize) -> usize {
        match self.page_size {
            Some(size) => total.div_ceil(size),
            None => 1,
        }
    }

    /// Pulls the current page into `[1, max(1, page_count)]`.
    pub fn clamp(&mut self, total: usize) {
        let last = max(self.page_count(total), 1);
        self.page = min(max(self.page, 1), last);
    }

    /// Clamps the page, then copies out its window.
    pub fn window<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        match self.page_size {
            Some(size) => {
                self.clamp(items.len());
                let begin = min((self.page - 1) * size, items.len());
                let end = min(self.page * size, items.len());
                items[begin..end].to_vec()
            }
            None => items.to_vec(),
        }
    }

    /// Page holding the item at `idx` of the unpaginated sequence.
    pub fn page_of(&self, idx: usize) -> usize {
        match self.page_size {
            Some(size) => idx / size + 1,
            None => 1,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
