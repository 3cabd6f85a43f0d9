/// Order-preserving de-duplication for slices. The first occurrence of each
/// element is kept.
pub trait DedupExt<T> {
    /// Drops every element for which `duplicate(kept, candidate)` returns
    /// `true` against an element already kept.
    fn filter_duplicates_by<F>(&self, duplicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T, &T) -> bool;

    fn filter_duplicates(&self) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        self.filter_duplicates_by(|kept, candidate| kept == candidate)
    }
}

impl<T> DedupExt<T> for [T] {
    fn filter_duplicates_by<F>(&self, mut duplicate: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T, &T) -> bool,
    {
        // Only equality is available, so this stays quadratic.
        let mut kept: Vec<&T> = Vec::with_capacity(self.len());
        for candidate in self {
            if !kept.iter().any(|k| duplicate(k, candidate)) {
                kept.push(candidate);
            }
        }
        kept.into_iter().cloned().collect()
    }
}

pub trait ContainsAll<T> {
    /// `true` when every element of `elements` occurs in `self`. An empty
    /// query is always contained.
    fn contains_all(&self, elements: &[T]) -> bool;
}

impl<T: PartialEq> ContainsAll<T> for [T] {
    fn contains_all(&self, elements: &[T]) -> bool {
        elements.iter().all(|element| self.contains(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_occurrence_in_order() {
        let items = [3, 1, 3, 2, 1, 4];
        assert_eq!(items.filter_duplicates(), vec![3, 1, 2, 4]);
    }

    #[test]
    fn custom_predicate_compares_against_kept() {
        let words = vec!["Apple", "avocado", "banana", "Blueberry", "cherry"];
        let by_initial = words.filter_duplicates_by(|a, b| {
            a.chars().next().map(|c| c.to_ascii_lowercase())
                == b.chars().next().map(|c| c.to_ascii_lowercase())
        });
        assert_eq!(by_initial, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn empty_input_stays_empty() {
        let empty: [u8; 0] = [];
        assert!(empty.filter_duplicates().is_empty());
    }

    #[test]
    fn contains_all_checks_every_element() {
        assert!([1, 2, 3, 4, 5].contains_all(&[1, 2]));
        assert!(!vec![1.2, 2.3, 4.5, 3.4].contains_all(&[2.3, 6.0]));
        assert!(["h", "e", "l", "l", "o"].contains_all(&["l", "o"]));
    }

    #[test]
    fn empty_query_is_contained() {
        let haystack: Vec<i32> = Vec::new();
        assert!(haystack.contains_all(&[]));
    }
}
