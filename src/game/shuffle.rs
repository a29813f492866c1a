use rand::seq::SliceRandom;

/// Returns a uniformly random permutation of `items`, leaving the input
/// untouched. Used for seating order, the fresh deck and reshuffles.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(&mut rand::rng());
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let input: Vec<u32> = (0..200).collect();
        let output = shuffled(&input);

        assert_eq!(output.len(), input.len());
        let mut sorted = output.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn input_is_left_unmodified() {
        let input: Vec<u32> = (0..50).collect();
        let before = input.clone();
        let _ = shuffled(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let output: Vec<u32> = shuffled(&[]);
        assert!(output.is_empty());
    }
}
