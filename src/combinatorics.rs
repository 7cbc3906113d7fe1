/// All orderings of `elements`, in lexicographic order of their positions.
///
/// `[a, b, c]` yields `abc, acb, bac, bca, cab, cba`; an empty slice yields a
/// single empty ordering.
pub fn permutations<T: Copy>(elements: &[T]) -> Vec<Vec<T>> {
    let mut result = Vec::with_capacity(factorial(elements.len()));
    let mut used = vec![false; elements.len()];
    let mut current = Vec::with_capacity(elements.len());
    permutations_helper(elements, &mut used, &mut current, &mut result);
    result
}

fn permutations_helper<T: Copy>(
    elements: &[T],
    used: &mut [bool],
    current: &mut Vec<T>,
    result: &mut Vec<Vec<T>>,
) {
    if current.len() == elements.len() {
        result.push(current.clone());
        return;
    }

    for i in 0..elements.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(elements[i]);
        permutations_helper(elements, used, current, result);
        current.pop();
        used[i] = false;
    }
}

pub fn factorial(n: usize) -> usize {
    (1..=n).product()
}
