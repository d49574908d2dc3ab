//! Longest-common-subsequence line alignment.

/// Alignment step between two line sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Keep,
    Remove,
    Add,
}

/// Align `old` against `new`.
///
/// Common prefix and suffix are matched directly; the middle is aligned
/// with a suffix LCS table. When a line could be removed or added first,
/// removal wins, so a replaced line shows as `-old` then `+new`.
pub(super) fn align<T: PartialEq>(old: &[T], new: &[T]) -> Vec<Step> {
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let a = &old[prefix..old.len() - suffix];
    let b = &new[prefix..new.len() - suffix];

    let mut steps = vec![Step::Keep; prefix];
    steps.extend(align_middle(a, b));
    steps.extend(std::iter::repeat_n(Step::Keep, suffix));
    steps
}

fn align_middle<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Step> {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    // table[i * width + j] = LCS length of a[i..] and b[j..]
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            steps.push(Step::Keep);
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            steps.push(Step::Remove);
            i += 1;
        } else {
            steps.push(Step::Add);
            j += 1;
        }
    }
    steps.extend(std::iter::repeat_n(Step::Remove, n - i));
    steps.extend(std::iter::repeat_n(Step::Add, m - j));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_is_all_keep() {
        assert_eq!(align(&[1, 2, 3], &[1, 2, 3]), vec![Step::Keep; 3]);
    }

    #[test]
    fn empty_sides() {
        assert_eq!(align::<u8>(&[], &[]), vec![]);
        assert_eq!(align(&[], &[1, 2]), vec![Step::Add, Step::Add]);
        assert_eq!(align(&[1], &[]), vec![Step::Remove]);
    }

    #[test]
    fn replacement_removes_then_adds() {
        assert_eq!(
            align(&["a", "x", "c"], &["a", "y", "c"]),
            vec![Step::Keep, Step::Remove, Step::Add, Step::Keep]
        );
    }

    #[test]
    fn moved_block_keeps_longest_run() {
        let steps = align(&[1, 2, 3, 4], &[3, 4, 1, 2]);
        let kept = steps.iter().filter(|s| **s == Step::Keep).count();
        assert_eq!(kept, 2);
    }
}
