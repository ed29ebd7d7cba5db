//! Variable encoding for the permutation-matrix formulation

/// Variable id for "vertex `v` occupies path position `i`" in an `n`-vertex graph.
///
/// Bijection from [1,n]×[1,n] onto [1,n²]. Every clause and every decoding step goes
/// through this function.
#[inline]
pub fn varnum(v: usize, i: usize, n: usize) -> i32 {
    debug_assert!((1..=n).contains(&v) && (1..=n).contains(&i));
    ((v - 1) * n + i) as i32
}

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Vertex `vertex` sits at path position `position`
    Placement { vertex: usize, position: usize },
}

/// The n² placement variables of one graph, grouped by row and column
#[derive(Debug, Clone, Copy)]
pub struct VariableEncoding {
    n: usize,
}

impl VariableEncoding {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Inverse of [`varnum`]
    pub fn decode(&self, var: i32) -> Option<VariableType> {
        if var < 1 || var as usize > self.variable_count() {
            return None;
        }
        let offset = var as usize - 1;
        Some(VariableType::Placement {
            vertex: offset / self.n + 1,
            position: offset % self.n + 1,
        })
    }

    /// Variables of every vertex at one position, ordered by vertex
    pub fn variables_at_position(&self, position: usize) -> Vec<i32> {
        (1..=self.n).map(|v| varnum(v, position, self.n)).collect()
    }

    /// Variables of one vertex at every position, ordered by position
    pub fn variables_of_vertex(&self, vertex: usize) -> Vec<i32> {
        (1..=self.n).map(|i| varnum(vertex, i, self.n)).collect()
    }

    /// Total number of variables (n²)
    pub fn variable_count(&self) -> usize {
        self.n * self.n
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_varnum_formula() {
        assert_eq!(varnum(1, 1, 4), 1);
        assert_eq!(varnum(1, 4, 4), 4);
        assert_eq!(varnum(2, 1, 4), 5);
        assert_eq!(varnum(4, 4, 4), 16);
        assert_eq!(varnum(1, 1, 1), 1);
    }

    #[test]
    fn test_varnum_is_bijection() {
        for n in 1..=12 {
            let ids: HashSet<i32> = (1..=n)
                .flat_map(|v| (1..=n).map(move |i| varnum(v, i, n)))
                .collect();

            assert_eq!(ids.len(), n * n);
            assert_eq!(ids.iter().min().copied(), Some(1));
            assert_eq!(ids.iter().max().copied(), Some((n * n) as i32));
        }
    }

    #[test]
    fn test_decode_inverts_varnum() {
        let encoding = VariableEncoding::new(5);
        for v in 1..=5 {
            for i in 1..=5 {
                assert_eq!(
                    encoding.decode(varnum(v, i, 5)),
                    Some(VariableType::Placement { vertex: v, position: i })
                );
            }
        }
        assert_eq!(encoding.decode(0), None);
        assert_eq!(encoding.decode(26), None);
        assert_eq!(encoding.decode(-3), None);
    }

    #[test]
    fn test_rows_and_columns() {
        let encoding = VariableEncoding::new(3);
        assert_eq!(encoding.variables_at_position(2), vec![2, 5, 8]);
        assert_eq!(encoding.variables_of_vertex(2), vec![4, 5, 6]);
    }
}
