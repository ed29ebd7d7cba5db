//! Decoding solver models back into vertex orderings

use super::HamiltonianPath;
use crate::error::DecodingError;
use crate::sat::{varnum, Model, VariableEncoding, VariableType};

/// Read the vertex at each position 1..=n out of the model.
///
/// Exactly one vertex must be true per position and no vertex may appear twice.
/// True variables beyond n² are ignored.
pub fn decode_path(n: usize, model: &Model) -> Result<HamiltonianPath, DecodingError> {
    let encoding = VariableEncoding::new(n);
    let mut occupants: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for var in model.true_variables() {
        if let Some(VariableType::Placement { vertex, position }) = encoding.decode(var) {
            occupants[position].push(vertex);
        }
    }

    let mut placed_at = vec![0usize; n + 1];
    let mut vertices = Vec::with_capacity(n);

    for (position, candidates) in occupants.into_iter().enumerate().skip(1) {
        let vertex = match candidates[..] {
            [vertex] => vertex,
            [] => return Err(DecodingError::UnfilledPosition { position }),
            _ => {
                return Err(DecodingError::AmbiguousPosition {
                    position,
                    vertices: candidates,
                })
            }
        };

        if placed_at[vertex] != 0 {
            return Err(DecodingError::RepeatedVertex {
                vertex,
                first: placed_at[vertex],
                second: position,
            });
        }
        placed_at[vertex] = position;
        vertices.push(vertex);
    }

    Ok(HamiltonianPath::new(vertices))
}

/// The model asserting exactly `path[i-1]` at position i, everything else false
pub fn path_to_model(path: &HamiltonianPath) -> Model {
    let n = path.len();
    Model::from_true_variables(
        path.vertices
            .iter()
            .enumerate()
            .map(|(idx, &v)| varnum(v, idx + 1, n)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed_model() {
        let path = HamiltonianPath::new(vec![3, 1, 4, 2]);
        let decoded = decode_path(4, &path_to_model(&path)).unwrap();
        assert_eq!(decoded, path);
    }

    #[test]
    fn test_decode_reads_position_not_vertex_order() {
        // vertex 2 at position 1, vertex 1 at position 2
        let model = Model::from_true_variables([varnum(2, 1, 2), varnum(1, 2, 2)]);
        assert_eq!(decode_path(2, &model).unwrap().vertices, vec![2, 1]);
    }

    #[test]
    fn test_decode_single_vertex() {
        let model = Model::from_true_variables([1]);
        assert_eq!(decode_path(1, &model).unwrap().vertices, vec![1]);
    }

    #[test]
    fn test_unfilled_position() {
        let model = Model::from_true_variables([varnum(1, 1, 3), varnum(2, 2, 3)]);
        assert_eq!(
            decode_path(3, &model).unwrap_err(),
            DecodingError::UnfilledPosition { position: 3 }
        );
    }

    #[test]
    fn test_ambiguous_position() {
        let model = Model::from_true_variables([varnum(1, 1, 2), varnum(2, 1, 2), varnum(2, 2, 2)]);
        assert_eq!(
            decode_path(2, &model).unwrap_err(),
            DecodingError::AmbiguousPosition { position: 1, vertices: vec![1, 2] }
        );
    }

    #[test]
    fn test_repeated_vertex() {
        let model = Model::from_true_variables([varnum(2, 1, 3), varnum(1, 2, 3), varnum(2, 3, 3)]);
        assert_eq!(
            decode_path(3, &model).unwrap_err(),
            DecodingError::RepeatedVertex { vertex: 2, first: 1, second: 3 }
        );
    }

    #[test]
    fn test_foreign_variables_are_ignored() {
        let path = HamiltonianPath::new(vec![2, 1]);
        let mut literals: Vec<i32> = path_to_model(&path).true_variables().collect();
        literals.push(99);
        let decoded = decode_path(2, &Model::from_true_variables(literals)).unwrap();
        assert_eq!(decoded, path);
    }
}
