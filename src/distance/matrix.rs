//! Dense distance matrix.

use super::{checked_cost, DistanceModel};
use crate::error::Result;
use crate::models::Location;

/// A dense n×n table of model costs stored in row-major order.
///
/// Row and column `i` correspond to `locations[i]` of the slice the matrix
/// was built from. Construction evaluates the model n² times and rejects
/// any negative or non-finite cost, so lookups never return NaN.
///
/// # Examples
///
/// ```
/// use u_tour::models::Location;
/// use u_tour::distance::{DistanceMatrix, Euclidean};
///
/// let locations = vec![
///     Location::new("Depot", 0.0, 0.0).unwrap(),
///     Location::new("C1", 3.0, 4.0).unwrap(),
///     Location::new("C2", 6.0, 8.0).unwrap(),
/// ];
/// let dm = DistanceMatrix::from_model(&locations, &Euclidean).unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Evaluates `model` for every ordered pair of `locations`.
    ///
    /// Symmetric models are evaluated once per unordered pair.
    pub fn from_model<M>(locations: &[Location], model: &M) -> Result<Self>
    where
        M: DistanceModel + ?Sized,
    {
        model.validate(locations)?;
        let n = locations.len();
        let symmetric = model.is_symmetric();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j && symmetric {
                    continue;
                }
                if symmetric && j < i {
                    data[i * n + j] = data[j * n + i];
                    continue;
                }
                data[i * n + j] = checked_cost(model, &locations[i], &locations[j])?;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Returns the cost from index `from` to index `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the candidate nearest to `from`.
    ///
    /// Ties go to the candidate that appears first in `candidates`.
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbour(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Cost of visiting `order` in sequence, closing back to the start if `closed`.
    pub fn path_cost(&self, order: &[usize], closed: bool) -> f64 {
        let mut total: f64 = order.windows(2).map(|w| self.get(w[0], w[1])).sum();
        if closed && order.len() > 1 {
            total += self.get(order[order.len() - 1], order[0]);
        }
        total
    }
}
