//! Caller-supplied cost table.

use std::collections::HashMap;

use super::DistanceModel;
use crate::error::{Result, RoutingError};
use crate::models::Location;

/// A [`DistanceModel`] backed by an explicit n×n table keyed by location id.
///
/// Costs may be asymmetric; [`DistanceModel::is_symmetric`] reports what the
/// table actually contains. Coordinates of the priced locations are ignored.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{CostMatrix, DistanceModel};
/// use u_tour::models::Location;
///
/// let cm = CostMatrix::new(
///     vec!["A".into(), "B".into()],
///     vec![0.0, 7.0,
///          9.0, 0.0],
/// ).unwrap();
/// let a = Location::new("A", 0.0, 0.0).unwrap();
/// let b = Location::new("B", 0.0, 0.0).unwrap();
/// assert_eq!(cm.cost(&a, &b), 7.0);
/// assert_eq!(cm.cost(&b, &a), 9.0);
/// assert!(!cm.is_symmetric());
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    index: HashMap<String, usize>,
    ids: Vec<String>,
    data: Vec<f64>,
    symmetric: bool,
}

impl CostMatrix {
    /// Creates a cost table over `ids` from row-major `data`.
    ///
    /// Fails if `data.len() != ids.len()²`, if an id repeats, or if any
    /// entry is negative or non-finite.
    pub fn new(ids: Vec<String>, data: Vec<f64>) -> Result<Self> {
        let n = ids.len();
        if data.len() != n * n {
            return Err(RoutingError::InvalidConfig(format!(
                "cost matrix over {n} ids needs {} entries, got {}",
                n * n,
                data.len()
            )));
        }
        let mut index = HashMap::with_capacity(n);
        for (i, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(RoutingError::DuplicateLocationId(id.clone()));
            }
        }
        for i in 0..n {
            for j in 0..n {
                let c = data[i * n + j];
                if !c.is_finite() || c < 0.0 {
                    return Err(RoutingError::InvalidCost {
                        from: ids[i].clone(),
                        to: ids[j].clone(),
                        cost: c,
                    });
                }
            }
        }
        let symmetric = (0..n).all(|i| (i + 1..n).all(|j| data[i * n + j] == data[j * n + i]));
        Ok(Self {
            index,
            ids,
            data,
            symmetric,
        })
    }

    /// Ids covered by this table, in row order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Cost between two ids, or `None` if either is unknown.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        let i = *self.index.get(from)?;
        let j = *self.index.get(to)?;
        Some(self.data[i * self.ids.len() + j])
    }
}

impl DistanceModel for CostMatrix {
    /// Looks up the table entry.
    ///
    /// Unknown ids price as NaN; [`DistanceModel::validate`] reports them
    /// before any algorithm runs.
    fn cost(&self, from: &Location, to: &Location) -> f64 {
        self.get(from.id(), to.id()).unwrap_or(f64::NAN)
    }

    fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    fn validate(&self, locations: &[Location]) -> Result<()> {
        if let Some(missing) = locations.iter().find(|l| !self.index.contains_key(l.id())) {
            let other = locations
                .iter()
                .find(|l| l.id() != missing.id())
                .unwrap_or(missing);
            return Err(RoutingError::MissingCost {
                from: missing.id().to_string(),
                to: other.id().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_valid() {
        let cm = CostMatrix::new(ids(&["A", "B"]), vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(cm.get("A", "B"), Some(5.0));
        assert_eq!(cm.get("A", "Z"), None);
        assert!(cm.is_symmetric());
        assert_eq!(cm.ids(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_new_wrong_size() {
        assert!(matches!(
            CostMatrix::new(ids(&["A", "B"]), vec![0.0, 1.0, 2.0]),
            Err(RoutingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_duplicate_id() {
        assert!(matches!(
            CostMatrix::new(ids(&["A", "A"]), vec![0.0; 4]),
            Err(RoutingError::DuplicateLocationId(_))
        ));
    }

    #[test]
    fn test_new_negative_cost() {
        assert!(matches!(
            CostMatrix::new(ids(&["A", "B"]), vec![0.0, -1.0, 1.0, 0.0]),
            Err(RoutingError::InvalidCost { .. })
        ));
    }

    #[test]
    fn test_validate_missing_id() {
        let cm = CostMatrix::new(ids(&["A", "B"]), vec![0.0, 1.0, 1.0, 0.0]).expect("valid");
        let locs = vec![
            Location::new("A", 0.0, 0.0).expect("valid"),
            Location::new("C", 0.0, 0.0).expect("valid"),
        ];
        match cm.validate(&locs) {
            Err(RoutingError::MissingCost { from, to }) => {
                assert_eq!(from, "C");
                assert_eq!(to, "A");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_cost_ignores_coordinates() {
        let cm = CostMatrix::new(ids(&["A", "B"]), vec![0.0, 3.0, 3.0, 0.0]).expect("valid");
        let a = Location::new("A", 100.0, 100.0).expect("valid");
        let b = Location::new("B", -100.0, 0.0).expect("valid");
        assert_eq!(cm.cost(&a, &b), 3.0);
    }
}
