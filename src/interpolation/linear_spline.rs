//! Piecewise-linear interpolation.
//!
//! Points are sorted ascending by x; each consecutive pair yields one
//! segment y = m*x + b valid on [x1, x2]. A pair sharing the same abscissa
//! produces no segment: the pair is skipped with a warning instead of
//! failing the whole construction (see DESIGN.md for the rationale).

use crate::interpolation::polynomial_fit::{Point, validate_points};
use crate::solvers::trace::SolverError;
use itertools::Itertools;
use log::warn;

/// One linear segment, valid only on [x_start, x_end].
#[derive(Debug, Clone, PartialEq)]
pub struct SplineSegment {
    pub slope: f64,
    pub intercept: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub rendering: String,
}

impl SplineSegment {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn contains(&self, x: f64) -> bool {
        self.x_start <= x && x <= self.x_end
    }
}

/// Builds the linear spline over the given points.
pub fn linear_spline(points: &[Point]) -> Result<Vec<SplineSegment>, SolverError> {
    validate_points(points)?;
    let mut sorted = points.to_vec();
    sorted.sort_by(|p, q| p.x.total_cmp(&q.x));

    let mut segments = Vec::with_capacity(sorted.len() - 1);
    for (i, (p1, p2)) in sorted.iter().tuple_windows().enumerate() {
        if p2.x == p1.x {
            warn!("duplicate x = {} among spline points, segment skipped", p1.x);
            continue;
        }
        let slope = (p2.y - p1.y) / (p2.x - p1.x);
        let intercept = p1.y - slope * p1.x;
        let rendering = format!(
            "S_{}(x) = {:.4}*x {:+.4}  for x in [{}, {}]",
            i, slope, intercept, p1.x, p2.x
        );
        segments.push(SplineSegment {
            slope,
            intercept,
            x_start: p1.x,
            x_end: p2.x,
            rendering,
        });
    }
    Ok(segments)
}
