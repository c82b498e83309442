//! # Traveling Salesman
//!
//! A fixed 13-city symmetric traveling salesman instance used to exercise every
//! engine in the crate.
//!
//! A tour visits each city exactly once and returns to its start. Its fitness is the
//! negated round-trip distance, so shorter tours are fitter.
//!
//! ## Example
//!
//! ```rust
//! use heurist::problem::Solution;
//! use heurist::tsp::{TravelingSalesmanProblem, TspSolution, REFERENCE_TOUR, REFERENCE_DISTANCE};
//!
//! let problem = TravelingSalesmanProblem::new();
//! let tour = TspSolution::new(problem, REFERENCE_TOUR.to_vec()).unwrap();
//!
//! assert_eq!(tour.total_distance(), REFERENCE_DISTANCE);
//! assert_eq!(tour.fitness(), -45_811.0);
//! ```

pub mod operators;
pub mod solution;

use std::fmt;

use crate::problem::{OptimizationProblem, ProblemType};

pub use operators::{BlockCrossover, InitialTspSolutionConstructor, SwapMutation};
pub use solution::TspSolution;

/// The cities of the instance, in distance-matrix order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum City {
    Beijing,
    NewDelhi,
    Tokyo,
    Moscow,
    London,
    Berlin,
    Madrid,
    Rome,
    Paris,
    Dublin,
    Ottawa,
    WashingtonDc,
    Canberra,
}

impl City {
    pub const COUNT: usize = 13;

    pub const ALL: [City; City::COUNT] = [
        City::Beijing,
        City::NewDelhi,
        City::Tokyo,
        City::Moscow,
        City::London,
        City::Berlin,
        City::Madrid,
        City::Rome,
        City::Paris,
        City::Dublin,
        City::Ottawa,
        City::WashingtonDc,
        City::Canberra,
    ];

    /// Row and column of this city in the distance matrix.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            City::Beijing => "BEIJING",
            City::NewDelhi => "NEW_DELHI",
            City::Tokyo => "TOKYO",
            City::Moscow => "MOSCOW",
            City::London => "LONDON",
            City::Berlin => "BERLIN",
            City::Madrid => "MADRID",
            City::Rome => "ROME",
            City::Paris => "PARIS",
            City::Dublin => "DUBLIN",
            City::Ottawa => "OTTAWA",
            City::WashingtonDc => "WASHINGTON_DC",
            City::Canberra => "CANBERRA",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Great-circle distances in kilometers. Symmetric with a zero diagonal.
const DISTANCES: [[u32; City::COUNT]; City::COUNT] = [
    [0, 3784, 2095, 5800, 8150, 7366, 9233, 8134, 8226, 8292, 10463, 11158, 9018],
    [3784, 0, 5844, 4347, 6719, 5787, 7282, 5923, 6594, 7086, 11351, 12059, 10365],
    [2095, 5844, 0, 7487, 9569, 8926, 10774, 9864, 9723, 9595, 10333, 10916, 7961],
    [5800, 4347, 7487, 0, 2503, 1611, 3444, 2378, 2489, 2798, 7166, 7830, 14498],
    [8150, 6719, 9569, 2503, 0, 933, 1265, 1435, 344, 464, 5367, 5904, 17001],
    [7366, 5787, 8926, 1611, 933, 0, 1871, 1184, 878, 1318, 6135, 6718, 16084],
    [9233, 7282, 10774, 3444, 1265, 1871, 0, 1366, 1054, 1453, 5696, 6095, 17593],
    [8134, 5923, 9864, 2378, 1435, 1184, 1366, 0, 1107, 1888, 6737, 7225, 16235],
    [8226, 6594, 9723, 2489, 344, 878, 1054, 1107, 0, 782, 5655, 6172, 16939],
    [8292, 7086, 9595, 2798, 464, 1318, 1453, 1888, 782, 0, 4905, 5448, 17256],
    [10463, 11351, 10333, 7166, 5367, 6135, 5696, 6737, 5655, 4905, 0, 734, 16126],
    [11158, 12059, 10916, 7830, 5904, 6718, 6095, 7225, 6172, 5448, 734, 0, 15962],
    [9018, 10365, 7961, 14498, 17001, 16084, 17593, 16235, 16939, 17256, 16126, 15962, 0],
];

/// A known short tour of the instance.
pub const REFERENCE_TOUR: [City; City::COUNT] = [
    City::Dublin,
    City::London,
    City::Paris,
    City::Madrid,
    City::Rome,
    City::Berlin,
    City::Moscow,
    City::NewDelhi,
    City::Beijing,
    City::Tokyo,
    City::Canberra,
    City::WashingtonDc,
    City::Ottawa,
];

/// Round-trip distance of [`REFERENCE_TOUR`]. Runs that reach it count as solved.
pub const REFERENCE_DISTANCE: u32 = 45_811;

/// The 13-city instance. Minimization of the round-trip distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelingSalesmanProblem;

impl TravelingSalesmanProblem {
    pub fn new() -> Self {
        Self
    }

    pub fn distance(&self, from: City, to: City) -> u32 {
        DISTANCES[from.index()][to.index()]
    }
}

impl OptimizationProblem for TravelingSalesmanProblem {
    fn problem_type(&self) -> ProblemType {
        ProblemType::Minimization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_is_symmetric() {
        let problem = TravelingSalesmanProblem::new();
        for a in City::ALL {
            assert_eq!(problem.distance(a, a), 0);
            for b in City::ALL {
                assert_eq!(problem.distance(a, b), problem.distance(b, a), "{} {}", a, b);
            }
        }
    }

    #[test]
    fn test_all_in_matrix_order() {
        for (index, city) in City::ALL.iter().enumerate() {
            assert_eq!(city.index(), index);
        }
        assert_eq!(City::NewDelhi.to_string(), "NEW_DELHI");
        assert_eq!(
            TravelingSalesmanProblem::new().problem_type(),
            ProblemType::Minimization
        );
    }

    #[test]
    fn test_known_distances() {
        let problem = TravelingSalesmanProblem::new();
        assert_eq!(problem.distance(City::London, City::Paris), 344);
        assert_eq!(problem.distance(City::Ottawa, City::WashingtonDc), 734);
        assert_eq!(problem.distance(City::Rome, City::Canberra), 16235);
    }
}
