use crate::{
    error::{OptimizationError, Result},
    problem::Solution,
};

use super::{City, TravelingSalesmanProblem};

/// A closed tour over all cities of a [`TravelingSalesmanProblem`].
///
/// The round-trip distance is computed once at construction. Deserialization goes
/// through [`TspSolution::new`], so a stored tour is validated again and its distance
/// is recomputed rather than read back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TspSolutionRepr")
)]
pub struct TspSolution {
    problem: TravelingSalesmanProblem,
    cities: Vec<City>,
    total_distance: u32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TspSolutionRepr {
    problem: TravelingSalesmanProblem,
    cities: Vec<City>,
}

#[cfg(feature = "serde")]
impl TryFrom<TspSolutionRepr> for TspSolution {
    type Error = OptimizationError;

    fn try_from(repr: TspSolutionRepr) -> Result<Self> {
        Self::new(repr.problem, repr.cities)
    }
}

impl TspSolution {
    /// Creates a tour visiting `cities` in order and returning to the first one.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizationError::IllegalSolution`] unless `cities` holds every city
    /// exactly once.
    pub fn new(problem: TravelingSalesmanProblem, cities: Vec<City>) -> Result<Self> {
        if cities.len() != City::COUNT {
            return Err(OptimizationError::IllegalSolution(format!(
                "Solution has to contain all {} cities, got {}",
                City::COUNT,
                cities.len()
            )));
        }

        let mut seen = [false; City::COUNT];
        for city in &cities {
            seen[city.index()] = true;
        }
        if let Some(missing) = City::ALL.iter().find(|city| !seen[city.index()]) {
            return Err(OptimizationError::IllegalSolution(format!(
                "Solution did not contain: {}",
                missing
            )));
        }

        let total_distance = Self::round_trip(&problem, &cities);
        Ok(Self {
            problem,
            cities,
            total_distance,
        })
    }

    fn round_trip(problem: &TravelingSalesmanProblem, cities: &[City]) -> u32 {
        let legs: u32 = cities
            .windows(2)
            .map(|leg| problem.distance(leg[0], leg[1]))
            .sum();
        match (cities.first(), cities.last()) {
            (Some(&first), Some(&last)) => legs + problem.distance(last, first),
            _ => legs,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn total_distance(&self) -> u32 {
        self.total_distance
    }
}

impl Solution for TspSolution {
    type Problem = TravelingSalesmanProblem;

    fn problem(&self) -> &TravelingSalesmanProblem {
        &self.problem
    }

    fn fitness(&self) -> f64 {
        -(self.total_distance as f64)
    }

    /// Renders the tour as `[A -> B -> ... -> M, distance]`.
    fn representation(&self) -> String {
        let route = self
            .cities
            .iter()
            .map(|city| city.name())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("[{}, {}]", route, self.total_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::{REFERENCE_DISTANCE, REFERENCE_TOUR};

    #[test]
    fn test_reference_tour() {
        let tour =
            TspSolution::new(TravelingSalesmanProblem::new(), REFERENCE_TOUR.to_vec()).unwrap();

        assert_eq!(tour.total_distance(), REFERENCE_DISTANCE);
        assert_eq!(tour.fitness(), -(REFERENCE_DISTANCE as f64));
        assert_eq!(tour.cities(), &REFERENCE_TOUR);
    }

    #[test]
    fn test_closing_edge_counts() {
        let tour = TspSolution::new(TravelingSalesmanProblem::new(), City::ALL.to_vec()).unwrap();

        let problem = TravelingSalesmanProblem::new();
        let open: u32 = City::ALL
            .windows(2)
            .map(|leg| problem.distance(leg[0], leg[1]))
            .sum();
        assert_eq!(
            tour.total_distance(),
            open + problem.distance(City::Canberra, City::Beijing)
        );
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let problem = TravelingSalesmanProblem::new();
        let mut rotated = REFERENCE_TOUR.to_vec();
        rotated.rotate_left(5);
        let tour = TspSolution::new(problem, rotated).unwrap();

        assert_eq!(tour.total_distance(), REFERENCE_DISTANCE);
    }

    #[test]
    fn test_wrong_length() {
        let result = TspSolution::new(TravelingSalesmanProblem::new(), City::ALL[..12].to_vec());
        assert!(matches!(
            result,
            Err(OptimizationError::IllegalSolution(message)) if message.contains("all 13 cities")
        ));
    }

    #[test]
    fn test_duplicate_city() {
        let mut cities = City::ALL.to_vec();
        cities[3] = City::Beijing;

        let result = TspSolution::new(TravelingSalesmanProblem::new(), cities);
        assert!(matches!(
            result,
            Err(OptimizationError::IllegalSolution(message)) if message.contains("MOSCOW")
        ));
    }

    #[test]
    fn test_representation() {
        let tour =
            TspSolution::new(TravelingSalesmanProblem::new(), REFERENCE_TOUR.to_vec()).unwrap();
        let text = tour.representation();

        assert!(text.starts_with("[DUBLIN -> LONDON -> PARIS"));
        assert!(text.ends_with("WASHINGTON_DC -> OTTAWA, 45811]"));
    }
}
