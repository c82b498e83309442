use heurist::{
    corrective::{
        AnnealingFunction, CorrectiveProcedure, DecayOptions, ResultMode,
        ThresholdSinkingFunction,
    },
    problem::Solution,
    rng::RandomNumberGenerator,
    tsp::{
        InitialTspSolutionConstructor, SwapMutation, TravelingSalesmanProblem, TspSolution,
        REFERENCE_DISTANCE,
    },
    InitialSolutionConstructor, Result,
};

const MAX_ITERATIONS: u64 = 2_000_000;
const ATTEMPTS: u64 = 3;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

fn random_tour(seed: u64) -> TspSolution {
    let mut constructor = InitialTspSolutionConstructor::new(TravelingSalesmanProblem::new());
    let mut rng = RandomNumberGenerator::from_seed(seed);
    constructor.initial_solution(&mut rng).unwrap()
}

fn solved_or_exhausted(current: &TspSolution, iterations: u64, _accepted: u64) -> bool {
    iterations >= MAX_ITERATIONS || current.total_distance() <= REFERENCE_DISTANCE
}

fn threshold_accepting_from(initial: TspSolution, seed: u64) -> TspSolution {
    let sinking = ThresholdSinkingFunction::from_options(DecayOptions::default()).unwrap();
    let mut procedure = CorrectiveProcedure::threshold_accepting(
        move |_rng: &mut RandomNumberGenerator| -> Result<TspSolution> { Ok(initial.clone()) },
        SwapMutation,
        solved_or_exhausted,
        sinking,
        |_: f64| false,
        RandomNumberGenerator::from_seed(seed),
    )
    .unwrap();

    let best = procedure.run(ResultMode::TotalBest).unwrap();
    assert!(procedure.number_of_iterations() <= MAX_ITERATIONS);
    assert_eq!(procedure.threshold(), 25_000.0);
    best
}

fn simulated_annealing_from(initial: TspSolution, seed: u64) -> TspSolution {
    let annealing = AnnealingFunction::from_options(DecayOptions::annealing()).unwrap();
    let mut procedure = CorrectiveProcedure::simulated_annealing(
        move |_rng: &mut RandomNumberGenerator| -> Result<TspSolution> { Ok(initial.clone()) },
        SwapMutation,
        solved_or_exhausted,
        annealing,
        |_: f64| false,
        RandomNumberGenerator::from_seed(seed),
    )
    .unwrap();

    let best = procedure.run(ResultMode::TotalBest).unwrap();
    assert!(procedure.number_of_iterations() <= MAX_ITERATIONS);
    assert_eq!(procedure.temperature(), 2_000.0);
    best
}

#[test]
fn test_threshold_accepting_and_annealing_reach_reference() {
    init_tracing();

    for attempt in 0..ATTEMPTS {
        let initial = random_tour(attempt);

        let threshold_best = threshold_accepting_from(initial.clone(), 100 + attempt);
        assert!(
            threshold_best.total_distance() <= REFERENCE_DISTANCE,
            "threshold accepting from tour {} ended at {}",
            attempt,
            threshold_best.representation()
        );

        let annealing_best = simulated_annealing_from(initial, 200 + attempt);
        assert!(
            annealing_best.total_distance() <= REFERENCE_DISTANCE,
            "simulated annealing from tour {} ended at {}",
            attempt,
            annealing_best.representation()
        );
    }
}

#[test]
fn test_last_result_is_current_solution() {
    init_tracing();

    let initial = random_tour(7);
    let initial_distance = initial.total_distance();
    let sinking = ThresholdSinkingFunction::new(1.0, 0.5, 1).unwrap();
    let mut procedure = CorrectiveProcedure::threshold_accepting(
        move |_rng: &mut RandomNumberGenerator| -> Result<TspSolution> { Ok(initial.clone()) },
        SwapMutation,
        |_: &TspSolution, iterations: u64, _: u64| iterations >= 5_000,
        sinking,
        |_: f64| false,
        RandomNumberGenerator::from_seed(1),
    )
    .unwrap();

    let last = procedure.run(ResultMode::Last).unwrap();
    let accepted_last_run = procedure.accepted_iterations();
    let best = procedure.run(ResultMode::TotalBest).unwrap();

    // A tiny threshold only lets improvements and near-ties through.
    assert!(last.total_distance() <= initial_distance);
    assert!(accepted_last_run > 0);
    assert!(best.fitness() >= -(initial_distance as f64));
    assert_eq!(procedure.number_of_iterations(), 5_000);
}

#[test]
fn test_temperature_break_ends_run_early() {
    init_tracing();

    let initial = random_tour(3);
    let annealing = AnnealingFunction::new(10.0, 0.5, 1).unwrap();
    let mut procedure = CorrectiveProcedure::simulated_annealing(
        move |_rng: &mut RandomNumberGenerator| -> Result<TspSolution> { Ok(initial.clone()) },
        SwapMutation,
        solved_or_exhausted,
        annealing,
        |temperature: f64| temperature < 1e-3,
        RandomNumberGenerator::from_seed(3),
    )
    .unwrap();

    procedure.run(ResultMode::Last).unwrap();

    assert!(procedure.number_of_iterations() < MAX_ITERATIONS);
    assert_eq!(procedure.temperature(), 10.0);
}
