//! Facade-level integration tests

mod common;

use num_complex::Complex64;
use numarray::prelude::*;

#[test]
fn test_verbose_engine_starts() -> anyhow::Result<()> {
    common::init_tracing();
    let engine = Engine::new(EngineConfig::default().with_verbose(true))?;
    assert_eq!(engine.registry().len(), 217);
    assert_eq!(engine.converter_graph().edges().len(), 10);
    // every binary operation resolves every pair of representations
    assert!(engine.resolver().len() >= 4 * 36);
    Ok(())
}

#[test]
fn test_config_from_json_drives_checking() -> anyhow::Result<()> {
    common::init_tracing();
    let json = r#"{ "check_results": true, "execution": "sequential" }"#;
    let config = EngineConfig::from_json(json)?;
    let engine = Engine::new(config)?;

    let d = NumericArray::dense(vec![1.0, -1.0, 0.5], 3, 1)?;
    let ok = engine.apply(Operation::Sqrt, &[&d])?;
    assert_eq!(ok.domain(), Domain::Complex);

    let zero = NumericArray::from(0.0);
    match engine.apply(Operation::Rdivide, &[&d, &zero]) {
        Err(Error::NonFiniteResult { row, col }) => assert_eq!((row, col), (0, 0)),
        other => panic!("Unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_scalar_numbers_as_operands() -> anyhow::Result<()> {
    let engine = Engine::new(EngineConfig::default())?;
    let r = engine.apply(Operation::Plus, &[&2.0.into(), &Complex64::new(1.0, 1.0).into()])?;
    assert_eq!(r, NumericArray::from(Complex64::new(3.0, 1.0)));
    Ok(())
}

#[test]
fn test_named_operations_match_enum() -> anyhow::Result<()> {
    let engine = Engine::new(EngineConfig::default())?;
    let x = NumericArray::dense(vec![0.1, 0.2, 0.3, 0.4], 2, 2)?;
    for op in Operation::ALL.iter().filter(|op| op.arity() == 1) {
        let by_name = engine.apply_named(op.name(), &[&x])?;
        let by_enum = engine.apply(*op, &[&x])?;
        assert_eq!(by_name, by_enum, "{op}");
    }
    Ok(())
}

#[test]
fn test_sparse_round_trip_through_operations() -> anyhow::Result<()> {
    let engine = Engine::new(EngineConfig::default())?;
    let d = NumericArray::dense(vec![0.0, 3.0, 0.0, 0.0, 5.0, 0.0], 3, 2)?;
    let s = engine.apply(Operation::Sparse, &[&d])?;
    assert_eq!(s.representation(), Representation::RealSparse);
    let back = engine.apply(Operation::Full, &[&s])?;
    assert_eq!(back, d);
    Ok(())
}

#[test]
fn test_rosser_is_available() -> anyhow::Result<()> {
    let engine = Engine::new(EngineConfig::default())?;
    let r = engine.apply(Operation::Rosser, &[])?;
    assert_eq!(r.shape(), Shape::new(8, 8));
    assert_eq!(r.get(0, 0).map(|z| z.re), Some(611.0));
    Ok(())
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parallel_and_sequential_agree() -> anyhow::Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (rows, cols) = (64, 48);
        let a: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let b: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(1.0..10.0)).collect();
        let a = NumericArray::dense(a, rows, cols)?;
        let b = NumericArray::dense(b, rows, cols)?;

        let sequential =
            Engine::new(EngineConfig::default().with_execution(ExecutionStrategy::Sequential))?;
        let parallel = Engine::new(
            EngineConfig::default()
                .with_execution(ExecutionStrategy::Parallel)
                .with_parallel_threshold(0),
        )?;
        assert!(parallel.config().execution_context().is_parallel_for(rows * cols));

        let s = sequential.apply(Operation::Rdivide, &[&a, &b])?;
        let p = parallel.apply(Operation::Rdivide, &[&a, &b])?;
        for c in 0..cols {
            for r in 0..rows {
                let (x, y) = (s.get(r, c).unwrap(), p.get(r, c).unwrap());
                assert_relative_eq!(x.re, y.re);
            }
        }
        Ok(())
    }
}
