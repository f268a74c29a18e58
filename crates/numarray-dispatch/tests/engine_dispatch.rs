//! End-to-end dispatch through the default engine

mod common;

use common::*;
use num_complex::Complex64;
use numarray_core::{Error, NumericArray, Representation, Shape};
use numarray_kernels::Operation;
use std::sync::Arc;

#[test]
fn test_sparse_rdivide_dense_keeps_pattern() {
    let engine = engine();
    let s = NumericArray::sparse(vec![0, 1, 2], vec![0, 1], vec![4.0, 8.0], 2, 2).unwrap();
    let d = NumericArray::dense(vec![2.0, 5.0, 3.0, 2.0], 2, 2).unwrap();

    match engine.apply(Operation::Rdivide, &[&s, &d]).unwrap() {
        NumericArray::RealSparse(q) => {
            assert_eq!(q.col_ptr(), &[0, 1, 2]);
            assert_eq!(q.row_idx(), &[0, 1]);
            assert_eq!(q.data(), &[2.0, 4.0]);
        }
        other => panic!("Expected real sparse, got {other:?}"),
    }
}

#[test]
fn test_single_sparse_rdivide_dense_is_dense() {
    let engine = engine();
    let six = NumericArray::sparse(vec![0, 1], vec![0], vec![6.0], 1, 1).unwrap();
    let d = NumericArray::dense(vec![1.0, 3.0, 2.0, 4.0], 2, 2).unwrap();

    let q = engine.apply(Operation::Rdivide, &[&six, &d]).unwrap();
    let expected = NumericArray::dense(vec![6.0, 2.0, 3.0, 1.5], 2, 2).unwrap();
    assert_eq!(q.representation(), Representation::RealDense);
    assert_arrays_close(&q, &expected);
}

#[test]
fn test_random_sparse_over_scalar() {
    let engine = engine();
    let mut rng = rng();
    for _ in 0..20 {
        let s = random_sparse(&mut rng, 6, 5, 0.3);
        let k = 2.5;
        let q = engine
            .apply(Operation::Rdivide, &[&NumericArray::from(s.clone()), &NumericArray::from(k)])
            .unwrap();
        match q {
            NumericArray::RealSparse(q) => {
                assert_eq!(q.col_ptr(), s.col_ptr());
                assert_eq!(q.row_idx(), s.row_idx());
                for (a, b) in q.data().iter().zip(s.data()) {
                    assert_relative_eq!(*a, b / k);
                }
            }
            other => panic!("Expected real sparse, got {other:?}"),
        }
    }
}

#[test]
fn test_atanh_promotes_whole_array() {
    let engine = engine();
    let inside = NumericArray::dense(vec![0.5, -0.3, 0.2], 1, 3).unwrap();
    let r = engine.apply(Operation::Atanh, &[&inside]).unwrap();
    assert_eq!(r.representation(), Representation::RealDense);

    let outside = NumericArray::dense(vec![0.5, 2.0], 1, 2).unwrap();
    let r = engine.apply(Operation::Atanh, &[&outside]).unwrap();
    assert_eq!(r.representation(), Representation::ComplexDense);
    let first = r.get(0, 0).unwrap();
    assert_relative_eq!(first.re, 0.5f64.atanh(), epsilon = 1e-12);
    assert_relative_eq!(first.im, 0.0, epsilon = 1e-12);
    let second = r.get(0, 1).unwrap();
    assert_relative_eq!(second.re, Complex64::new(2.0, 0.0).atanh().re, epsilon = 1e-12);
    assert_relative_eq!(second.im.abs(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_mixed_domain_operands_are_widened() {
    let engine = engine();
    let mut rng = rng();
    let s = random_sparse(&mut rng, 4, 4, 0.5);
    let i = NumericArray::from(Complex64::new(0.0, 1.0));

    let r = engine.apply(Operation::Times, &[&NumericArray::from(s.clone()), &i]).unwrap();
    assert_eq!(r.representation(), Representation::ComplexSparse);
    for (row, col, v) in s.iter() {
        assert_eq!(r.get(row, col), Some(Complex64::new(0.0, v)));
    }

    let resolution = engine
        .resolve(Operation::Times, &[Representation::RealSparse, Representation::ComplexScalar])
        .unwrap();
    assert_eq!(
        resolution.target().operands,
        vec![Representation::ComplexSparse, Representation::ComplexScalar]
    );
}

#[test]
fn test_concatenation_across_representations() {
    let engine = engine();
    let mut rng = rng();
    let d = NumericArray::from(random_dense(&mut rng, 3, 2, (-1.0, 1.0)));
    let s = NumericArray::from(random_sparse(&mut rng, 3, 4, 0.4).to_complex());

    let h = engine.apply(Operation::Horzcat, &[&d, &s]).unwrap();
    assert_eq!(h.shape(), Shape::new(3, 6));
    assert_eq!(h.representation(), Representation::ComplexSparse);
    assert_eq!(h.get(2, 1), d.get(2, 1));
    assert_eq!(h.get(0, 5), s.get(0, 3));

    match engine.apply(Operation::Vertcat, &[&d, &s]) {
        Err(Error::DimensionMismatch { operation, .. }) => assert_eq!(operation, "vertcat"),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_transpose_then_full() {
    let engine = engine();
    let mut rng = rng();
    let s = NumericArray::from(random_sparse(&mut rng, 5, 3, 0.4));
    let t = engine.apply(Operation::Transpose, &[&s]).unwrap();
    let f = engine.apply(Operation::Full, &[&t]).unwrap();
    assert_eq!(f.representation(), Representation::RealDense);
    assert_eq!(f.shape(), Shape::new(3, 5));
    for r in 0..5 {
        for c in 0..3 {
            assert_eq!(f.get(c, r), s.get(r, c));
        }
    }
}

#[test]
fn test_convert_and_unsupported_paths() {
    let engine = engine();
    let d = NumericArray::dense(vec![1.0, 2.0], 1, 2).unwrap();
    let c = engine.convert(&d, Representation::ComplexDense).unwrap();
    assert_eq!(c.get(0, 1), Some(Complex64::new(2.0, 0.0)));

    // dense to sparse is the `sparse` operation, never an implicit conversion
    assert!(matches!(
        engine.convert(&d, Representation::RealSparse),
        Err(Error::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        engine.convert(&c, Representation::RealDense),
        Err(Error::UnsupportedOperation { .. })
    ));
}

#[test]
fn test_null_operands() {
    let engine = engine();
    let a = NumericArray::from(1.0);
    match engine.apply(Operation::Minus, &[]) {
        Err(Error::NullOperand { position, .. }) => assert_eq!(position, 1),
        other => panic!("Unexpected result: {other:?}"),
    }
    match engine.apply_nullable(Operation::Minus, &[Some(&a), None]) {
        Err(Error::NullOperand { operation, position }) => {
            assert_eq!(operation, "minus");
            assert_eq!(position, 2);
        }
        other => panic!("Unexpected result: {other:?}"),
    }
    assert!(engine.apply_nullable(Operation::Uminus, &[Some(&a)]).is_ok());
}

#[test]
fn test_check_finite_single_offender() {
    let engine = engine();
    let mut rng = rng();
    let mut d = random_dense(&mut rng, 4, 3, (-5.0, 5.0)).into_data();
    assert!(engine.check_finite(&NumericArray::dense(d.clone(), 4, 3).unwrap()).is_ok());

    d[2 * 4 + 1] = f64::NEG_INFINITY;
    match engine.check_finite(&NumericArray::dense(d, 4, 3).unwrap()) {
        Err(Error::NonFiniteResult { row, col }) => assert_eq!((row, col), (1, 2)),
        other => panic!("Unexpected result: {other:?}"),
    }
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = Arc::new(engine());
    let d = Arc::new(NumericArray::dense(vec![1.0, 4.0, 9.0, 16.0], 2, 2).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let d = Arc::clone(&d);
            std::thread::spawn(move || engine.apply(Operation::Sqrt, &[&d]))
        })
        .collect();

    for handle in handles {
        let r = handle.join().unwrap().unwrap();
        assert_eq!(r.get(1, 1).map(|z| z.re), Some(4.0));
    }
}

#[test]
fn test_sqrt_of_tall_sparse_keeps_pattern() {
    let engine = engine();
    // 2^62 x 8 with one stored entry; its element count overflows usize
    let rows = 1usize << 62;
    let col_ptr = vec![0, 1, 1, 1, 1, 1, 1, 1, 1];
    let tall = NumericArray::sparse(col_ptr, vec![3], vec![4.0], rows, 8).unwrap();

    match engine.apply(Operation::Sqrt, &[&tall]).unwrap() {
        NumericArray::RealSparse(r) => {
            assert_eq!(r.shape(), Shape::new(rows, 8));
            assert_eq!(r.row_idx(), &[3]);
            assert_eq!(r.data(), &[2.0]);
        }
        other => panic!("Expected real sparse, got {other:?}"),
    }
    match engine.apply(Operation::Full, &[&tall]) {
        Err(Error::InvalidArray(_)) => {}
        other => panic!("Unexpected result: {other:?}"),
    }
}
