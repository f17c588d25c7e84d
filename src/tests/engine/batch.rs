use crate::engine::ExecutionEngine;
use crate::error::ConfigError;

#[test]
fn test_batches_keep_order() {
    let engine = ExecutionEngine::new(4).unwrap();
    let items: Vec<u32> = (0..250).collect();

    let sums = engine
        .process_batches(&items, 100, |batch: &[u32]| {
            Ok::<_, String>(batch.iter().sum::<u32>())
        })
        .unwrap();

    let expected: Vec<u32> = vec![
        (0..100).sum(),
        (100..200).sum(),
        (200..250).sum(),
    ];
    assert_eq!(sums, expected);
}

#[test]
fn test_single_batch_runs_inline() {
    let engine = ExecutionEngine::new(4).unwrap();
    let items = vec![1, 2, 3];
    let caller = std::thread::current().id();

    let results = engine
        .process_batches(&items, 100, |batch: &[i32]| {
            Ok::<_, String>((std::thread::current().id(), batch.len()))
        })
        .unwrap();

    assert_eq!(results, vec![(caller, 3)]);
}

#[test]
fn test_failed_and_panicking_batches_are_dropped() {
    let engine = ExecutionEngine::new(2).unwrap();
    let items: Vec<usize> = (0..40).collect();

    let firsts = engine
        .process_batches(&items, 10, |batch: &[usize]| match batch[0] {
            10 => Err("bad batch".to_string()),
            20 => panic!("batch exploded"),
            first => Ok(first),
        })
        .unwrap();

    assert_eq!(firsts, vec![0, 30]);
}

#[test]
fn test_batch_edge_cases() {
    let engine = ExecutionEngine::default();
    let items: Vec<u8> = Vec::new();

    let empty = engine
        .process_batches(&items, 100, |_: &[u8]| Ok::<_, String>(1))
        .unwrap();
    assert!(empty.is_empty());

    assert_eq!(
        engine
            .process_batches(&[1u8], 0, |_: &[u8]| Ok::<_, String>(1))
            .unwrap_err(),
        ConfigError::InvalidBatchSize
    );
}
