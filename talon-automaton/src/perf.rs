// Quick release mode performance check
//
// Run with: cargo test --release -p talon-automaton automaton_perf -- --ignored

#[cfg(test)]
mod perf_tests {
    use crate::Automaton;
    use std::time::Instant;

    #[test]
    #[ignore] // Run with: cargo test --release automaton_perf -- --ignored
    fn automaton_perf() {
        let mut automaton = Automaton::new();
        for i in 0..100 {
            automaton.insert(&format!("pattern_{}", i)).unwrap();
        }
        automaton.build();

        // Warmup
        for _ in 0..10000 {
            let _ = automaton.search("pattern_42");
        }

        // Benchmark
        let iterations = 1_000_000;
        let start = Instant::now();
        for _ in 0..iterations {
            let _ = automaton.search("pattern_42");
        }
        let duration = start.elapsed();
        let ns_per_op = duration.as_nanos() / iterations;

        println!("\n=== Release Mode Automaton Performance ===");
        println!("Iterations: {}", iterations);
        println!("Total time: {:?}", duration);
        println!("Per operation: {} ns", ns_per_op);
        println!("Throughput: {:.2} M ops/sec", (iterations as f64 / duration.as_secs_f64()) / 1_000_000.0);

        // Assertion for minimum performance
        assert!(ns_per_op < 1000, "Search should be fast in release mode, got {} ns/op", ns_per_op);
    }
}
