//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios              # Run all tests
//!   cargo run --bin test-scenarios -- scoring/  # Run category
//!   cargo run --bin test-scenarios -- bonus/forced_draw  # Run single test
//!   cargo run --bin test-scenarios -- --verbose # Show details on failure

use std::env;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use hoopstreak::testing::{SCENARIOS_DIR, TestResult, discover_tests, parser::parse_test_file, run_test};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut verbose = false;
    let mut filter: Option<String> = None;

    for arg in &args[1..] {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if !arg.starts_with('-') {
            filter = Some(arg.clone());
        }
    }

    println!("Scenario Tests");
    println!("==============\n");

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        println!("No scenarios directory found at {}", SCENARIOS_DIR);
        println!("Create test files in tests/scenarios/");
        std::process::exit(1);
    }

    let tests = discover_tests(scenarios_path, filter.as_deref());

    if tests.is_empty() {
        println!("No test files found.");
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        std::process::exit(1);
    }

    // Scenarios share nothing, so run them all at once and report in path order
    let results: Vec<(PathBuf, TestResult)> = tests
        .par_iter()
        .map(|path| {
            let result = match parse_test_file(path) {
                Ok(def) => run_test(&def),
                Err(message) => TestResult::Error { message },
            };
            (path.clone(), result)
        })
        .collect();

    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;
    let mut current_category = String::new();

    for (test_path, result) in &results {
        let rel_path = test_path.strip_prefix(scenarios_path).unwrap_or(test_path);

        // Print category header
        if let Some(parent) = rel_path.parent() {
            let category = parent.to_string_lossy().to_string();
            if category != current_category && !category.is_empty() {
                if !current_category.is_empty() {
                    println!();
                }
                println!("{}/", category);
                current_category = category;
            }
        }

        let test_name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        match result {
            TestResult::Pass { .. } => passed += 1,
            TestResult::Fail { .. } => failed += 1,
            TestResult::Error { .. } => errors += 1,
        }

        print_result(&test_name, result, verbose);
    }

    println!("\n==============");
    println!(
        "Results: {} passed, {} failed, {} errors",
        passed, failed, errors
    );

    if failed > 0 || errors > 0 {
        std::process::exit(1);
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { steps } => {
            println!("  {} {} PASS ({} steps)", name, dots, steps);
        }
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
