
mod edge_cases;
mod scanner_tests;
