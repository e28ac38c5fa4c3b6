//! Edge cases: empty files, odd specifiers, wide and deep graphs.

use std::sync::Arc;

use tempfile::TempDir;

use crate::runtime::test_utils::{TestRuntime, create_test_project};
use crate::{FileId, ScanConfig, Scanner};

#[tokio::test]
async fn empty_files_are_nodes_without_edges() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    create_test_project(temp.path(), &[("empty.ts", ""), ("empty.py", ""), ("empty.go", "")]);

    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
    let report = Scanner::new(ScanConfig::new(temp.path()))
        .scan(runtime)
        .await
        .unwrap();

    assert_eq!(report.graph.len(), 3);
    assert!(report.graph.nodes().all(|n| n.imports.is_empty() && n.exports.is_empty()));
    assert_eq!(report.graph.dead_code.len(), 3);
}

#[tokio::test]
async fn self_import_is_neither_a_cycle_nor_a_use() {
    let temp = TempDir::new().unwrap();
    create_test_project(temp.path(), &[("loop.ts", "import './loop';\n")]);

    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
    let report = Scanner::new(ScanConfig::new(temp.path()))
        .scan(runtime)
        .await
        .unwrap();

    let id = FileId::new(report.root.join("loop.ts"));
    assert!(report.graph.circular.is_empty());
    // the file is listed as its own importer, so it is not dead
    assert!(report.graph.get(&id).unwrap().imported_by.contains(&id));
    assert!(report.graph.dead_code.is_empty());
}

#[tokio::test]
async fn dotted_file_names_get_extensions_appended() {
    let temp = TempDir::new().unwrap();
    create_test_project(
        temp.path(),
        &[
            ("app.ts", "import { Service } from './user.service';\n"),
            ("user.service.ts", "export class Service {}\n"),
        ],
    );

    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
    let report = Scanner::new(ScanConfig::new(temp.path()))
        .scan(runtime)
        .await
        .unwrap();

    let app = report.graph.get(&FileId::new(report.root.join("app.ts"))).unwrap();
    assert_eq!(
        app.imports[0].resolved_path,
        Some(FileId::new(report.root.join("user.service.ts")))
    );
}

#[tokio::test]
async fn wide_fan_in_produces_one_importer_per_file() {
    let temp = TempDir::new().unwrap();
    let mut files: Vec<(String, String)> = (0..200)
        .map(|i| (format!("leaf{i:03}.js"), "require('./hub');\n".to_string()))
        .collect();
    files.push(("hub.js".to_string(), "module.exports = {};\n".to_string()));
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    create_test_project(temp.path(), &borrowed);

    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
    let report = Scanner::new(ScanConfig::new(temp.path()).with_jobs(4))
        .scan(runtime)
        .await
        .unwrap();

    let hub = report.graph.get(&FileId::new(report.root.join("hub.js"))).unwrap();
    assert_eq!(hub.imported_by.len(), 200);
    assert_eq!(report.graph.dead_code.len(), 200);
}

#[tokio::test]
async fn long_import_chain_scans_without_overflow() {
    let temp = TempDir::new().unwrap();
    let count = 2_000;
    let files: Vec<(String, String)> = (0..count)
        .map(|i| {
            let next = (i + 1) % count;
            (format!("m{i:04}.py"), format!("from .m{next:04} import x\nx = 1\n"))
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    create_test_project(temp.path(), &borrowed);

    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));
    let report = Scanner::new(ScanConfig::new(temp.path()))
        .scan(runtime)
        .await
        .unwrap();

    assert_eq!(report.graph.circular.len(), 1);
    assert_eq!(report.graph.circular[0].len(), count);
    assert!(report.graph.dead_code.is_empty());
}
