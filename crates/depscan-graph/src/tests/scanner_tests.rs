//! End-to-end scans of temporary projects.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::output::to_compact;
use crate::runtime::test_utils::{TestRuntime, create_test_project};
use crate::{FileId, Language, ScanConfig, ScanError, ScanReport, Scanner};

async fn scan(root: &Path, config: ScanConfig) -> ScanReport {
    let runtime = Arc::new(TestRuntime::new(root.to_path_buf()));
    Scanner::new(config).scan(runtime).await.expect("scan failed")
}

async fn scan_project(files: &[(&str, &str)]) -> (TempDir, ScanReport) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    create_test_project(temp.path(), files);
    let report = scan(temp.path(), ScanConfig::new(temp.path()).with_jobs(2)).await;
    (temp, report)
}

fn key(report: &ScanReport, relative: &str) -> FileId {
    FileId::new(report.root.join(relative))
}

#[tokio::test]
async fn three_file_ring_is_one_cycle_with_no_dead_code() {
    let (_temp, report) = scan_project(&[
        ("a.ts", "import { b } from './b';\nexport const a = 1;\n"),
        ("b.ts", "import { c } from './c';\nexport const b = 1;\n"),
        ("c.ts", "import { a } from './a';\nexport const c = 1;\n"),
    ])
    .await;

    let graph = &report.graph;
    assert_eq!(graph.len(), 3);
    assert_eq!(
        graph.circular,
        vec![vec![key(&report, "a.ts"), key(&report, "b.ts"), key(&report, "c.ts")]]
    );
    assert!(graph.dead_code.is_empty());
    assert!(report.is_complete());
}

#[tokio::test]
async fn unimported_go_files_are_dead_code() {
    let (_temp, report) = scan_project(&[
        ("main.go", "package main\n\nimport \"fmt\"\n\nfunc main() { fmt.Println(1) }\n"),
        ("lib.go", "package main\n\nfunc Helper() {}\n"),
    ])
    .await;

    assert_eq!(
        report.graph.dead_code,
        vec![key(&report, "lib.go"), key(&report, "main.go")]
    );
    assert!(report.graph.circular.is_empty());
    assert_eq!(report.resolution.external, 1);
}

#[tokio::test]
async fn go_module_imports_use_go_mod() {
    let (_temp, report) = scan_project(&[
        ("go.mod", "module example.com/app\n\ngo 1.22\n"),
        (
            "main.go",
            "package main\n\nimport (\n\t\"fmt\"\n\t\"example.com/app/internal/store\"\n)\n",
        ),
        ("internal/store/store.go", "package store\n\nfunc Open() {}\n"),
    ])
    .await;

    assert_eq!(report.module.as_ref().map(|m| m.name()), Some("example.com/app"));

    let main = report.graph.get(&key(&report, "main.go")).unwrap();
    assert_eq!(main.imports.len(), 2);
    assert_eq!(main.imports[0].resolved_path, None);
    assert_eq!(
        main.imports[1].resolved_path,
        Some(key(&report, "internal/store/store.go"))
    );
    assert_eq!(report.graph.dead_code, vec![key(&report, "main.go")]);
}

#[tokio::test]
async fn configured_module_overrides_detection() {
    let temp = TempDir::new().unwrap();
    create_test_project(
        temp.path(),
        &[
            ("app/__init__.py", ""),
            ("app/models.py", "class User:\n    pass\n"),
            ("main.py", "from myapp.app.models import User\n"),
        ],
    );

    let config = ScanConfig::new(temp.path()).with_module("myapp");
    let report = scan(temp.path(), config).await;

    let main = report.graph.get(&key(&report, "main.py")).unwrap();
    assert_eq!(
        main.imports[0].resolved_path,
        Some(key(&report, "app/models.py"))
    );
}

#[tokio::test]
async fn repeated_imports_list_the_importer_once() {
    let (_temp, report) = scan_project(&[
        ("a.ts", "import { x } from './b';\nimport { y } from './b';\n"),
        ("b.ts", "export const x = 1;\nexport const y = 2;\n"),
    ])
    .await;

    let b = report.graph.get(&key(&report, "b.ts")).unwrap();
    assert_eq!(b.imported_by.len(), 1);
    assert!(b.imported_by.contains(&key(&report, "a.ts")));
}

#[tokio::test]
async fn python_relative_imports_resolve_within_packages() {
    let (_temp, report) = scan_project(&[
        ("pkg/__init__.py", "from .core import run\n"),
        ("pkg/core.py", "from . import util\nfrom .util import helper\n\ndef run():\n    pass\n"),
        ("pkg/util.py", "import os\n\ndef helper():\n    pass\n"),
    ])
    .await;

    let core = report.graph.get(&key(&report, "pkg/core.py")).unwrap();
    assert_eq!(core.imports[0].resolved_path, Some(key(&report, "pkg/__init__.py")));
    assert_eq!(core.imports[1].resolved_path, Some(key(&report, "pkg/util.py")));

    // __init__ imports core and core imports __init__
    assert_eq!(report.graph.circular.len(), 1);
    assert_eq!(report.graph.dead_code, Vec::<FileId>::new());
}

#[tokio::test]
async fn excluded_directories_are_never_walked() {
    let (_temp, report) = scan_project(&[
        ("src/index.js", "const dep = require('./../node_modules/dep/index.js');\n"),
        ("node_modules/dep/index.js", "module.exports = 1;\n"),
        (".git/hooks/pre-commit.py", "print(1)\n"),
    ])
    .await;

    assert_eq!(report.files_discovered, 1);
    assert_eq!(report.graph.len(), 1);

    let index = report.graph.get(&key(&report, "src/index.js")).unwrap();
    assert!(!index.imports[0].is_resolved());
    assert_eq!(report.resolution.outside_graph, 1);
}

#[tokio::test]
async fn parse_failures_drop_files_without_aborting() {
    let temp = TempDir::new().unwrap();
    create_test_project(
        temp.path(),
        &[
            ("ok.ts", "import './big';\n"),
            ("big.ts", "export const data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];\n"),
        ],
    );
    std::fs::write(temp.path().join("binary.py"), [0xff, 0xfe, 0xfd]).unwrap();

    let config = ScanConfig::new(temp.path()).with_max_file_size(32);
    let report = scan(temp.path(), config).await;

    assert_eq!(report.files_discovered, 3);
    assert_eq!(report.graph.len(), 1);
    assert_eq!(report.parse_failures.len(), 2);
    assert!(report.parse_failures[0].path.ends_with("big.ts"));
    assert!(report.parse_failures[1].path.ends_with("binary.py"));

    // the import target failed to parse, so the import stays unresolved
    let ok = report.graph.get(&key(&report, "ok.ts")).unwrap();
    assert!(!ok.imports[0].is_resolved());
}

#[tokio::test]
async fn syntax_errors_keep_the_file() {
    let (_temp, report) = scan_project(&[
        ("broken.ts", "import { a } from './a';\nexport function (\n"),
        ("a.ts", "export const a = 1;\n"),
    ])
    .await;

    assert!(report.is_complete());
    let broken = report.graph.get(&key(&report, "broken.ts")).unwrap();
    assert_eq!(broken.imports[0].resolved_path, Some(key(&report, "a.ts")));
}

#[tokio::test]
async fn repeated_scans_are_identical() {
    let files = [
        ("web/app.tsx", "import { api } from './api';\nexport default function App() {}\n"),
        ("web/api.ts", "import { App } from './app';\nexport const api = 1;\n"),
        ("web/index.js", "require('./app');\n"),
        ("svc/main.go", "package main\n\nfunc main() {}\n"),
        ("tools/gen.py", "import sys\n"),
    ];
    let temp = TempDir::new().unwrap();
    create_test_project(temp.path(), &files);

    let first = scan(temp.path(), ScanConfig::new(temp.path()).with_jobs(1)).await;
    let second = scan(temp.path(), ScanConfig::new(temp.path()).with_jobs(8)).await;

    assert_eq!(first.graph.files, second.graph.files);
    assert_eq!(first.graph.circular, second.graph.circular);
    assert_eq!(first.graph.dead_code, second.graph.dead_code);

    let mut replay = second.graph.clone();
    replay.last_updated = first.graph.last_updated;
    assert_eq!(to_compact(&first.graph), to_compact(&replay));
}

#[tokio::test]
async fn language_filter_limits_the_graph() {
    let temp = TempDir::new().unwrap();
    create_test_project(
        temp.path(),
        &[("a.ts", ""), ("b.py", ""), ("c.go", "package c\n")],
    );

    let config = ScanConfig::new(temp.path()).with_languages([Language::Python, Language::Go]);
    let report = scan(temp.path(), config).await;

    let stats = report.statistics();
    assert_eq!(stats.file_count, 2);
    assert_eq!(stats.languages.get(&Language::TypeScript), None);
    assert_eq!(stats.languages.get(&Language::Python), Some(&1));
}

#[tokio::test]
async fn missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");
    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));

    let err = Scanner::new(ScanConfig::new(&missing))
        .scan(runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::FileSystem { .. }));
}

#[tokio::test]
async fn invalid_config_is_rejected_before_walking() {
    let temp = TempDir::new().unwrap();
    let runtime = Arc::new(TestRuntime::new(temp.path().to_path_buf()));

    let err = Scanner::new(ScanConfig::new(temp.path()).with_jobs(0))
        .scan(runtime)
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::InvalidConfig(_)));
}
