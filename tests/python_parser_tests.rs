//! Tests for declaration extraction from Python files.

use std::path::PathBuf;

use pydoccov::{
    config::Config,
    coverage::CoverageStat,
    python::{FileReport, PythonFileError},
    types::DeclarationKind,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("python")
        .join(path)
}

fn sample(config: &Config) -> FileReport {
    FileReport::from_path(&fixture("extraction/sample.py"), config).expect("analyse sample")
}

fn names(report: &[pydoccov::types::Declaration]) -> Vec<(&str, usize, bool)> {
    report
        .iter()
        .map(|d| (d.name.as_str(), d.line, d.has_docstring()))
        .collect()
}

#[test]
fn module_docstring_follows_shebang() {
    let report = sample(&Config::default());
    assert_eq!(
        report.module_docstring(),
        Some("Sample module exercising every extraction rule.")
    );
    assert_eq!(report.module().kind, DeclarationKind::Module);
    assert_eq!(report.module().line, 1);
    assert!(report.module().name.is_empty());
}

#[test]
fn classes_are_collected_breadth_first_at_any_depth() {
    let report = sample(&Config::default());
    assert_eq!(
        names(report.classes()),
        vec![("Box", 16, true), ("Lid", 30, false), ("Guarded", 49, true)]
    );
    assert!(
        report
            .classes()
            .iter()
            .all(|c| c.kind == DeclarationKind::Class)
    );
    assert_eq!(report.class_coverage(), CoverageStat::new(2, 3));
}

#[test]
fn functions_are_filtered_and_walked_breadth_first() {
    let report = sample(&Config::default());
    assert_eq!(
        names(report.functions()),
        vec![
            ("outer", 7, true),
            ("cached", 35, true),
            ("fetch", 40, true),
            ("formatted", 44, false),
            ("inner", 10, false),
            ("put", 26, false),
            ("fallback", 52, false),
        ]
    );
    assert_eq!(report.function_coverage(), CoverageStat::new(3, 7));
}

#[test]
fn magic_filter_controls_dunder_methods() {
    let keep_all = Config::builder()
        .skip_magic_funcs(false)
        .skip_private_funcs(false)
        .build();
    let report = sample(&keep_all);
    assert!(report.functions().iter().any(|f| f.name == "__init__"));
    assert!(report.functions().iter().any(|f| f.name == "_helper"));
    assert_eq!(report.function_coverage(), CoverageStat::new(4, 9));

    let skip_magic_only = Config::builder().skip_private_funcs(false).build();
    let report = sample(&skip_magic_only);
    assert!(!report.functions().iter().any(|f| f.name == "__init__"));
    assert!(report.functions().iter().any(|f| f.name == "_helper"));
    assert_eq!(report.function_coverage(), CoverageStat::new(3, 8));
}

#[test]
fn private_filter_also_drops_dunders() {
    let skip_private_only = Config::builder().skip_magic_funcs(false).build();
    let report = sample(&skip_private_only);
    assert!(report.functions().iter().all(|f| !f.name.starts_with('_')));
    assert_eq!(report.function_coverage(), CoverageStat::new(3, 7));
}

#[test]
fn name_filters_never_touch_classes() {
    let code = "class _Private:\n    pass\n\n\nclass __Dunder__:\n    '''Doc.'''\n";
    let report = FileReport::from_source("classes.py", code.to_string(), &Config::default())
        .expect("analyse");
    assert_eq!(
        names(report.classes()),
        vec![("_Private", 1, false), ("__Dunder__", 5, true)]
    );
}

#[test]
fn empty_file_is_fully_covered_but_lacks_module_docstring() {
    let report =
        FileReport::from_source("empty.py", String::new(), &Config::default()).expect("analyse");
    assert_eq!(report.module_docstring(), None);
    assert!(report.classes().is_empty());
    assert!(report.functions().is_empty());
    assert_eq!(report.class_coverage().percentage, 1.0);
    assert_eq!(report.function_coverage().percentage, 1.0);
}

#[test]
fn duplicate_names_are_told_apart_by_line() {
    let code = "def f():\n    pass\n\n\nclass C:\n    def f(self):\n        '''Doc.'''\n";
    let report =
        FileReport::from_source("dup.py", code.to_string(), &Config::default()).expect("analyse");
    assert_eq!(names(report.functions()), vec![("f", 1, false), ("f", 6, true)]);
}

#[test]
fn syntax_error_names_file_and_line() {
    let err = FileReport::from_path(&fixture("broken/zz_bad.py"), &Config::default())
        .expect_err("broken file must not analyse");

    match &err {
        PythonFileError::SyntaxError {
            file_name, line, ..
        } => {
            assert!(file_name.ends_with("zz_bad.py"));
            assert_eq!(*line, 4);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
    assert!(err.to_string().contains("def broken(:"));
}

fn syntax_error(path: &str) -> (usize, String) {
    match FileReport::from_path(&fixture(path), &Config::default()) {
        Err(PythonFileError::SyntaxError { line, message, .. }) => (line, message),
        other => panic!("expected a syntax error for {path}, got {other:?}"),
    }
}

#[test]
fn unexpected_indent_is_a_syntax_error() {
    assert_eq!(
        syntax_error("indentation/unexpected_indent.py"),
        (3, "unexpected indent".to_string())
    );
}

#[test]
fn dedent_to_unknown_level_is_a_syntax_error() {
    assert_eq!(
        syntax_error("indentation/bad_dedent.py"),
        (4, "unindent does not match any outer indentation level".to_string())
    );
}

#[test]
fn mixed_tabs_and_spaces_is_a_syntax_error() {
    assert_eq!(
        syntax_error("indentation/mixed_tabs.py"),
        (4, "inconsistent use of tabs and spaces in indentation".to_string())
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let err = FileReport::from_path(&fixture("does-not-exist.py"), &Config::default())
        .expect_err("missing file");
    assert!(matches!(err, PythonFileError::Read { .. }));
}
