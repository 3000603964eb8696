#![cfg(feature = "view")]

use orgtree::view::{
    HeadlessError, Navigation, TidyTreeLayout, ViewConfig, Viewport, build_from_json, fit_subtree,
    load_view,
};

const RECORDS: &str = r#"[
  {"EMPLOYEENUMBER": "1", "FIRSTNAME": "Root"},
  {"EMPLOYEENUMBER": "2", "SUPERVISORPARTYID": "1", "FIRSTNAME": "Child"},
  {"EMPLOYEENUMBER": "3", "SUPERVISORPARTYID": "99", "FIRSTNAME": "Orphan"}
]"#;

#[test]
fn headless_pipeline() {
    let (index, report) = build_from_json(RECORDS).expect("build ok");
    assert_eq!(report.unresolved_managers.len(), 1);

    let mut view = load_view(&index, ViewConfig::default()).expect("load");
    let child = view.select_root_by_id("2").expect("select");
    assert_eq!(view.visible_nodes(), vec![child]);
    assert_eq!(view.go_to_parent(), Navigation::Moved(index.lookup("1").expect("1")));

    let root = view.current_root().expect("root");
    let viewport = Viewport::new(800.0, 600.0);
    let a = fit_subtree(&index, root, &TidyTreeLayout::default(), viewport, view.config());
    let b = fit_subtree(&index, root, &TidyTreeLayout::default(), viewport, view.config());
    assert_eq!(a, b);
    assert!(a.scale.is_finite());
}

#[test]
fn empty_upload_surfaces_build_error() {
    let err = build_from_json("[]").unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Build(orgtree::Error::EmptyInput { records_seen: 0 })
    ));
}
