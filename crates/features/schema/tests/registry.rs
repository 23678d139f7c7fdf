use atria_schema::{ArrayMember, DocumentType, Field, Hidden, Level, Registry, Rule, SchemaError};
use serde_json::json;

fn page() -> DocumentType {
    DocumentType::new("page", "Page").fields([
        Field::string("title").rules(Rule::new().required()),
        Field::boolean("heroVisible").initial(true),
        Field::object("hero", [Field::string("badge").rules(Rule::new().max(10).warning("Short badges read better"))])
            .hidden(Hidden::unless("heroVisible")),
        Field::array("related", [ArrayMember::reference(["page"])]).rules(Rule::new().unique()),
    ])
}

#[test]
fn registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();

    let registry = Registry::register([page()]).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let doc = json!({ "_id": format!("page-{i}"), "_type": "page", "title": "Home" });
                registry.validate(&doc).unwrap().is_valid()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn hidden_fields_are_still_validated() {
    let registry = Registry::register([page()]).unwrap();
    let doc = json!({
        "_id": "page-1",
        "_type": "page",
        "title": "Home",
        "heroVisible": false,
        "hero": { "badge": "FROM THE FOUNDERS OF" }
    });

    let visibility = registry.visibility(&doc).unwrap();
    assert!(visibility.is_field_hidden("hero"));

    let report = registry.validate(&doc).unwrap();
    let markers: Vec<_> = report.at("hero.badge").collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].level, Level::Warning);
    assert!(report.is_valid());
    assert_eq!(doc["hero"]["badge"], json!("FROM THE FOUNDERS OF"));
}

#[test]
fn failures_accumulate_across_fields() {
    let registry = Registry::register([page()]).unwrap();
    let doc = json!({
        "_type": "page",
        "heroVisible": "yes",
        "related": [
            { "_key": "a", "_type": "reference", "_ref": "page-2" },
            { "_key": "b", "_type": "reference", "_ref": "page-2" }
        ]
    });

    let report = registry.validate(&doc).unwrap();
    let paths: Vec<String> = report.errors().map(|m| m.path.to_string()).collect();
    assert_eq!(paths, ["title", "heroVisible", r#"related[_key=="b"]"#]);
}

#[test]
fn duplicate_registration_fails_fast() {
    let err = Registry::register([page(), page()]).unwrap_err();
    assert!(matches!(err, SchemaError::Configuration { .. }));
    assert_eq!(err.to_string(), "Invalid schema for 'page': document type is registered twice");
}

#[test]
fn new_documents_carry_initial_values() {
    let registry = Registry::register([page()]).unwrap();
    let doc = registry.initial_document("page", "page-9").unwrap();
    assert_eq!(doc, json!({ "_id": "page-9", "_type": "page", "heroVisible": true }));
    assert!(matches!(registry.initial_document("post", "x"), Err(SchemaError::UnknownType { .. })));
}
