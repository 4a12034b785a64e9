//! End-to-end binding behaviour through `App::mount`.

use std::cell::RefCell;
use std::rc::Rc;

use pochoir::croquis::{Value, Watcher};
use pochoir::relief::{Error, ErrorCode, RenderTree};
use pochoir::toile::Document;
use pochoir::{App, AppOptions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn mount(markup: &str, options: AppOptions) -> (Rc<Document>, App) {
    init_tracing();
    let doc = Document::parse(markup).unwrap();
    let app = App::mount(options, doc.clone()).unwrap();
    (doc, app)
}

#[test]
fn observation_covers_nested_and_later_objects() {
    let (_doc, app) = mount(
        r#"<div id="app"></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "a": 1, "user": { "name": "x" } })),
    );
    let data = app.data();
    assert!(data.is_reactive("a"));
    let user = data.get("user");
    assert!(user.as_object().unwrap().is_reactive("name"));

    data.set("later", Value::from(serde_json::json!({ "deep": { "k": 1 } })))
        .unwrap();
    let later = data.get("later");
    let deep = later.as_object().unwrap().get("deep");
    assert!(deep.as_object().unwrap().is_reactive("k"));
}

#[test]
fn watchers_register_only_with_what_they_read() {
    let (_doc, app) = mount(
        r#"<div id="app"><p>{{ a }}</p></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "a": 1, "b": 2 })),
    );
    let watcher = &app.watchers()[0];
    assert!(app.data().dep("a").unwrap().contains(watcher.id()));
    assert!(app.data().dep("b").unwrap().is_empty());
}

#[test]
fn notifies_in_registration_order_and_skips_equal_writes() {
    let (doc, app) = mount(
        r#"<div id="app"><p>{{ n }}</p><i>{{ n }}</i></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "n": 0 })),
    );
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let scope = Rc::clone(&app.context().scope);
    let _probe = Watcher::new("n", app.data(), &scope, move |v| {
        sink.borrow_mut().push(v.to_display_string().to_string());
        Ok(())
    });

    let ids = app.data().dep("n").unwrap().subscriber_ids();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], app.watchers()[0].id());
    assert_eq!(ids[1], app.watchers()[1].id());

    app.data().set("n", 0).unwrap();
    assert!(log.borrow().is_empty());

    app.data().set("n", 1).unwrap();
    assert_eq!(*log.borrow(), vec!["1"]);
    insta::assert_snapshot!(doc.inner_html(app.root()), @"<p>1</p><i>1</i>");
}

#[test]
fn last_value_tracks_consecutive_changes() {
    let (doc, app) = mount(
        r#"<div id="app"><p>{{ step }}</p></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "step": "a" })),
    );
    let root = app.root();
    let mut rendered = Vec::new();
    for step in ["b", "c", "d", "a"] {
        app.data().set("step", step).unwrap();
        assert_eq!(app.watchers()[0].value().as_str(), Some(step));
        rendered.push(doc.inner_html(root));
    }
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        "<p>b</p>",
        "<p>c</p>",
        "<p>d</p>",
        "<p>a</p>",
    ]
    "#);
}

#[test]
fn model_converges_both_ways() {
    let (doc, app) = mount(
        r#"<div id="app"><input v-model="text"><span>{{ text }}</span></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "text": "" })),
    );
    let input = doc.query_selector("input").unwrap();

    for typed in ["a", "ab", "abc"] {
        doc.input(input, typed).unwrap();
    }
    assert_eq!(app.data().get("text").as_str(), Some("abc"));
    insta::assert_snapshot!(doc.inner_html(app.root()), @r#"<input v-model="text"><span>abc</span>"#);

    app.data().set("text", "reset").unwrap();
    assert_eq!(doc.property(input, "value").unwrap().unwrap(), "reset");
}

#[test]
fn event_binding_calls_method() {
    let (doc, app) = mount(
        r#"<div id="app"><button @click="greet">{{ name }}</button></div>"#,
        AppOptions::new("#app")
            .data(serde_json::json!({ "name": "a" }))
            .method("greet", |data, _event| data.set("name", "X")),
    );
    let button = doc.query_selector("button").unwrap();
    doc.dispatch_event(button, "click").unwrap();
    assert_eq!(app.data().get("name").as_str(), Some("X"));
    insta::assert_snapshot!(doc.inner_html(app.root()), @r#"<button @click="greet">X</button>"#);
}

#[test]
fn binding_faults_fail_at_mount() {
    init_tracing();
    let doc = Document::parse(r#"<div id="app"><p v-bogus="a"></p></div>"#).unwrap();
    let err = App::mount(AppOptions::new("#app"), doc.clone()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnknownDirective));

    let doc = Document::parse(r#"<div id="app"><p @click="missing"></p></div>"#).unwrap();
    let err = App::mount(AppOptions::new("#app"), doc.clone()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnknownMethod));
}

#[test]
fn failing_watcher_aborts_the_rest() {
    let (doc, app) = mount(
        r#"<div id="app"><p>{{ n }}</p></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "n": 0 })),
    );
    let scope = Rc::clone(&app.context().scope);
    // Registered after the text binding, ahead of the one below.
    let _failing = Watcher::new("n", app.data(), &scope, |_| Err(Error::handler("boom")));
    let ran = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&ran);
    let _after = Watcher::new("n", app.data(), &scope, move |_| {
        *flag.borrow_mut() = true;
        Ok(())
    });

    let err = app.data().set("n", 1).unwrap_err();
    assert_eq!(err.to_string(), "handler failed: boom");
    assert!(!*ran.borrow());
    // Bindings registered before the failure did render.
    assert_eq!(doc.inner_html(app.root()), "<p>1</p>");
}

#[test]
fn marker_is_free_after_mount() {
    let (_doc, app) = mount(
        r#"<div id="app"><p>{{ a }}</p><input v-model="a"></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "a": 1 })),
    );
    assert!(!app.context().scope.is_collecting());
}

#[test]
fn teardown_stops_rendering() {
    let (doc, app) = mount(
        r#"<div id="app"><p>{{ a }}</p></div>"#,
        AppOptions::new("#app").data(serde_json::json!({ "a": "before" })),
    );
    app.teardown();
    assert!(app.data().dep("a").unwrap().is_empty());

    app.data().set("a", "after").unwrap();
    assert_eq!(doc.inner_html(app.root()), "<p>before</p>");
}

#[test]
fn mount_with_custom_delimiters_from_config() {
    let config: pochoir::PochoirConfig =
        serde_json::from_str(r#"{ "compiler": { "delimiters": ["${", "}"] } }"#).unwrap();
    let (doc, app) = mount(
        r#"<div id="app"><p>${ who }</p></div>"#,
        AppOptions::new("#app")
            .data(serde_json::json!({ "who": "me" }))
            .config(&config),
    );
    assert_eq!(doc.inner_html(app.root()), "<p>me</p>");
}
