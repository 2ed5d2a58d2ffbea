//! Data to document and back.

use std::cell::Cell;
use std::rc::Rc;

use liant::atelier::Document;
use liant::fresco::{BoxNode, CheckboxNode, ElementTree, InputNode, NodeId, TextNode};
use liant::{bind, BindOptions, Binding};
use serde_json::{json, Value};

struct Profile {
    tree: ElementTree,
    root: NodeId,
    name: NodeId,
    age: NodeId,
}

fn profile_markup() -> Profile {
    let mut tree = ElementTree::new();
    let root = tree.mount_root(BoxNode::new("div"));
    let name = tree.mount(root, InputNode::new().bind("/user/name")).unwrap();
    let age = tree.mount(root, InputNode::new().bind("/user/age")).unwrap();
    tree.mount(root, CheckboxNode::new().bind("/user/admin")).unwrap();
    tree.mount(root, InputNode::new().bind("/user/nickname")).unwrap();
    tree.mount(root, BoxNode::new("span").bind("title:/user/name")).unwrap();
    let list = tree.mount(root, BoxNode::new("ul").each("/tags")).unwrap();
    tree.mount(list, TextNode::new("li", "").bind(":/tags/0")).unwrap();
    Profile {
        tree,
        root,
        name,
        age,
    }
}

fn profile_data() -> Value {
    json!({
        "user": { "name": "Ada", "age": 36, "admin": true, "nickname": null },
        "tags": ["a", "b"]
    })
}

fn count_changes(binding: &mut Binding<ElementTree>) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    binding.on_changed(move |_| sink.set(sink.get() + 1));
    count
}

#[test]
fn write_shows_every_value() {
    let Profile { mut tree, root, .. } = profile_markup();
    let _binding = bind(&mut tree, root, profile_data(), BindOptions::default()).unwrap();

    insta::assert_snapshot!(tree.outline(root), @r#"
    div
      input data-bind="/user/name" ["Ada"]
      input data-bind="/user/age" ["36"]
      input type="checkbox" data-bind="/user/admin" [x]
      input data-bind="/user/nickname" [""]
      span data-bind="title:/user/name" title="Ada"
      ul data-each="/tags"
        li data-bind=":/tags/0" "a"
        li data-bind=":/tags/1" "b"
    "#);
}

#[test]
fn round_trip_is_lossless() {
    let Profile { mut tree, root, .. } = profile_markup();
    let mut binding = bind(&mut tree, root, profile_data(), BindOptions::default()).unwrap();
    let changes = count_changes(&mut binding);

    let data = binding.from_document(&mut tree).unwrap().clone();

    assert_eq!(data, profile_data());
    assert_eq!(changes.get(), 0);
}

#[test]
fn round_trip_after_replacing_data() {
    let Profile { mut tree, root, .. } = profile_markup();
    let mut binding = bind(&mut tree, root, profile_data(), BindOptions::default()).unwrap();

    let replacement = json!({
        "user": { "name": "Grace", "age": 85, "admin": false, "nickname": "amazing" },
        "tags": ["x", "y", "z"]
    });
    binding
        .to_document(&mut tree, Some(replacement.clone()))
        .unwrap();

    assert_eq!(binding.from_document(&mut tree).unwrap(), &replacement);
}

#[test]
fn edits_are_read_back_with_their_types() {
    let Profile {
        mut tree,
        root,
        name,
        age,
    } = profile_markup();
    let mut binding = bind(&mut tree, root, profile_data(), BindOptions::default()).unwrap();
    let changes = count_changes(&mut binding);

    tree.set_text_value(name, "Ada L.");
    tree.set_text_value(age, "37");
    let data = binding.from_document(&mut tree).unwrap();

    assert_eq!(data["user"]["name"], json!("Ada L."));
    assert_eq!(data["user"]["age"], json!(37));
    assert_eq!(changes.get(), 1);
}

#[test]
fn strings_stay_strings_without_type_preservation() {
    let Profile { mut tree, root, .. } = profile_markup();
    let options = BindOptions {
        preserve_types: false,
        ..BindOptions::default()
    };
    let mut binding = bind(&mut tree, root, profile_data(), options).unwrap();

    let data = binding.from_document(&mut tree).unwrap();
    assert_eq!(data["user"]["age"], json!("36"));
    assert_eq!(data["user"]["admin"], json!(true));
}

#[test]
fn unbound_markup_does_not_invent_keys() {
    let mut tree = ElementTree::new();
    let root = tree.mount_root(BoxNode::new("div"));
    tree.mount(root, InputNode::new().bind("/draft")).unwrap();
    tree.mount(root, TextNode::new("p", "").bind(":/title")).unwrap();

    let mut binding = bind(&mut tree, root, json!({"title": "T"}), BindOptions::default()).unwrap();

    assert_eq!(
        binding.from_document(&mut tree).unwrap(),
        &json!({"title": "T"})
    );
}
