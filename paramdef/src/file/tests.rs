//! Document loading and saving coverage.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::rstest;
use serde_json::{Value, json};
use test_helpers::documents::DocumentDir;

use super::{DocumentFormat, load_document, save_document};
use crate::{ParamError, ParamResult};

fn ok<T>(result: ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

#[test]
fn yaml_integer_keys_become_strings() -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write("bins.yaml", "age_bins:\n  0:\n    age: 1\n  1:\n    age: 3.5\n")?;
    let loaded = ok(load_document(&path))?;
    ensure!(
        Value::Object(loaded) == json!({"age_bins": {"0": {"age": 1}, "1": {"age": 3.5}}}),
        "unexpected YAML conversion"
    );
    Ok(())
}

#[test]
fn yaml_keeps_integer_float_distinction() -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write("numbers.yml", "whole: 1\nfloat: 1.0\n")?;
    let loaded = ok(load_document(&path))?;
    ensure!(loaded.get("whole").is_some_and(Value::is_i64));
    ensure!(loaded.get("float").is_some_and(Value::is_f64));
    Ok(())
}

#[test]
fn key_order_is_preserved() -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write("order.yaml", "zeta: 1\nalpha: 2\nmid: 3\n")?;
    let loaded = ok(load_document(&path))?;
    let keys: Vec<&str> = loaded.keys().map(String::as_str).collect();
    ensure!(keys == ["zeta", "alpha", "mid"], "order lost: {keys:?}");
    Ok(())
}

#[test]
fn directories_union_top_level_keys() -> Result<()> {
    let docs = DocumentDir::new()?;
    let dir = docs.mkdir("layer")?;
    docs.write("layer/a.yaml", "first: 1\nshared: a\n")?;
    docs.write("layer/b.json", r#"{"second": 2, "shared": "b"}"#)?;
    docs.write("layer/c.toml", "third = 3\n")?;
    docs.write("layer/notes.md", "ignored")?;
    docs.mkdir("layer/nested.yaml")?;
    let loaded = ok(load_document(&dir))?;
    ensure!(
        Value::Object(loaded) == json!({"first": 1, "shared": "b", "second": 2, "third": 3}),
        "unexpected directory union"
    );
    Ok(())
}

#[test]
fn empty_yaml_is_an_empty_mapping() -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write("empty.yaml", "")?;
    ensure!(ok(load_document(&path))?.is_empty());
    Ok(())
}

#[rstest]
#[case::unknown_extension("params.txt", "a: 1")]
#[case::no_extension("params", "a: 1")]
fn unrecognised_files_are_rejected(#[case] name: &str, #[case] contents: &str) -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write(name, contents)?;
    let err = load_document(&path).err().ok_or_else(|| anyhow!("expected rejection"))?;
    ensure!(matches!(err, ParamError::UnsupportedFormat { .. }), "got {err}");
    Ok(())
}

#[rstest]
#[case::sequence("list.yaml", "- a\n- b\n")]
#[case::malformed_yaml("broken.yaml", "a: [")]
#[case::malformed_json("broken.json", "{")]
#[case::malformed_toml("broken.toml", "a = ")]
fn unusable_documents_are_reported(#[case] name: &str, #[case] contents: &str) -> Result<()> {
    let docs = DocumentDir::new()?;
    let path = docs.write(name, contents)?;
    let err = load_document(&path).err().ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(matches!(err, ParamError::Document { .. }), "got {err}");
    ensure!(err.to_string().contains(name), "path missing from {err}");
    Ok(())
}

#[rstest]
#[case::yaml("out/params.yaml")]
#[case::json("out/params.json")]
fn saved_trees_round_trip(#[case] name: &str) -> Result<()> {
    let tree = json!({
        "classes": {"habitats": ["barn", "ocean"]},
        "demographics": {
            "cat": {
                "num": 2,
                "prob_happy": 1.0,
                "age_bins": {"0": {"age": 1}, "12": {"age": 14}},
                "flag": true,
            }
        },
        "empty": {},
    });
    let docs = DocumentDir::new()?;
    let path = docs.join(name);
    ok(save_document(&path, &tree))?;
    let reloaded = Value::Object(ok(load_document(&path))?);
    ensure!(reloaded == tree, "round trip changed the tree: {reloaded}");
    let cat = &reloaded["demographics"]["cat"];
    ensure!(cat["num"].is_i64() && cat["prob_happy"].is_f64());
    let keys: Vec<&str> = reloaded
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default();
    ensure!(keys == ["classes", "demographics", "empty"], "order lost: {keys:?}");
    Ok(())
}

#[test]
fn toml_round_trips_flat_tables() -> Result<()> {
    let tree = json!({"settings": {"count": 3, "ratio": 2.0, "names": ["a", "b"]}});
    let docs = DocumentDir::new()?;
    let path = docs.join("params.toml");
    ok(save_document(&path, &tree))?;
    ensure!(Value::Object(ok(load_document(&path))?) == tree);
    Ok(())
}

#[test]
fn toml_cannot_hold_null() -> Result<()> {
    let docs = DocumentDir::new()?;
    let err = save_document(&docs.join("params.toml"), &json!({"a": null}))
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(matches!(err, ParamError::Document { .. }), "got {err}");
    Ok(())
}

#[rstest]
#[case("a.YAML", Some(DocumentFormat::Yaml))]
#[case("a.yml", Some(DocumentFormat::Yaml))]
#[case("a.json", Some(DocumentFormat::Json))]
#[case("a.toml", Some(DocumentFormat::Toml))]
#[case("a.yaml.bak", None)]
fn formats_follow_extensions(#[case] name: &str, #[case] expected: Option<DocumentFormat>) {
    assert_eq!(DocumentFormat::from_path(Utf8Path::new(name)), expected);
}
